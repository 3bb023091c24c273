//! TOML configuration loading

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, FileStore, Result};

/// Loads TOML configuration through a [`FileStore`].
#[derive(Debug)]
pub struct ConfigStore<S> {
    store: S,
}

impl<S: FileStore> ConfigStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load and deserialize a TOML file.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = self.store.read_text(path)?;
        tracing::debug!(path = %path.display(), "Loading config");
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a TOML file, falling back to `T::default()` when it is missing.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        if self.store.exists(path) {
            self.load(path)
        } else {
            tracing::debug!(path = %path.display(), "No config found, using defaults");
            Ok(T::default())
        }
    }
}
