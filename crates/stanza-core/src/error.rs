//! Error types for stanza-core

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] stanza_fs::Error),

    #[error("Document has no source path to read from or write to")]
    NoSourcePath,

    #[error("Invalid stanza name '{name}': names must not be empty")]
    InvalidStanzaName { name: String },
}
