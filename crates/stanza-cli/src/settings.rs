//! Settings file and command-line overrides

use std::path::Path;

use serde::Deserialize;
use stanza_core::{EndOfInput, ParseOptions};
use stanza_fs::{ConfigStore, LocalFs};

use crate::error::Result;

/// Contents of the optional `--config` TOML file.
///
/// ```toml
/// comment_char = "#"
/// drop_dangling = true
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Character that starts a comment line.
    pub comment_char: Option<char>,
    /// Drop a final stanza that is not followed by a blank line.
    #[serde(default)]
    pub drop_dangling: bool,
}

impl Settings {
    /// Load settings from `path`, or defaults when no path was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Ok(ConfigStore::new(LocalFs).load(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Parser options, with `comment_char` taking precedence over the file.
    pub fn parse_options(&self, comment_char: Option<char>) -> ParseOptions {
        let mut options = ParseOptions::default();
        if let Some(c) = comment_char.or(self.comment_char) {
            options = options.with_comment_char(c);
        }
        if self.drop_dangling {
            options = options.with_end_of_input(EndOfInput::Drop);
        }
        options
    }
}
