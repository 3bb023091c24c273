//! File access for stanza files
//!
//! The stanza model never touches the disk directly. Everything it needs
//! goes through the [`FileStore`] trait, which has a local-disk and an
//! in-memory implementation.

pub mod config;
pub mod error;
pub mod io;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{FileStore, LocalFs, MemoryFs};
