//! Stanza file model, parser and formatter
//!
//! A stanza file is a line-oriented configuration format made of named
//! paragraphs ("stanzas") holding `key = value` attributes, with comment
//! lines in between. AIX `/etc/filesystems` is the classic example:
//!
//! ```text
//! * filesystem table
//!
//! /home:
//!        dev = /dev/hd1
//!        vfs = jfs2
//!
//! ```
//!
//! [`StanzaDocument`] parses such text into [`Stanza`] values, offers
//! by-name edits, and formats the model back into text. File access goes
//! through [`stanza_fs::FileStore`].

pub mod document;
pub mod error;
pub mod parser;
pub mod stanza;

pub use document::StanzaDocument;
pub use error::{Error, Result};
pub use parser::{EndOfInput, ParseOptions};
pub use stanza::{DEFAULT_COMMENT_CHAR, Stanza};
