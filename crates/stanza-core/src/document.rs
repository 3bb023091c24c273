//! A whole stanza file: document comment plus ordered stanzas.

use std::fmt;
use std::path::{Path, PathBuf};

use stanza_fs::FileStore;

use crate::error::{Error, Result};
use crate::parser::{self, ParseOptions};
use crate::stanza::{Stanza, write_comment};

/// In-memory model of a stanza file such as `/etc/filesystems`.
///
/// Edits only touch the model. Nothing reaches the disk until
/// [`write`](Self::write) or [`write_to`](Self::write_to) is called.
///
/// Stanza names are not required to be unique. Lookups return the first
/// stanza with a matching name; by-name mutators affect all of them and
/// report how many they touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StanzaDocument {
    source_path: Option<PathBuf>,
    options: ParseOptions,
    comment: Vec<String>,
    stanzas: Vec<Stanza>,
}

impl Default for StanzaDocument {
    fn default() -> Self {
        Self::with_options(ParseOptions::default())
    }
}

impl StanzaDocument {
    /// An empty document using `*` for comments.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment_char(comment_char: char) -> Self {
        Self::with_options(ParseOptions::default().with_comment_char(comment_char))
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            source_path: None,
            options,
            comment: Vec::new(),
            stanzas: Vec::new(),
        }
    }

    /// Parse text with default options.
    ///
    /// ```
    /// use stanza_core::StanzaDocument;
    ///
    /// let doc = StanzaDocument::parse("/home:\n       dev = /dev/hd1\n\n");
    /// assert_eq!(doc.get_stanza_attr("/home", "dev"), Some("/dev/hd1"));
    /// ```
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: ParseOptions) -> Self {
        let mut doc = Self::with_options(options);
        doc.load_text(text);
        doc
    }

    /// Open the stanza file at `path`.
    ///
    /// An existing file is parsed right away. A missing file is created
    /// empty and yields an empty document. Either way `path` becomes the
    /// document's source path.
    pub fn open(store: &impl FileStore, path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(store, path, ParseOptions::default())
    }

    pub fn open_with(
        store: &impl FileStore,
        path: impl AsRef<Path>,
        options: ParseOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let mut doc = Self::with_options(options);
        doc.source_path = Some(path.to_path_buf());

        if store.exists(path) {
            tracing::debug!(path = %path.display(), "Opening stanza file");
            doc.load_text(&store.read_text(path)?);
        } else {
            tracing::debug!(path = %path.display(), "Stanza file missing, creating it");
            store.create_empty(path)?;
        }
        Ok(doc)
    }

    fn load_text(&mut self, text: &str) {
        let parsed = parser::parse(text, self.options);
        self.comment = parsed.comment;
        self.stanzas = parsed.stanzas;
    }

    fn source(&self) -> Result<&Path> {
        self.source_path.as_deref().ok_or(Error::NoSourcePath)
    }

    /// Discard in-memory state and parse the source path again.
    pub fn read(&mut self, store: &impl FileStore) -> Result<()> {
        let path = self.source()?.to_path_buf();
        self.read_from(store, path)
    }

    /// Discard in-memory state and parse another file.
    ///
    /// The source path is unchanged, so a later [`write`](Self::write)
    /// still targets the original file.
    pub fn read_from(&mut self, store: &impl FileStore, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = store.read_text(path)?;
        self.clear();
        self.load_text(&text);
        tracing::debug!(path = %path.display(), stanzas = self.stanzas.len(), "Re-read stanza file");
        Ok(())
    }

    /// Write the formatted document back to its source path.
    pub fn write(&self, store: &impl FileStore) -> Result<()> {
        let path = self.source()?;
        self.write_to(store, path)
    }

    /// Write the formatted document to `path`.
    ///
    /// Fails without touching the file if a stanza name is empty.
    pub fn write_to(&self, store: &impl FileStore, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(stanza) = self.stanzas.iter().find(|stanza| stanza.name().is_empty()) {
            return Err(Error::InvalidStanzaName {
                name: stanza.name().to_string(),
            });
        }
        store.write_text(path, &self.format())?;
        tracing::debug!(path = %path.display(), stanzas = self.stanzas.len(), "Wrote stanza file");
        Ok(())
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn comment_char(&self) -> char {
        self.options.comment_char
    }

    /// Change the comment character used by later reads and by formatting.
    pub fn set_comment_char(&mut self, comment_char: char) {
        self.options.comment_char = comment_char;
    }

    /// Document comment lines, without the comment character.
    pub fn comment(&self) -> &[String] {
        &self.comment
    }

    /// Append to the document comment. Multi-line text adds one line each.
    pub fn add_comment(&mut self, text: &str) {
        if text.is_empty() {
            self.comment.push(String::new());
        } else {
            self.comment.extend(text.lines().map(str::to_string));
        }
    }

    pub fn stanzas(&self) -> &[Stanza] {
        &self.stanzas
    }

    pub fn stanza_names(&self) -> Vec<&str> {
        self.stanzas.iter().map(Stanza::name).collect()
    }

    pub fn len(&self) -> usize {
        self.stanzas.len()
    }

    /// True when there are no stanzas.
    pub fn is_empty(&self) -> bool {
        self.stanzas.is_empty()
    }

    /// Append a stanza. Names are not checked for uniqueness, but an empty
    /// name is rejected.
    pub fn add_stanza(&mut self, stanza: Stanza) -> Result<()> {
        if stanza.name().is_empty() {
            return Err(Error::InvalidStanzaName {
                name: stanza.name().to_string(),
            });
        }
        self.stanzas.push(stanza);
        Ok(())
    }

    /// Copy `replacement`'s attributes and comment into every stanza named
    /// `name`, in place. Returns how many stanzas were replaced.
    pub fn set_stanza(&mut self, name: &str, replacement: &Stanza) -> usize {
        let mut replaced = 0;
        for stanza in self.matching_mut(name) {
            stanza.copy_from(replacement);
            replaced += 1;
        }
        replaced
    }

    /// Remove every stanza named `name`. Returns how many were removed.
    pub fn delete_stanza(&mut self, name: &str) -> usize {
        let before = self.stanzas.len();
        self.stanzas.retain(|stanza| stanza.name() != name);
        before - self.stanzas.len()
    }

    /// First stanza named `name`.
    pub fn get_stanza(&self, name: &str) -> Option<&Stanza> {
        self.stanzas.iter().find(|stanza| stanza.name() == name)
    }

    pub fn get_stanza_mut(&mut self, name: &str) -> Option<&mut Stanza> {
        self.stanzas.iter_mut().find(|stanza| stanza.name() == name)
    }

    pub fn contains_stanza(&self, name: &str) -> bool {
        self.get_stanza(name).is_some()
    }

    /// Set `key` on every stanza named `name`. Returns how many were updated.
    pub fn set_stanza_attr(&mut self, name: &str, key: &str, value: &str) -> usize {
        let mut updated = 0;
        for stanza in self.matching_mut(name) {
            stanza.set_attribute(key, value);
            updated += 1;
        }
        updated
    }

    /// `key` from the first stanza named `name`.
    pub fn get_stanza_attr(&self, name: &str, key: &str) -> Option<&str> {
        self.get_stanza(name)?.get_attribute(key)
    }

    /// Delete `key` from every stanza named `name`. Returns how many stanzas
    /// actually had the key.
    pub fn delete_stanza_attr(&mut self, name: &str, key: &str) -> usize {
        let mut deleted = 0;
        for stanza in self.matching_mut(name) {
            if stanza.delete_attribute(key).is_some() {
                deleted += 1;
            }
        }
        deleted
    }

    /// Drop all stanzas and the document comment. Source path and comment
    /// character are kept.
    pub fn clear(&mut self) {
        self.comment.clear();
        self.stanzas.clear();
    }

    fn matching_mut<'a>(&'a mut self, name: &'a str) -> impl Iterator<Item = &'a mut Stanza> {
        self.stanzas
            .iter_mut()
            .filter(move |stanza| stanza.name() == name)
    }

    /// Render the whole document.
    ///
    /// The document comment comes first, then a blank line, then every
    /// stanza followed by a blank line.
    pub fn format(&self) -> String {
        let comment_char = self.options.comment_char;
        let mut out = String::new();
        write_comment(&mut out, &self.comment, comment_char);
        out.push('\n');
        for stanza in &self.stanzas {
            if stanza.name().is_empty() {
                tracing::warn!("Skipping stanza with an empty name");
                continue;
            }
            out.push_str(&stanza.format(comment_char));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for StanzaDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
