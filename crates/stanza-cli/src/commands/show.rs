//! Read-only commands

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use stanza_core::{ParseOptions, StanzaDocument};
use stanza_fs::FileStore;

use crate::error::{CliError, Result};

/// Print the whole document as it would be written back.
pub fn run_show(
    store: &impl FileStore,
    file: &Path,
    options: ParseOptions,
    out: &mut impl Write,
) -> Result<()> {
    let doc = StanzaDocument::open_with(store, file, options)?;
    write!(out, "{doc}")?;
    Ok(())
}

/// Print stanza names, one per line.
pub fn run_list(
    store: &impl FileStore,
    file: &Path,
    options: ParseOptions,
    out: &mut impl Write,
) -> Result<()> {
    let doc = StanzaDocument::open_with(store, file, options)?;
    for name in doc.stanza_names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Print one attribute value, or the first stanza named `stanza`.
pub fn run_get(
    store: &impl FileStore,
    file: &Path,
    options: ParseOptions,
    stanza: &str,
    attr: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let doc = StanzaDocument::open_with(store, file, options)?;
    let found = doc.get_stanza(stanza).ok_or_else(|| {
        CliError::user(format!("Stanza '{}' not found in {}", stanza, file.display()))
    })?;

    match attr {
        Some(attr) => {
            let value = found.get_attribute(attr).ok_or_else(|| {
                CliError::user(format!("Attribute '{attr}' not set in stanza '{stanza}'"))
            })?;
            writeln!(out, "{value}")?;
        }
        None => write!(out, "{}", found.format(doc.comment_char()))?,
    }
    Ok(())
}

/// Write the reformatted document to `dest`.
pub fn run_copy(
    store: &impl FileStore,
    file: &Path,
    dest: &Path,
    options: ParseOptions,
) -> Result<()> {
    let doc = StanzaDocument::open_with(store, file, options)?;
    doc.write_to(store, dest)?;
    eprintln!(
        "{} {} stanzas to {}",
        "Copied".green().bold(),
        doc.len(),
        dest.display().to_string().cyan()
    );
    Ok(())
}
