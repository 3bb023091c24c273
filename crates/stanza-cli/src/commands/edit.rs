//! Commands that modify a stanza file

use std::path::Path;

use colored::Colorize;
use stanza_core::{ParseOptions, Stanza, StanzaDocument, parser::parse_attribute_line};
use stanza_fs::FileStore;

use crate::error::{CliError, Result};

/// Write `doc` to `output` when given, else back to the file it came from.
fn save(store: &impl FileStore, doc: &StanzaDocument, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => doc.write_to(store, path)?,
        None => doc.write(store)?,
    }
    Ok(())
}

fn report(action: &str, count: usize, stanza: &str) {
    if count == 0 {
        eprintln!(
            "{} no stanza named '{}'",
            "warning:".yellow().bold(),
            stanza
        );
    } else {
        eprintln!("{} {} in {} stanza(s)", action.green().bold(), stanza.cyan(), count);
    }
}

/// Set `attr = value` on every stanza named `stanza`.
pub fn run_set(
    store: &impl FileStore,
    file: &Path,
    options: ParseOptions,
    stanza: &str,
    attr: &str,
    value: &str,
    output: Option<&Path>,
) -> Result<()> {
    let mut doc = StanzaDocument::open_with(store, file, options)?;
    let count = doc.set_stanza_attr(stanza, attr, value);
    tracing::debug!(stanza, attr, value, count, "Set attribute");
    if count == 0 {
        report("Set", 0, stanza);
        return Ok(());
    }
    save(store, &doc, output)?;
    report("Set", count, stanza);
    Ok(())
}

/// Delete `attr` from every stanza named `stanza`.
pub fn run_unset(
    store: &impl FileStore,
    file: &Path,
    options: ParseOptions,
    stanza: &str,
    attr: &str,
    output: Option<&Path>,
) -> Result<()> {
    let mut doc = StanzaDocument::open_with(store, file, options)?;
    if !doc.contains_stanza(stanza) {
        report("Unset", 0, stanza);
        return Ok(());
    }
    let count = doc.delete_stanza_attr(stanza, attr);
    tracing::debug!(stanza, attr, count, "Deleted attribute");
    save(store, &doc, output)?;
    eprintln!(
        "{} {} from {} stanza(s)",
        "Unset".green().bold(),
        attr.cyan(),
        count
    );
    Ok(())
}

/// Append a stanza built from `key=value` arguments.
pub fn run_add(
    store: &impl FileStore,
    file: &Path,
    options: ParseOptions,
    stanza: &str,
    attrs: &[String],
    comment: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let mut new_stanza = Stanza::named(stanza);
    if new_stanza.name().is_empty() {
        return Err(CliError::user("Stanza name must not be empty"));
    }
    for arg in attrs {
        let (key, value) = parse_attribute_line(arg)
            .ok_or_else(|| CliError::user(format!("Expected key=value, got '{arg}'")))?;
        new_stanza.set_attribute(key, value);
    }
    for line in comment {
        new_stanza.add_comment(line);
    }

    let mut doc = StanzaDocument::open_with(store, file, options)?;
    let name = new_stanza.name().to_string();
    if doc.contains_stanza(&name) {
        eprintln!(
            "{} a stanza named '{}' already exists; adding another",
            "warning:".yellow().bold(),
            name
        );
    }
    doc.add_stanza(new_stanza)?;
    save(store, &doc, output)?;
    eprintln!("{} {}", "Added".green().bold(), name.cyan());
    Ok(())
}

/// Remove every stanza named `stanza`.
pub fn run_remove(
    store: &impl FileStore,
    file: &Path,
    options: ParseOptions,
    stanza: &str,
    output: Option<&Path>,
) -> Result<()> {
    let mut doc = StanzaDocument::open_with(store, file, options)?;
    let count = doc.delete_stanza(stanza);
    tracing::debug!(stanza, count, "Deleted stanza");
    if count == 0 {
        report("Removed", 0, stanza);
        return Ok(());
    }
    save(store, &doc, output)?;
    report("Removed", count, stanza);
    Ok(())
}
