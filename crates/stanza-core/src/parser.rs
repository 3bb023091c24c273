//! Line-oriented parser for stanza text.
//!
//! One pass, no lookahead. Each line is classified, in priority order, as
//! a comment, a stanza header, a blank line, or an attribute line:
//!
//! ```text
//! * document comment          <- comment before any header
//!
//! * comment for /home         <- comment between stanzas
//! /home:                      <- header opens a stanza
//!        dev = /dev/hd1       <- attribute line, buffered
//!                             <- blank line closes the stanza
//! ```
//!
//! Malformed attribute lines are dropped, never reported.

use indexmap::IndexMap;

use crate::stanza::{DEFAULT_COMMENT_CHAR, Stanza};

/// What to do with a stanza still open when the input ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndOfInput {
    /// Keep it, as if a blank line followed.
    #[default]
    Finalize,
    /// Discard it. Stanza files are supposed to end with a blank line.
    Drop,
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub comment_char: char,
    pub end_of_input: EndOfInput,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            comment_char: DEFAULT_COMMENT_CHAR,
            end_of_input: EndOfInput::default(),
        }
    }
}

impl ParseOptions {
    pub fn with_comment_char(mut self, comment_char: char) -> Self {
        self.comment_char = comment_char;
        self
    }

    pub fn with_end_of_input(mut self, end_of_input: EndOfInput) -> Self {
        self.end_of_input = end_of_input;
        self
    }
}

/// Parser position relative to stanzas.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParserState {
    /// No header seen yet; comments belong to the document.
    NoStanza,
    /// A header was seen and its body is being collected.
    InStanza(String),
    /// The last stanza was closed by a blank line.
    BetweenStanzas,
}

/// Result of parsing: the document comment and the stanzas in source order.
#[derive(Debug, Default)]
pub(crate) struct Parsed {
    pub comment: Vec<String>,
    pub stanzas: Vec<Stanza>,
}

struct Parser {
    options: ParseOptions,
    state: ParserState,
    body: Vec<String>,
    pending_comment: Vec<String>,
    /// Comments seen in an open stanza after its last attribute line.
    trailing_comment: Vec<String>,
    parsed: Parsed,
}

impl Parser {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            state: ParserState::NoStanza,
            body: Vec::new(),
            pending_comment: Vec::new(),
            trailing_comment: Vec::new(),
            parsed: Parsed::default(),
        }
    }

    fn line(&mut self, raw: &str) {
        let line = raw.trim_end();

        if let Some(rest) = line.strip_prefix(self.options.comment_char) {
            let text = rest.trim().to_string();
            match self.state {
                ParserState::NoStanza => self.parsed.comment.push(text),
                ParserState::InStanza(_) => self.trailing_comment.push(text),
                ParserState::BetweenStanzas => self.pending_comment.push(text),
            }
            return;
        }

        if let Some(header) = line.strip_suffix(':') {
            let name = header.trim().trim_end_matches(':').trim_end();
            if name.is_empty() {
                tracing::trace!(line, "Ignoring header without a name");
                return;
            }
            // Comments after the last attribute line introduce the new stanza.
            let carried = std::mem::take(&mut self.trailing_comment);
            self.close();
            self.pending_comment.extend(carried);
            self.state = ParserState::InStanza(name.to_string());
            return;
        }

        if line.trim_start().is_empty() {
            self.close();
            return;
        }

        match self.state {
            ParserState::InStanza(_) => {
                self.pending_comment.append(&mut self.trailing_comment);
                self.body.push(line.to_string());
            }
            ParserState::NoStanza | ParserState::BetweenStanzas => {
                tracing::trace!(line, "Ignoring line outside of a stanza");
            }
        }
    }

    /// Finalize the open stanza, if any.
    fn close(&mut self) {
        let name = match std::mem::replace(&mut self.state, ParserState::BetweenStanzas) {
            ParserState::InStanza(name) => name,
            other => {
                self.state = other;
                return;
            }
        };
        self.pending_comment.append(&mut self.trailing_comment);

        let mut attributes = IndexMap::new();
        for line in self.body.drain(..) {
            match parse_attribute_line(&line) {
                Some((key, value)) => {
                    attributes.insert(key.to_string(), value.to_string());
                }
                None => {
                    tracing::trace!(stanza = %name, line = %line, "Dropping malformed attribute line")
                }
            }
        }

        let mut stanza = Stanza::new(name, attributes);
        for line in self.pending_comment.drain(..) {
            stanza.add_comment(&line);
        }
        self.parsed.stanzas.push(stanza);
    }

    fn finish(mut self) -> Parsed {
        if self.options.end_of_input == EndOfInput::Drop {
            if let ParserState::InStanza(name) = &self.state {
                tracing::trace!(stanza = %name, "Dropping stanza not terminated by a blank line");
            }
            self.state = ParserState::BetweenStanzas;
            self.body.clear();
            self.trailing_comment.clear();
        }
        self.close();
        self.parsed
    }
}

/// Split an attribute line on its first `=` into a trimmed key and value.
///
/// Returns `None` when there is no `=`, or when the key or the value is
/// empty after trimming.
///
/// ```
/// use stanza_core::parser::parse_attribute_line;
///
/// assert_eq!(parse_attribute_line("  dev = /dev/hd1"), Some(("dev", "/dev/hd1")));
/// assert_eq!(parse_attribute_line("options = rw=1"), Some(("options", "rw=1")));
/// assert_eq!(parse_attribute_line("justsometext"), None);
/// ```
pub fn parse_attribute_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

pub(crate) fn parse(text: &str, options: ParseOptions) -> Parsed {
    let mut parser = Parser::new(options);
    for line in text.lines() {
        parser.line(line);
    }
    let parsed = parser.finish();
    tracing::debug!(
        stanzas = parsed.stanzas.len(),
        comment_lines = parsed.comment.len(),
        "Parsed stanza text"
    );
    parsed
}
