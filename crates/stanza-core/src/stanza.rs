//! A single named paragraph of attributes.
//!
//! ```text
//! * comment attached to the stanza
//! /home:
//!        dev = /dev/hd1
//!        vfs = jfs2
//! ```

use std::fmt;

use indexmap::IndexMap;

/// Comment character used when none is configured.
pub const DEFAULT_COMMENT_CHAR: char = '*';

/// Indentation in front of every attribute line.
const ATTRIBUTE_INDENT: &str = "       ";

/// A named, ordered set of attributes with an attached comment block.
///
/// The name is stored without the trailing `:` of the text format, and
/// comment lines are stored without the comment character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stanza {
    name: String,
    attributes: IndexMap<String, String>,
    comment: Vec<String>,
}

impl Stanza {
    /// Create a stanza from a name and attribute pairs, kept in the given order.
    ///
    /// ```
    /// use stanza_core::Stanza;
    ///
    /// let home = Stanza::new("/home", [("dev", "/dev/hd1"), ("vfs", "jfs2")]);
    /// assert_eq!(home.get_attribute("vfs"), Some("jfs2"));
    /// ```
    pub fn new<I, K, V>(name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: normalize_name(name.into()),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            comment: Vec::new(),
        }
    }

    /// A stanza with a name and no attributes.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, std::iter::empty::<(String, String)>())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the stanza. Surrounding whitespace and trailing `:` are removed.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = normalize_name(name.into());
    }

    /// Comment lines, without the comment character.
    pub fn comment(&self) -> &[String] {
        &self.comment
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Replace attributes and comment with copies of `other`'s.
    ///
    /// The name is kept. Keys that `other` does not have are gone afterwards.
    pub fn copy_from(&mut self, other: &Stanza) {
        self.attributes.clone_from(&other.attributes);
        self.comment.clone_from(&other.comment);
    }

    /// Append comment text. Multi-line text adds one entry per line.
    pub fn add_comment(&mut self, text: &str) {
        if text.is_empty() {
            self.comment.push(String::new());
        } else {
            self.comment.extend(text.lines().map(str::to_string));
        }
    }

    pub fn clear_comment(&mut self) {
        self.comment.clear();
    }

    /// Insert or update an attribute. An existing key keeps its position.
    ///
    /// An empty value is kept in memory but is not written back: the
    /// formatted `key = ` line is dropped when the text is parsed again.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Remove an attribute, keeping the order of the others. Returns the old value.
    pub fn delete_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    pub fn attribute_values(&self) -> Vec<&str> {
        self.attributes.values().map(String::as_str).collect()
    }

    /// Iterate `(key, value)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Merge `other` into this stanza.
    ///
    /// `other` wins on key collisions; existing keys keep their position and
    /// new keys are appended. Comments are concatenated.
    pub fn merge(&mut self, other: &Stanza) {
        for (key, value) in &other.attributes {
            self.attributes.insert(key.clone(), value.clone());
        }
        self.comment.extend(other.comment.iter().cloned());
    }

    /// True when there are no attributes. Name and comment are ignored.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Drop attributes and comment and reset the name to empty.
    pub fn clear(&mut self) {
        self.attributes.clear();
        self.name.clear();
        self.comment.clear();
    }

    /// Render the stanza block, comment lines prefixed with `comment_char`.
    pub fn format(&self, comment_char: char) -> String {
        let mut out = String::new();
        write_comment(&mut out, &self.comment, comment_char);
        out.push_str(&self.name);
        out.push_str(":\n");
        for (key, value) in &self.attributes {
            out.push_str(ATTRIBUTE_INDENT);
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(value.trim_end_matches('\n'));
            out.push('\n');
        }
        out
    }
}

/// Stored form of a stanza name: trimmed, without the `:` delimiter.
fn normalize_name(name: String) -> String {
    let trimmed = name.trim().trim_end_matches(':').trim_end();
    if trimmed.len() == name.len() {
        name
    } else {
        trimmed.to_string()
    }
}

/// Write comment lines as `<cc> <line>`, or a bare `<cc>` for empty lines.
pub(crate) fn write_comment(out: &mut String, lines: &[String], comment_char: char) {
    for line in lines {
        out.push(comment_char);
        if !line.is_empty() {
            out.push(' ');
            out.push_str(line);
        }
        out.push('\n');
    }
}

impl fmt::Display for Stanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_COMMENT_CHAR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn home() -> Stanza {
        Stanza::new(
            "/home",
            [("dev", "/dev/hd1"), ("mount", "true"), ("vfs", "jfs2")],
        )
    }

    #[test]
    fn test_set_attribute_keeps_position() {
        let mut s = home();
        s.set_attribute("dev", "/dev/hd1");
        s.set_attribute("dev", "/dev/hd2");

        assert_eq!(s.attribute_names(), vec!["dev", "mount", "vfs"]);
        assert_eq!(s.get_attribute("dev"), Some("/dev/hd2"));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_set_attribute_appends_new_key() {
        let mut s = home();
        s.set_attribute("check", "false");
        assert_eq!(s.attribute_names(), vec!["dev", "mount", "vfs", "check"]);
    }

    #[test]
    fn test_delete_attribute_preserves_order() {
        let mut s = home();
        assert_eq!(s.delete_attribute("dev").as_deref(), Some("/dev/hd1"));
        assert_eq!(s.delete_attribute("dev"), None);
        assert_eq!(s.attribute_values(), vec!["true", "jfs2"]);
    }

    #[test]
    fn test_absent_and_empty_values_are_distinct() {
        let mut s = home();
        s.set_attribute("options", "");
        assert_eq!(s.get_attribute("options"), Some(""));
        assert_eq!(s.get_attribute("log"), None);
        assert!(s.has_attribute("options"));
        assert!(!s.has_attribute("log"));
    }

    #[test]
    fn test_merge_other_wins_and_appends() {
        let mut a = Stanza::new("a", [("a", "1"), ("b", "2")]);
        a.add_comment("first");
        let mut b = Stanza::new("b", [("a", "2"), ("c", "3")]);
        b.add_comment("second");

        a.merge(&b);

        assert_eq!(a.name(), "a");
        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            vec![("a", "2"), ("b", "2"), ("c", "3")]
        );
        assert_eq!(a.comment(), ["first", "second"]);
    }

    #[test]
    fn test_copy_from_drops_residual_keys() {
        let mut a = home();
        a.add_comment("old");
        let mut b = Stanza::new("/usr", [("dev", "/dev/hd2")]);
        b.add_comment("new");

        a.copy_from(&b);

        assert_eq!(a.name(), "/home");
        assert_eq!(a.attribute_names(), vec!["dev"]);
        assert_eq!(a.get_attribute("dev"), Some("/dev/hd2"));
        assert_eq!(a.comment(), ["new"]);
    }

    #[test]
    fn test_add_comment_is_cumulative() {
        let mut s = home();
        s.add_comment("line 1");
        s.add_comment("line 1");
        s.add_comment("line 2\nline 3");
        assert_eq!(s.comment(), ["line 1", "line 1", "line 2", "line 3"]);

        s.clear_comment();
        assert!(s.comment().is_empty());
    }

    #[test]
    fn test_is_empty_ignores_name_and_comment() {
        let mut s = Stanza::named("/tmp");
        s.add_comment("scratch");
        assert!(s.is_empty());
        s.set_attribute("dev", "/dev/hd3");
        assert!(!s.is_empty());
    }

    #[test]
    fn test_name_drops_colon_delimiter() {
        let mut s = Stanza::named(" /tmp: ");
        assert_eq!(s.name(), "/tmp");

        s.set_name("/var::");
        assert_eq!(s.name(), "/var");
        assert_eq!(s.format('*'), "/var:\n");
    }

    #[test]
    fn test_clear() {
        let mut s = home();
        s.add_comment("c");
        s.clear();
        assert_eq!(s, Stanza::default());
    }

    #[test]
    fn test_format_layout() {
        let mut s = Stanza::new("/home", [("dev", "/dev/hd1"), ("vfs", "jfs2")]);
        s.add_comment("home directories");
        s.add_comment("");

        assert_eq!(
            s.format('#'),
            "# home directories\n#\n/home:\n       dev = /dev/hd1\n       vfs = jfs2\n"
        );
        assert_eq!(
            s.to_string(),
            "* home directories\n*\n/home:\n       dev = /dev/hd1\n       vfs = jfs2\n"
        );
    }
}
