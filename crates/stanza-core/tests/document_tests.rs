//! Parsing, editing and formatting whole stanza documents.

use pretty_assertions::assert_eq;
use rstest::rstest;
use stanza_core::{EndOfInput, ParseOptions, Stanza, StanzaDocument};

const FILESYSTEM_TABLE: &str = "\
* filesystem table

/home:
       dev = /dev/hd1
       vfs = jfs2

";

const AIX_FILESYSTEMS: &str = "\
* @(#)filesystems @(#)29 1.22 src/bos/etc/filesystems/filesystems, cmdfs
*
* This version of /etc/filesystems assumes that only the root file system
* is created and ready.

/:
        dev             = /dev/hd4
        vol             = \"root\"
        mount           = automatic
        check           = false
        free            = true
        vfs             = jfs2
        log             = /dev/hd8
        type            = bootfs

* usr file system
/usr:
        dev             = /dev/hd2
        vfs             = jfs2
        log             = /dev/hd8
        mount           = automatic
        check           = false
        type            = bootfs
        vol             = /usr
        free            = false

/nim/spot:
        dev             = /dev/lv01
        vfs             = jfs2
        log             = INLINE
        mount           = true
        options         = rw
        account         = false

";

#[test]
fn test_parse_filesystem_table() {
    let doc = StanzaDocument::parse(FILESYSTEM_TABLE);

    assert_eq!(doc.comment(), ["filesystem table"]);
    assert_eq!(doc.stanza_names(), vec!["/home"]);
    let home = doc.get_stanza("/home").unwrap();
    assert_eq!(
        home.iter().collect::<Vec<_>>(),
        vec![("dev", "/dev/hd1"), ("vfs", "jfs2")]
    );
}

#[test]
fn test_set_attr_then_format() {
    let mut doc = StanzaDocument::parse(FILESYSTEM_TABLE);

    assert_eq!(doc.set_stanza_attr("/home", "dev", "/dev/hd2"), 1);

    assert_eq!(
        doc.format(),
        "* filesystem table\n\n/home:\n       dev = /dev/hd2\n       vfs = jfs2\n\n"
    );
}

#[test]
fn test_format_snapshot() {
    let mut doc = StanzaDocument::parse(FILESYSTEM_TABLE);
    let mut tmp = Stanza::new("/tmp", [("dev", "/dev/hd3"), ("mount", "true")]);
    tmp.add_comment("scratch space");
    doc.add_stanza(tmp).unwrap();

    insta::assert_snapshot!(doc.format(), @r"
* filesystem table

/home:
       dev = /dev/hd1
       vfs = jfs2

* scratch space
/tmp:
       dev = /dev/hd3
       mount = true
");
}

#[test]
fn test_parse_aix_filesystems() {
    let doc = StanzaDocument::parse(AIX_FILESYSTEMS);

    assert_eq!(doc.comment().len(), 4);
    assert_eq!(doc.comment()[1], "");
    assert_eq!(doc.stanza_names(), vec!["/", "/usr", "/nim/spot"]);
    assert_eq!(doc.get_stanza_attr("/", "vol"), Some("\"root\""));
    assert_eq!(doc.get_stanza("/usr").unwrap().comment(), ["usr file system"]);
    assert_eq!(doc.get_stanza_attr("/nim/spot", "dev"), Some("/dev/lv01"));
    assert_eq!(doc.get_stanza("/nim/spot").unwrap().len(), 6);
}

#[test]
fn test_absent_lookups_return_none() {
    let doc = StanzaDocument::parse(AIX_FILESYSTEMS);

    assert_eq!(doc.get_stanza_attr("/nonexistent", "dev"), None);
    assert_eq!(doc.get_stanza_attr("/usr", "nonexistent"), None);
    assert!(doc.get_stanza("/nonexistent").is_none());
    assert!(!doc.contains_stanza("/nonexistent"));
}

#[rstest]
#[case::no_equals("justsometext")]
#[case::empty_value("dev =")]
#[case::empty_key("= /dev/hd1")]
#[case::only_equals("=")]
fn test_malformed_line_dropped(#[case] line: &str) {
    let text = format!("/bad:\n       {line}\n\n/good:\n       dev = /dev/hd1\n\n");
    let doc = StanzaDocument::parse(&text);

    assert_eq!(doc.stanza_names(), vec!["/bad", "/good"]);
    assert!(doc.get_stanza("/bad").unwrap().is_empty());
    assert_eq!(doc.get_stanza_attr("/good", "dev"), Some("/dev/hd1"));
}

#[test]
fn test_value_keeps_later_equals_signs() {
    let doc = StanzaDocument::parse("/a:\n       options = rw,uid=0\n\n");
    assert_eq!(doc.get_stanza_attr("/a", "options"), Some("rw,uid=0"));
}

#[test]
fn test_empty_value_does_not_survive_reparse() {
    let mut doc = StanzaDocument::parse(FILESYSTEM_TABLE);
    assert_eq!(doc.set_stanza_attr("/home", "options", ""), 1);
    assert_eq!(doc.get_stanza_attr("/home", "options"), Some(""));

    let text = doc.format();
    assert!(text.contains("       options = \n"));

    let reparsed = StanzaDocument::parse(&text);
    assert_eq!(reparsed.get_stanza_attr("/home", "options"), None);
    assert_eq!(reparsed.get_stanza_attr("/home", "dev"), Some("/dev/hd1"));
}

#[test]
fn test_dangling_stanza_finalized_by_default() {
    let doc = StanzaDocument::parse("/home:\n       dev = /dev/hd1");
    assert_eq!(doc.get_stanza_attr("/home", "dev"), Some("/dev/hd1"));
}

#[test]
fn test_dangling_stanza_dropped_when_requested() {
    let options = ParseOptions::default().with_end_of_input(EndOfInput::Drop);

    let doc = StanzaDocument::parse_with("/a:\n k = 1\n\n/home:\n       dev = /dev/hd1\n", options);
    assert_eq!(doc.stanza_names(), vec!["/a"]);

    let doc = StanzaDocument::parse_with("/a:\n k = 1\n\n", options);
    assert_eq!(doc.stanza_names(), vec!["/a"]);
}

#[test]
fn test_reformat_is_idempotent() {
    let doc = StanzaDocument::parse(AIX_FILESYSTEMS);
    assert_eq!(doc.format(), doc.format());

    let reparsed = StanzaDocument::parse(&doc.format());
    assert_eq!(reparsed.format(), doc.format());
}

#[test]
fn test_comment_char_applies_to_parse_and_format() {
    let text = "# hosts\n\nlocal:\n       addr = 127.0.0.1\n\n";
    let mut doc = StanzaDocument::parse_with(text, ParseOptions::default().with_comment_char('#'));

    assert_eq!(doc.comment(), ["hosts"]);
    assert_eq!(doc.format(), text);

    doc.set_comment_char(';');
    assert!(doc.format().starts_with("; hosts\n"));
}

#[test]
fn test_merge_into_document_stanza() {
    let mut doc = StanzaDocument::parse(FILESYSTEM_TABLE);
    let extra = Stanza::new("defaults", [("vfs", "jfs"), ("mount", "true")]);

    doc.get_stanza_mut("/home").unwrap().merge(&extra);

    assert_eq!(
        doc.get_stanza("/home").unwrap().attribute_names(),
        vec!["dev", "vfs", "mount"]
    );
    assert_eq!(doc.get_stanza_attr("/home", "vfs"), Some("jfs"));
}

#[test]
fn test_delete_stanza_attr_and_stanza() {
    let mut doc = StanzaDocument::parse(AIX_FILESYSTEMS);

    assert_eq!(doc.delete_stanza_attr("/usr", "free"), 1);
    assert_eq!(doc.get_stanza_attr("/usr", "free"), None);
    assert_eq!(doc.delete_stanza("/nim/spot"), 1);
    assert_eq!(doc.delete_stanza("/nim/spot"), 0);
    assert_eq!(doc.stanza_names(), vec!["/", "/usr"]);
}
