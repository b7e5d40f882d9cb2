use std::borrow::Cow;

use crate::{Tag, tag_ident};

#[test]
fn get_finds_each_key() {
    let tag = Tag::new(r#"json:"outerStr" db:"outer_str""#);

    assert_eq!(tag.get("json"), "outerStr");
    assert_eq!(tag.get("db"), "outer_str");
    assert_eq!(tag.get("yaml"), "");
}

#[test]
fn lookup_distinguishes_empty_from_missing() {
    let tag = Tag::new(r#"json:"" db:"name""#);

    assert_eq!(tag.lookup("json"), Some(Cow::Borrowed("")));
    assert_eq!(tag.lookup("xml"), None);
}

#[test]
fn lookup_tolerates_extra_spaces() {
    let tag = Tag::new(r#"  json:"a"    db:"b""#);

    assert_eq!(tag.get("db"), "b");
}

#[test]
fn lookup_stops_at_malformed_pair() {
    let tag = Tag::new(r#"json:"a" broken db:"b""#);

    assert_eq!(tag.get("json"), "a");
    assert_eq!(tag.lookup("db"), None);
}

#[test]
fn lookup_rejects_unterminated_value() {
    let tag = Tag::new(r#"json:"abc"#);

    assert_eq!(tag.lookup("json"), None);
}

#[test]
fn lookup_resolves_escapes() {
    let tag = Tag::new(r#"note:"say \"hi\"\n" other:"\x41é""#);

    assert_eq!(tag.get("note"), "say \"hi\"\n");
    assert_eq!(tag.get("other"), "Aé");
    assert!(matches!(tag.lookup("note"), Some(Cow::Owned(_))));
}

#[test]
fn empty_tag() {
    assert!(Tag::EMPTY.is_empty());
    assert_eq!(Tag::EMPTY.lookup("json"), None);
    assert_eq!(Tag::default(), Tag::EMPTY);
}

#[test]
fn ident_strips_options() {
    let tag = Tag::new(r#"json:"name,omitempty" db:"-""#);

    assert_eq!(tag.ident("json"), "name");
    assert_eq!(tag.ident("db"), "");
    assert_eq!(tag.ident("missing"), "");
}

#[test]
fn tag_ident_cases() {
    for (expected, value) in [
        ("", ""),
        ("", "-"),
        ("", "-,"),
        ("", "-,blah"),
        ("", "-,blah,"),
        ("", "-,,blah"),
        ("", "-,blah,blah"),
        ("ident", "ident"),
        ("ident", "ident,"),
        ("ident", "ident,blah"),
        ("ident", "ident,blah,"),
        ("ident", "ident,,"),
        ("ident", "ident,,blah"),
        ("ident", "ident,blah,blah"),
    ] {
        assert_eq!(tag_ident(value), expected, "tag_ident({value:?})");
    }
}
