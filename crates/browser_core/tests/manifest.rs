use browser_core::{parse_manifest, ErrorKind, WebsiteEntry};
use pretty_assertions::assert_eq;

#[test]
fn entries_keep_input_order() {
    let entries =
        parse_manifest(r#"[{"name":"A","url":"http://a"},{"name":"B","url":"http://b"}]"#)
            .expect("valid manifest");

    assert_eq!(
        entries,
        vec![
            WebsiteEntry::new("A", "http://a"),
            WebsiteEntry::new("B", "http://b"),
        ]
    );
}

#[test]
fn names_and_urls_are_trimmed() {
    let entries = parse_manifest(r#"[{"name":"  BCIT ","url":" https://bcit.ca\n"}]"#).unwrap();
    assert_eq!(entries[0].name(), "BCIT");
    assert_eq!(entries[0].url(), "https://bcit.ca");
    assert_eq!(entries[0].parsed_url().unwrap().host_str(), Some("bcit.ca"));
}

#[test]
fn missing_url_fails_whole_batch() {
    let err = parse_manifest(r#"[{"name":"A","url":"http://a"},{"name":"B"}]"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedInput);
    assert_eq!(err.message, "Unable to parse content from the source URL.");
}

#[test]
fn missing_name_is_malformed() {
    let err = parse_manifest(r#"[{"url":"http://a"}]"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedInput);
}

#[test]
fn non_array_content_is_malformed() {
    for text in ["", "not json", r#"{"name":"A","url":"http://a"}"#, "[1, 2]"] {
        let err = parse_manifest(text).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedInput, "input {text:?}");
    }
}

#[test]
fn array_record_is_not_read_as_an_object() {
    let err = parse_manifest(r#"[{"name":"A","url":"http://a"},["B","http://b"]]"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedInput);
    assert_eq!(err.message, "Record 1 is not an object.");

    let err = parse_manifest(r#"[["A","http://a"]]"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedInput);
}

#[test]
fn null_url_is_malformed() {
    let err = parse_manifest(r#"[{"name":"A","url":null}]"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedInput);
}

#[test]
fn scalar_values_are_rendered_as_text() {
    let entries = parse_manifest(r#"[{"name":42,"url":"http://a","extra":[1]}]"#).unwrap();
    assert_eq!(entries, vec![WebsiteEntry::new("42", "http://a")]);

    let err = parse_manifest(r#"[{"name":{"x":1},"url":"http://a"}]"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedInput);
}

#[test]
fn empty_array_parses_to_no_entries() {
    assert!(parse_manifest("[]").unwrap().is_empty());
}

#[test]
fn unparsable_entry_url_is_still_kept() {
    let entries = parse_manifest(r#"[{"name":"Local","url":"not a url"}]"#).unwrap();
    assert_eq!(entries[0].url(), "not a url");
    assert!(entries[0].parsed_url().is_err());
}
