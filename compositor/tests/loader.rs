use std::fs;

use compositor::error::PayloadError;
use compositor::loader::load_payload;
use storykeep::payload::{ElementPayload, MarkdownPayload};

#[test]
fn json_and_toml_load_the_same_payload() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("p.json");
    let toml = dir.path().join("p.toml");
    fs::write(&json, r#"{ "classes": { "textCOLOR": ["black", "white"] }, "count": 2 }"#).unwrap();
    fs::write(&toml, "count = 2\n\n[classes]\ntextCOLOR = [\"black\", \"white\"]\n").unwrap();

    let from_json: ElementPayload = load_payload(&json).unwrap();
    let from_toml: ElementPayload = load_payload(&toml).unwrap();
    assert_eq!(from_json, from_toml);
}

#[test]
fn errors_name_their_cause() {
    let dir = tempfile::tempdir().unwrap();

    let missing = load_payload::<MarkdownPayload>(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, PayloadError::Io { .. }));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    let err = load_payload::<MarkdownPayload>(&bad).unwrap_err();
    assert!(matches!(err, PayloadError::Json(_)));
}
