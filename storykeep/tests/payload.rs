use pretty_assertions::assert_eq;

use storykeep::payload::{ElementPayload, MarkdownPayload, StyleValue};

#[test]
fn element_payload_from_editor_json() {
    let json = r#"{
        "classes": {
            "textCOLOR": ["slate-800", "black"],
            "fontBOLD": [true],
            "mt": [null, 4, "!2"]
        },
        "count": 3,
        "override": { "textCOLOR": [null, ["red-500"]] }
    }"#;
    let payload: ElementPayload = serde_json::from_str(json).unwrap();

    assert_eq!(payload.positions(), 3);
    let keys: Vec<&str> = payload.classes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["textCOLOR", "fontBOLD", "mt"]);
    assert_eq!(
        payload.classes["mt"],
        vec![
            None,
            Some(StyleValue::Number(4.0)),
            Some(StyleValue::Text("!2".to_string()))
        ]
    );
    assert_eq!(payload.overrides["textCOLOR"][0], None);
    assert_eq!(
        payload.overrides["textCOLOR"][1],
        Some(vec![Some(StyleValue::Text("red-500".to_string()))])
    );
}

#[test]
fn markdown_payload_from_toml() {
    let source = r#"
[classes.p]
count = 2
classes = { textSIZE = ["lg", "xl"] }

[buttons.signup]
urlTarget = "signup"
callbackPayload = "(goto (storyFragment join))"
classes = { bgCOLOR = ["blue-600"] }
hover = { bgCOLOR = ["blue-700"] }
"#;
    let payload: MarkdownPayload = toml::from_str(source).unwrap();

    assert_eq!(payload.classes["p"].count, 2);
    assert_eq!(
        payload.classes["p"].classes["textSIZE"],
        vec![
            Some(StyleValue::Text("lg".to_string())),
            Some(StyleValue::Text("xl".to_string()))
        ]
    );
    let button = payload.button_for("signup").unwrap();
    assert_eq!(button.callback_payload, "(goto (storyFragment join))");
    assert!(payload.parent.is_none());
}

#[test]
fn button_lookup_falls_back_to_url_target() {
    let json = r#"{ "buttons": { "b1": { "urlTarget": "pricing" } } }"#;
    let payload: MarkdownPayload = serde_json::from_str(json).unwrap();
    assert!(payload.button_for("pricing").is_some());
    assert!(payload.button_for("b1").is_some());
    assert!(payload.button_for("missing").is_none());
}

#[test]
fn zero_count_means_one_position() {
    assert_eq!(ElementPayload::default().positions(), 1);
}
