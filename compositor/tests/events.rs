use pretty_assertions::assert_eq;

use compositor::Config;
use compositor::events::{Event, EventBatch, EventRecord, EventType, ImpressionEvent, Verb, pre_parse_clicked, pre_parse_impression};
use storykeep::payload::Impression;

fn clicked(source: &str) -> Option<EventRecord> {
    let lexed = storykeep::parser::lex(source, 0);
    pre_parse_clicked("pane-1", &lexed.nodes, &Config::default())
}

fn record(event_type: EventType, verb: Verb, target: &str) -> EventRecord {
    EventRecord {
        id: "pane-1".to_string(),
        event_type,
        verb,
        target_slug: target.to_string(),
    }
}

#[test]
fn page_navigation_is_tracked() {
    assert_eq!(
        clicked("(goto (home))"),
        Some(record(EventType::StoryFragment, Verb::Clicked, "hello"))
    );
    assert_eq!(
        clicked("(goto (storyFragment about))"),
        Some(record(EventType::StoryFragment, Verb::Clicked, "about"))
    );
    assert_eq!(
        clicked("(goto (storyFragmentPane about team))"),
        Some(record(EventType::Pane, Verb::Clicked, "about"))
    );
    assert_eq!(
        clicked("(goto (context privacy))"),
        Some(record(EventType::Pane, Verb::Clicked, "privacy"))
    );
    assert_eq!(
        clicked("(goto (product widget))"),
        Some(record(EventType::Pane, Verb::Clicked, "widget"))
    );
}

#[test]
fn home_uses_configured_slug() {
    let config = Config::from_toml_str("[site]\nhome_slug = \"welcome\"\n").unwrap();
    let lexed = storykeep::parser::lex("(goto (home))", 0);
    let event = pre_parse_clicked("pane-1", &lexed.nodes, &config).unwrap();
    assert_eq!(event.target_slug, "welcome");
}

#[test]
fn video_seeks_are_watched() {
    assert_eq!(
        clicked("(goto (bunny intro 30))"),
        Some(record(EventType::Pane, Verb::Watched, "intro"))
    );
    assert_eq!(
        clicked("(goto (bunnyContext faq 30))"),
        Some(record(EventType::Pane, Verb::Watched, "faq"))
    );
}

#[test]
fn untracked_actions() {
    assert_eq!(clicked("(goto (url https://example.com))"), None);
    assert_eq!(clicked("(goto (concierge profile))"), None);
    assert_eq!(clicked("(goto (storykeep dashboard))"), None);
    assert_eq!(clicked("(goto (nowhere))"), None);
    assert_eq!(clicked(""), None);
}

fn impression(actions_lisp: &str) -> Impression {
    Impression {
        id: "imp-1".to_string(),
        title: "Try the demo".to_string(),
        body: "See it in action.".to_string(),
        button_text: "Go".to_string(),
        actions_lisp: actions_lisp.to_string(),
        parent_id: "pane-9".to_string(),
    }
}

#[test]
fn impression_events() {
    assert_eq!(
        pre_parse_impression(&impression("(goto (storyFragment demo))")),
        Some(ImpressionEvent {
            id: "imp-1".to_string(),
            event_type: EventType::Impression,
            verb: Verb::Clicked,
            parent_id: "pane-9".to_string(),
            target_slug: "demo".to_string(),
            title: "Try the demo".to_string(),
        })
    );
    assert_eq!(
        pre_parse_impression(&impression("(goto (context terms))")).map(|e| e.target_slug),
        Some("terms".to_string())
    );
    assert_eq!(pre_parse_impression(&impression("(goto (url https://example.com))")), None);
    assert_eq!(pre_parse_impression(&impression("(goto (home))")), None);
    assert_eq!(pre_parse_impression(&impression("not an action")), None);
}

#[test]
fn batch_skips_duplicates() {
    let mut batch = EventBatch::new();
    let event = record(EventType::Pane, Verb::Clicked, "about");

    assert!(batch.push(event.clone().into()));
    assert!(!batch.push(event.clone().into()));
    assert!(batch.push(record(EventType::Pane, Verb::Watched, "about").into()));
    assert_eq!(batch.len(), 2);

    let drained = batch.drain();
    assert_eq!(drained[0], Event::Record(event));
    assert!(batch.is_empty());
}

#[test]
fn batch_serializes_for_concierge() {
    let mut batch = EventBatch::new();
    batch.push(record(EventType::StoryFragment, Verb::Clicked, "about").into());
    batch.push(pre_parse_impression(&impression("(goto (storyFragment demo))")).unwrap().into());

    let json: serde_json::Value = serde_json::from_str(&batch.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "events": [
                { "id": "pane-1", "type": "StoryFragment", "verb": "CLICKED", "targetSlug": "about" },
                {
                    "id": "imp-1",
                    "type": "Impression",
                    "verb": "CLICKED",
                    "parentId": "pane-9",
                    "targetSlug": "demo",
                    "title": "Try the demo"
                }
            ]
        })
    );
}
