use pretty_assertions::assert_eq;

use compositor::config::HistoryConfig;
use compositor::history::HistoryField;

const CONFIG: HistoryConfig = HistoryConfig {
    max_length: 10,
    debounce_ms: 500,
};

fn values(field: &HistoryField<String>) -> Vec<&str> {
    field.history().iter().map(|e| e.value.as_str()).collect()
}

#[test]
fn first_edit_records_the_previous_value() {
    let mut field = HistoryField::new("a".to_string());
    assert!(field.update("b".to_string(), 1_000, &CONFIG));

    assert_eq!(field.current(), "b");
    assert_eq!(field.original(), "a");
    assert_eq!(values(&field), vec!["a"]);
    assert_eq!(field.history()[0].timestamp, 1_000);
}

#[test]
fn unchanged_value_is_a_no_op() {
    let mut field = HistoryField::new("a".to_string());
    assert!(!field.update("a".to_string(), 1_000, &CONFIG));
    assert!(field.history().is_empty());
    assert!(!field.is_unsaved());
}

#[test]
fn rapid_edits_collapse_into_one_step() {
    let mut field = HistoryField::new("h".to_string());
    field.update("he".to_string(), 1_000, &CONFIG);
    field.update("hel".to_string(), 1_100, &CONFIG);
    field.update("hell".to_string(), 1_400, &CONFIG);
    assert_eq!(values(&field), vec!["h"]);

    // Exactly at the debounce window still collapses.
    field.update("hello".to_string(), 1_500, &CONFIG);
    assert_eq!(values(&field), vec!["h"]);

    field.update("hello!".to_string(), 1_501, &CONFIG);
    assert_eq!(values(&field), vec!["h", "hello"]);
}

#[test]
fn undo_walks_back_to_the_baseline() {
    let mut field = HistoryField::new("a".to_string());
    field.update("b".to_string(), 1_000, &CONFIG);
    field.update("c".to_string(), 2_000, &CONFIG);

    assert_eq!(field.undo().map(String::as_str), Some("b"));
    assert_eq!(field.undo().map(String::as_str), Some("a"));
    assert_eq!(field.undo(), None);
    assert_eq!(field.current(), "a");
    assert!(!field.can_undo());
}

#[test]
fn overflow_keeps_the_oldest_baseline() {
    let config = HistoryConfig {
        max_length: 3,
        debounce_ms: 0,
    };
    let mut field = HistoryField::new(0);
    for (i, value) in (1..=5).enumerate() {
        field.update(value, (i as u64 + 1) * 10, &config);
    }

    let kept: Vec<i32> = field.history().iter().map(|e| e.value).collect();
    assert_eq!(kept, vec![0, 3, 4]);
    assert_eq!(*field.current(), 5);
}

#[test]
fn saved_state_tracks_original() {
    let mut field = HistoryField::new("draft".to_string());
    field.update("final".to_string(), 1_000, &CONFIG);
    assert!(field.is_unsaved());

    field.mark_saved();
    assert!(!field.is_unsaved());
    assert_eq!(field.original(), "final");

    field.undo();
    assert!(field.is_unsaved());
}
