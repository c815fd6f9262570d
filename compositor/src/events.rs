use serde::Serialize;
use storykeep::action::Node;
use storykeep::payload::Impression;
use tracing::debug;

use crate::action::{Action, display_nodes};
use crate::config::Config;

/// What an analytics event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventType {
    StoryFragment,
    Pane,
    Impression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verb {
    Clicked,
    Watched,
}

/// An engagement event in the shape Concierge ingests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// The pane or fragment the interaction happened in.
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub verb: Verb,
    pub target_slug: String,
}

/// A click on an impression's call to action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpressionEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub verb: Verb,
    pub parent_id: String,
    pub target_slug: String,
    pub title: String,
}

/// Project a click on an action into an analytics record. Actions that
/// leave the site or the reading flow are not tracked.
pub fn pre_parse_clicked(id: &str, nodes: &[Node], config: &Config) -> Option<EventRecord> {
    let action = match Action::from_nodes(nodes) {
        Ok(action) => action,
        Err(error) => {
            debug!(%error, payload = %display_nodes(nodes), "click not tracked");
            return None;
        }
    };

    let (event_type, verb, target_slug) = match action {
        Action::Home => (EventType::StoryFragment, Verb::Clicked, config.site.home_slug.clone()),
        Action::StoryFragment(slug) => (EventType::StoryFragment, Verb::Clicked, slug),
        Action::StoryFragmentPane { slug, .. } | Action::Context(slug) | Action::Product(slug) => {
            (EventType::Pane, Verb::Clicked, slug)
        }
        Action::Bunny { slug, .. } | Action::BunnyContext { slug, .. } => (EventType::Pane, Verb::Watched, slug),
        Action::Url(_) | Action::Concierge(_) | Action::StoryKeep(_) => return None,
    };

    Some(EventRecord {
        id: id.to_string(),
        event_type,
        verb,
        target_slug,
    })
}

/// Project an impression's action into the event recorded when its button
/// is clicked. Only actions that land on a page produce one.
pub fn pre_parse_impression(impression: &Impression) -> Option<ImpressionEvent> {
    let action = match Action::parse(&impression.actions_lisp) {
        Ok(action) => action,
        Err(error) => {
            debug!(%error, id = %impression.id, "impression not tracked");
            return None;
        }
    };

    let target_slug = match action {
        Action::StoryFragment(slug)
        | Action::StoryFragmentPane { slug, .. }
        | Action::Context(slug)
        | Action::Product(slug) => slug,
        _ => return None,
    };

    Some(ImpressionEvent {
        id: impression.id.clone(),
        event_type: EventType::Impression,
        verb: Verb::Clicked,
        parent_id: impression.parent_id.clone(),
        target_slug,
        title: impression.title.clone(),
    })
}

/// Either kind of event, as it appears in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Event {
    Record(EventRecord),
    Impression(ImpressionEvent),
}

/// Events accumulated client-side until they are flushed to Concierge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventBatch {
    events: Vec<Event>,
}

impl EventBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event. An identical event already waiting is not queued twice.
    pub fn push(&mut self, event: Event) -> bool {
        if self.events.contains(&event) {
            return false;
        }
        self.events.push(event);
        true
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Take all queued events, leaving the batch empty.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// `{"events":[...]}`
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        Event::Record(record)
    }
}

impl From<ImpressionEvent> for Event {
    fn from(event: ImpressionEvent) -> Self {
        Event::Impression(event)
    }
}
