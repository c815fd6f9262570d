use serde::Serialize;
use storykeep::action::format_number;
use storykeep::payload::{ButtonPayload, ElementPayload, ModalPayload, ParentPayload, StyleRecord, StyleValue, Tuple};
use tracing::{debug, warn};

use crate::registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop];

    fn index(self) -> usize {
        match self {
            Breakpoint::Mobile => 0,
            Breakpoint::Tablet => 1,
            Breakpoint::Desktop => 2,
        }
    }
}

/// Classes for one rendered element at each breakpoint, plus the combined
/// responsive list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReducedClasses {
    pub mobile: Vec<String>,
    pub tablet: Vec<String>,
    pub desktop: Vec<String>,
    /// Mobile classes, then `md:` tablet differences, then `xl:` desktop
    /// differences. Never contains a duplicate.
    pub all: Vec<String>,
}

impl ReducedClasses {
    pub fn from_breakpoints(mobile: Vec<String>, tablet: Vec<String>, desktop: Vec<String>) -> Self {
        let mut all = Vec::with_capacity(mobile.len());
        for class in &mobile {
            push_unique(&mut all, class.clone());
        }
        for class in tablet.iter().filter(|c| !mobile.contains(c)) {
            push_unique(&mut all, format!("md:{}", class));
        }
        for class in desktop.iter().filter(|c| !mobile.contains(c) && !tablet.contains(c)) {
            push_unique(&mut all, format!("xl:{}", class));
        }
        ReducedClasses {
            mobile,
            tablet,
            desktop,
            all,
        }
    }

    pub fn at(&self, breakpoint: Breakpoint) -> &[String] {
        match breakpoint {
            Breakpoint::Mobile => &self.mobile,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Desktop => &self.desktop,
        }
    }

    pub fn class_string(&self, breakpoint: Breakpoint) -> String {
        self.at(breakpoint).join(" ")
    }

    pub fn all_string(&self) -> String {
        self.all.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Button classes: the resting state plus `hover:` variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ButtonClasses {
    pub base: ReducedClasses,
    pub hover: ReducedClasses,
}

impl ButtonClasses {
    pub fn all(&self) -> Vec<String> {
        let mut out = self.base.all.clone();
        for class in &self.hover.all {
            push_unique(&mut out, class.clone());
        }
        out
    }

    pub fn all_string(&self) -> String {
        self.all().join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalClasses {
    pub classes: ReducedClasses,
    pub zoom_factor: f64,
    pub padding_left: f64,
    pub padding_top: f64,
}

// ---------------------------------------------------------------------------
// Reducers
// ---------------------------------------------------------------------------

/// Reduce an element payload into one result per rendered position.
pub fn reduce_element(payload: &ElementPayload) -> Vec<ReducedClasses> {
    (0..payload.positions())
        .map(|position| {
            reduce_record_with(&payload.classes, |selector| {
                payload
                    .overrides
                    .get(selector)
                    .and_then(|per_position| per_position.get(position))
                    .and_then(Option::as_ref)
            })
        })
        .collect()
}

/// Reduce wrapper classes, outermost wrapper first.
pub fn reduce_parent(payload: &ParentPayload) -> Vec<ReducedClasses> {
    payload.classes.iter().map(reduce_record).collect()
}

pub fn reduce_modal(payload: &ModalPayload) -> ModalClasses {
    ModalClasses {
        classes: reduce_record(&payload.classes),
        zoom_factor: payload.zoom_factor,
        padding_left: payload.padding_left,
        padding_top: payload.padding_top,
    }
}

pub fn reduce_button(payload: &ButtonPayload) -> ButtonClasses {
    let hover = reduce_record(&payload.hover);
    let hover = ReducedClasses {
        mobile: hover.mobile.iter().map(|c| hoverize(c)).collect(),
        tablet: hover.tablet.iter().map(|c| hoverize(c)).collect(),
        desktop: hover.desktop.iter().map(|c| hoverize(c)).collect(),
        all: hover.all.iter().map(|c| hoverize(c)).collect(),
    };
    ButtonClasses {
        base: reduce_record(&payload.classes),
        hover,
    }
}

/// Reduce a single style record at a single position.
pub fn reduce_record(record: &StyleRecord) -> ReducedClasses {
    reduce_record_with(record, |_| None)
}

fn reduce_record_with<'a>(record: &'a StyleRecord, override_for: impl Fn(&str) -> Option<&'a Tuple>) -> ReducedClasses {
    let mut per_breakpoint: [Vec<String>; 3] = Default::default();

    for (selector, tuple) in record {
        let tuple = override_for(selector.as_str()).unwrap_or(tuple);
        apply_tuple(selector, tuple, &mut per_breakpoint);
    }

    let [mobile, tablet, desktop] = per_breakpoint;
    ReducedClasses::from_breakpoints(mobile, tablet, desktop)
}

fn apply_tuple(selector: &str, tuple: &Tuple, per_breakpoint: &mut [Vec<String>; 3]) {
    for breakpoint in Breakpoint::ALL {
        if let Some(value) = tuple_value(tuple, breakpoint) {
            if let Some(class) = class_for(selector, value) {
                push_unique(&mut per_breakpoint[breakpoint.index()], class);
            }
        }
    }
}

/// The tuple cell that applies at `breakpoint`. Short tuples fall back
/// desktop → tablet → mobile.
pub fn tuple_value(tuple: &Tuple, breakpoint: Breakpoint) -> Option<&StyleValue> {
    let last = tuple.len().checked_sub(1)?;
    tuple[breakpoint.index().min(last)].as_ref()
}

/// The class one selector/value pair produces, if any.
pub fn class_for(selector: &str, value: &StyleValue) -> Option<String> {
    match value {
        StyleValue::Bool(true) => Some(bare_class(selector)),
        StyleValue::Bool(false) => None,
        StyleValue::Number(n) if *n < 0.0 => Some(negative_class(selector, &format_number(-n))),
        StyleValue::Number(n) => Some(value_class(selector, &format_number(*n))),
        StyleValue::Text(s) => match s.as_str() {
            "true" => Some(bare_class(selector)),
            "" | "false" => None,
            _ => match s.strip_prefix('!') {
                Some(rest) if !rest.is_empty() => Some(negative_class(selector, rest)),
                Some(_) => None,
                None => Some(value_class(selector, s)),
            },
        },
    }
}

fn bare_class(selector: &str) -> String {
    match registry::lookup(selector) {
        Some(entry) => entry.class.to_string(),
        None => selector.to_string(),
    }
}

fn value_class(selector: &str, value: &str) -> String {
    match registry::lookup(selector) {
        Some(entry) if entry.literal => value.to_string(),
        Some(entry) => format!("{}-{}", entry.class, value),
        None => {
            debug!(selector, value, "unregistered selector; value used as the class");
            value.to_string()
        }
    }
}

fn negative_class(selector: &str, value: &str) -> String {
    match registry::lookup(selector) {
        Some(entry) if entry.negative => format!("-{}-{}", entry.class, value),
        Some(_) => {
            warn!(selector, value, "selector has no negative utilities; using the positive value");
            value_class(selector, value)
        }
        None => {
            debug!(selector, value, "unregistered selector; value used as the class");
            format!("-{}", value)
        }
    }
}

fn hoverize(class: &str) -> String {
    for prefix in ["md:", "xl:"] {
        if let Some(rest) = class.strip_prefix(prefix) {
            return format!("{}hover:{}", prefix, rest);
        }
    }
    format!("hover:{}", class)
}

fn push_unique(classes: &mut Vec<String>, class: String) {
    if !classes.contains(&class) {
        classes.push(class);
    }
}
