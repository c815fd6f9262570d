use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::FieldLimits;

/// Editable pane and fragment fields, named as the editor store names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Title,
    Slug,
    BgColour,
    HeightRatioDesktop,
    HeightRatioTablet,
    HeightRatioMobile,
    HeightOffsetDesktop,
    HeightOffsetTablet,
    HeightOffsetMobile,
    SocialImagePath,
    Markdown,
    IsContextPane,
}

impl FieldKind {
    pub const ALL: [FieldKind; 12] = [
        FieldKind::Title,
        FieldKind::Slug,
        FieldKind::BgColour,
        FieldKind::HeightRatioDesktop,
        FieldKind::HeightRatioTablet,
        FieldKind::HeightRatioMobile,
        FieldKind::HeightOffsetDesktop,
        FieldKind::HeightOffsetTablet,
        FieldKind::HeightOffsetMobile,
        FieldKind::SocialImagePath,
        FieldKind::Markdown,
        FieldKind::IsContextPane,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::Slug => "slug",
            FieldKind::BgColour => "bgColour",
            FieldKind::HeightRatioDesktop => "heightRatioDesktop",
            FieldKind::HeightRatioTablet => "heightRatioTablet",
            FieldKind::HeightRatioMobile => "heightRatioMobile",
            FieldKind::HeightOffsetDesktop => "heightOffsetDesktop",
            FieldKind::HeightOffsetTablet => "heightOffsetTablet",
            FieldKind::HeightOffsetMobile => "heightOffsetMobile",
            FieldKind::SocialImagePath => "socialImagePath",
            FieldKind::Markdown => "markdown",
            FieldKind::IsContextPane => "isContextPane",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// A field value as the editor sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numbers, and text that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Bool(_) => None,
        }
    }
}

/// Keystroke-level check. A value that fails is never stored.
pub fn pre_validate(kind: FieldKind, value: &FieldValue, limits: &FieldLimits) -> bool {
    use FieldKind::*;
    match kind {
        Title => value.as_text().is_some_and(|s| s.chars().count() <= limits.title_max),
        Slug => value.as_text().is_some_and(|s| {
            s.len() <= limits.slug_max
                && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        }),
        BgColour => value.as_text().is_some_and(|s| {
            s.is_empty()
                || s.strip_prefix('#')
                    .is_some_and(|hex| hex.len() <= 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        }),
        HeightRatioDesktop | HeightRatioTablet | HeightRatioMobile => match value {
            FieldValue::Number(_) => true,
            FieldValue::Text(s) => s.is_empty() || s.trim().parse::<f64>().is_ok(),
            FieldValue::Bool(_) => false,
        },
        HeightOffsetDesktop | HeightOffsetTablet | HeightOffsetMobile => matches!(value, FieldValue::Number(_)),
        SocialImagePath | Markdown => value.as_text().is_some(),
        IsContextPane => matches!(value, FieldValue::Bool(_)),
    }
}

/// Whether a stored value may be saved. Failing values are kept but flag
/// the field unclean.
pub fn validate(kind: FieldKind, value: &FieldValue) -> bool {
    use FieldKind::*;
    match kind {
        Title => value.as_text().is_some_and(|s| !s.is_empty()),
        Slug => value
            .as_text()
            .is_some_and(|s| !s.is_empty() && !s.starts_with('-') && !s.ends_with('-')),
        BgColour => value.as_text().is_some_and(|s| {
            s.strip_prefix('#').is_some_and(|hex| {
                matches!(hex.len(), 3 | 6) && hex.bytes().all(|b| b.is_ascii_hexdigit())
            })
        }),
        HeightRatioDesktop | HeightRatioTablet | HeightRatioMobile => {
            value.as_number().is_some_and(|n| (0.0..=100.0).contains(&n))
        }
        HeightOffsetDesktop | HeightOffsetTablet | HeightOffsetMobile => {
            value.as_number().is_some_and(|n| (-100.0..=100.0).contains(&n))
        }
        SocialImagePath => value
            .as_text()
            .is_some_and(|s| s.is_empty() || s.starts_with('/') || s.starts_with("http")),
        Markdown | IsContextPane => true,
    }
}
