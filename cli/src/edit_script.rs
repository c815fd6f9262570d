use std::path::Path;

use serde::{Deserialize, Serialize};

use compositor::error::SessionError;
use compositor::session::FieldSnapshot;
use compositor::validation::{FieldKind, FieldValue};
use compositor::{Config, EditOutcome, EditSession};

/// A scripted editing session.
///
/// ```toml
/// [[field]]
/// id = "pane-1"
/// field = "title"
/// value = "Welcome"
///
/// [[step]]
/// id = "pane-1"
/// field = "title"
/// at = 1000
/// value = "Welcome back"
///
/// [[step]]
/// id = "pane-1"
/// field = "title"
/// undo = true
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EditScript {
    #[serde(default)]
    field: Vec<FieldInit>,
    #[serde(default)]
    step: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldInit {
    id: String,
    field: FieldKind,
    value: FieldValue,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Step {
    id: String,
    field: FieldKind,
    /// Milliseconds since the session started.
    #[serde(default)]
    at: u64,
    #[serde(default)]
    value: Option<FieldValue>,
    #[serde(default)]
    undo: bool,
    /// Mark every field of `id` saved after this step.
    #[serde(default)]
    save: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum StepReport {
    Edit { outcome: EditOutcome },
    Undo { restored: Option<FieldValue> },
    Save,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub steps: Vec<StepReport>,
    pub fields: Vec<FieldSnapshot>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("cannot read edit script: {0}")]
    Read(#[source] std::io::Error),
    #[error("invalid edit script: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("step {0} has neither a value, undo nor save")]
    EmptyStep(usize),
}

pub fn run(path: &Path, config: &Config) -> Result<Report, ScriptError> {
    let source = std::fs::read_to_string(path).map_err(ScriptError::Read)?;
    let script: EditScript = toml::from_str(&source)?;

    let mut session = EditSession::new(config.clone());
    for init in script.field {
        session.load(init.id, init.field, init.value);
    }

    let mut steps = Vec::new();
    for (index, step) in script.step.into_iter().enumerate() {
        if let Some(value) = step.value {
            let outcome = session.handle_edit(&step.id, step.field, value, step.at)?;
            steps.push(StepReport::Edit { outcome });
        } else if step.undo {
            let restored = session.undo(&step.id, step.field)?;
            steps.push(StepReport::Undo { restored });
        } else if !step.save {
            return Err(ScriptError::EmptyStep(index + 1));
        }

        if step.save {
            session.mark_saved(&step.id);
            steps.push(StepReport::Save);
        }
    }

    Ok(Report {
        steps,
        fields: session.snapshot(),
    })
}
