use std::path::PathBuf;

use crate::validation::FieldKind;

/// Why an action expression could not be decoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("empty action payload")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown {command} target: {target}")]
    UnknownTarget { command: String, target: String },
    #[error("`{target}` is missing argument {index}")]
    MissingArgument { target: String, index: usize },
    #[error("`{target}` expects {expected} as argument {index}, got {got}")]
    BadArgument {
        target: String,
        index: usize,
        expected: &'static str,
        got: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("field {field} of '{id}' is not loaded")]
    UnknownField { id: String, field: FieldKind },
}

/// A style or content payload file that could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("cannot read payload '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML payload: {0}")]
    Toml(#[from] toml::de::Error),
}
