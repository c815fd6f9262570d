use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::PayloadError;

/// Load a payload from a `.json` file; anything else is read as TOML.
pub fn load_payload<T: DeserializeOwned>(path: &Path) -> Result<T, PayloadError> {
    let source = std::fs::read_to_string(path).map_err(|source| PayloadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "json") {
        Ok(serde_json::from_str(&source)?)
    } else {
        Ok(toml::from_str(&source)?)
    }
}
