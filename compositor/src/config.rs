use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Compositor settings, read from a TOML file. Every section is optional.
///
/// ```toml
/// [site]
/// home_slug = "hello"
///
/// [history]
/// max_length = 10
/// debounce_ms = 500
///
/// [fields]
/// title_max = 80
/// slug_max = 50
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub site: SiteConfig,
    pub history: HistoryConfig,
    pub fields: FieldLimits,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Slug of the story fragment served at `/`.
    pub home_slug: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            home_slug: "hello".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum undo entries kept per field.
    pub max_length: usize,
    /// Edits closer together than this collapse into one undo step.
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            max_length: 10,
            debounce_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldLimits {
    pub title_max: usize,
    pub slug_max: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        FieldLimits {
            title_max: 80,
            slug_max: 50,
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_length < 2 {
            return Err(ConfigError::Invalid(format!(
                "history.max_length must be at least 2, got {}",
                self.history.max_length
            )));
        }
        if self.site.home_slug.is_empty() {
            return Err(ConfigError::Invalid("site.home_slug must not be empty".to_string()));
        }
        Ok(())
    }
}
