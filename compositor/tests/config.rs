use std::io::Write;

use pretty_assertions::assert_eq;

use compositor::config::Config;
use compositor::error::ConfigError;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.site.home_slug, "hello");
    assert_eq!(config.history.max_length, 10);
    assert_eq!(config.history.debounce_ms, 500);
    assert_eq!(config.fields.title_max, 80);
    assert_eq!(config.fields.slug_max, 50);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let config = Config::from_toml_str("[history]\ndebounce_ms = 250\n").unwrap();
    assert_eq!(config.history.debounce_ms, 250);
    assert_eq!(config.history.max_length, 10);
    assert_eq!(config.site.home_slug, "hello");
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[site]\nhome_slug = \"start\"\n\n[fields]\ntitle_max = 120").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.site.home_slug, "start");
    assert_eq!(config.fields.title_max, 120);
    assert_eq!(config.fields.slug_max, 50);
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn rejects_unknown_keys() {
    let err = Config::from_toml_str("[history]\nmax_len = 3\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn rejects_tiny_history() {
    let err = Config::from_toml_str("[history]\nmax_length = 1\n").unwrap_err();
    assert_eq!(err.to_string(), "invalid config: history.max_length must be at least 2, got 1");
}
