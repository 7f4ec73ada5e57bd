use crate::error::TodoError;
use crate::ids::IdStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ids: IdsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdsConfig {
    #[serde(default)]
    pub strategy: IdStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval for the terminal loop, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_true")]
    pub show_hints: bool,
    #[serde(default = "default_true")]
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            show_hints: default_true(),
            mouse: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Where tracing output goes while the screen owns the terminal.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// `<config dir>/todo/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("todo/config.toml"))
}

/// Load configuration.
///
/// With an explicit `path` the file must exist. Without one, the default
/// location is tried and a missing file yields [`Config::default`].
///
/// # Errors
///
/// Returns [`TodoError::ConfigRead`] or [`TodoError::ConfigParse`].
pub fn load_config(path: Option<&Path>) -> Result<Config, TodoError> {
    let path = match path {
        Some(explicit) => explicit.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let content = std::fs::read_to_string(&path).map_err(|source| TodoError::ConfigRead {
        path: path.clone(),
        source,
    })?;

    parse_config(&content).map_err(|source| TodoError::ConfigParse { path, source })
}

/// Parse a config document.
///
/// # Errors
///
/// Returns the TOML error when the document does not fit [`Config`].
pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

const fn default_true() -> bool {
    true
}

const fn default_tick_ms() -> u64 {
    250
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse_config("").expect("parse should succeed");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.ids.strategy, IdStrategy::Clock);
        assert_eq!(cfg.ui.tick_ms, 250);
        assert!(cfg.ui.show_hints);
        assert!(cfg.ui.mouse);
        assert!(cfg.log.file.is_none());
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let cfg = parse_config(
            r#"
[ids]
strategy = "sequence"

[ui]
mouse = false
"#,
        )
        .expect("parse should succeed");
        assert_eq!(cfg.ids.strategy, IdStrategy::Sequence);
        assert!(!cfg.ui.mouse);
        assert!(cfg.ui.show_hints);
        assert_eq!(cfg.ui.tick_ms, 250);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(parse_config("[ids]\nstrategy = \"uuid\"\n").is_err());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[log]\nfile = \"/tmp/todo.log\"\n").expect("write config");

        let cfg = load_config(Some(&path)).expect("load should succeed");
        assert_eq!(cfg.log.file, Some(PathBuf::from("/tmp/todo.log")));
    }

    #[test]
    fn explicit_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigReadError);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui\ntick_ms = ").expect("write config");

        let err = load_config(Some(&path)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigParseError);
        assert!(err.to_string().contains("config.toml"));
    }
}
