use std::path::{Path, PathBuf};

use replay_parser::{LiverDirectory, LiverEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{cli::OutputFormat, error::Result};

const APP_DIR: &str = "replay-index";
const CONFIG_FILE: &str = "config.toml";

/// Extra broadcaster marker from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiverConfig {
    pub marker: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default output format when `--output` is not given.
    pub output: OutputFormat,
    /// Default concurrency for batch classification.
    pub max_concurrent: usize,
    /// Markers appended after the built-in liver table.
    pub livers: Vec<LiverConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Pretty,
            max_concurrent: 8,
            livers: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Default location: `<config dir>/replay-index/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the configuration. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;
        debug!(path = %path.display(), livers = config.livers.len(), "loaded config");
        Ok(config)
    }

    /// The built-in liver table extended with the configured markers.
    pub fn liver_directory(&self) -> LiverDirectory {
        LiverDirectory::with_extra(
            self.livers
                .iter()
                .map(|l| LiverEntry::new(l.marker.clone(), l.name.clone())),
        )
    }

    pub fn show(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_parser::MatchMode;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
output = "json"
max_concurrent = 2

[[livers]]
marker = "【新人录播】"
name = "新人"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.max_concurrent, 2);

        let directory = config.liver_directory();
        assert_eq!(
            directory.resolve("【新人录播】《A》", MatchMode::CaseSensitive),
            Some("新人")
        );
        assert_eq!(
            directory.resolve("【机皇录播】《A》", MatchMode::CaseSensitive),
            Some("机皇")
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"output = "json-compact""#).unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.output, OutputFormat::JsonCompact);
        assert_eq!(config.max_concurrent, 8);
        assert!(config.livers.is_empty());
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_concurrent = \"lots\"").unwrap();
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_show_round_trips() {
        let config = AppConfig {
            livers: vec![LiverConfig {
                marker: "【x】".into(),
                name: "x".into(),
            }],
            ..AppConfig::default()
        };
        let shown = config.show().unwrap();
        assert_eq!(toml::from_str::<AppConfig>(&shown).unwrap(), config);
    }
}
