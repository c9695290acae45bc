//! Optional TOML configuration, read from the platform config directory.
//!
//! Every field is optional; a missing file is an empty config. CLI flags
//! override anything set here.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend root, e.g. `http://localhost:5000`.
    pub base_url: Option<String>,
    /// Wire name of the bot selected at startup ("business" or "healthcare").
    pub default_bot: Option<String>,
    /// UI theme name ("dark" or "light").
    pub theme: Option<String>,
    /// Transcript log destination; logging stays off without one.
    pub log_file: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        let proj_dirs =
            ProjectDirs::from("io", "duobot", "duobot").expect("no home directory available");
        proj_dirs.config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_path(&dir.path().join("config.toml")).unwrap();
        assert!(config.base_url.is_none());
        assert!(config.default_bot.is_none());
        assert!(config.theme.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn fields_parse_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "base_url = \"http://qa.internal:5000\"\ndefault_bot = \"healthcare\"\ntheme = \"light\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://qa.internal:5000"));
        assert_eq!(config.default_bot.as_deref(), Some("healthcare"));
        assert_eq!(config.theme.as_deref(), Some("light"));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [not toml").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }
}
