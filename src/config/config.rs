use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants::CONFIG_FILE;
use crate::error::{LinearError, LinearResult};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    #[serde(default)]
    pub debug_mode: bool,
}

pub fn config_path() -> LinearResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| LinearError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home_dir.join(CONFIG_FILE))
}

pub fn load_config() -> Config {
    match config_path() {
        Ok(path) => load_config_from(&path),
        Err(_) => Config::default(),
    }
}

/// Missing or unreadable files fall back to defaults.
pub fn load_config_from(path: &Path) -> Config {
    fs::read_to_string(path)
        .ok()
        .and_then(|config_str| serde_json::from_str(&config_str).ok())
        .unwrap_or_default()
}

pub fn save_config(config: &Config) -> LinearResult<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> LinearResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

pub fn get_api_key() -> LinearResult<String> {
    api_key_from(env::var("LINEAR_API_KEY").ok(), &load_config())
}

/// Environment wins over the config file; blank keys count as unset.
pub fn api_key_from(env_key: Option<String>, config: &Config) -> LinearResult<String> {
    env_key
        .into_iter()
        .chain(config.api_key.clone())
        .find(|key| !key.trim().is_empty())
        .ok_or(LinearError::NotConfigured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.json"));
        assert_eq!(config, Config::default());
        assert!(!config.debug_mode);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            api_key: Some("lin_api_test".to_string()),
            debug_mode: true,
        };

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn test_debug_mode_defaults_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "api_key": "lin_api_old" }"#).unwrap();

        let config = load_config_from(&path);
        assert_eq!(config.api_key.as_deref(), Some("lin_api_old"));
        assert!(!config.debug_mode);
    }

    #[test]
    fn test_api_key_precedence() {
        let config = Config {
            api_key: Some("from-file".to_string()),
            debug_mode: false,
        };

        assert_eq!(api_key_from(Some("from-env".to_string()), &config).unwrap(), "from-env");
        assert_eq!(api_key_from(None, &config).unwrap(), "from-file");
        assert_eq!(api_key_from(Some("  ".to_string()), &config).unwrap(), "from-file");
        assert!(matches!(
            api_key_from(None, &Config::default()),
            Err(LinearError::NotConfigured)
        ));
    }
}
