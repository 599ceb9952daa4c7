//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use notes_core::storage::DEFAULT_STORAGE_PREFIX;
use notes_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";
const APP_DIR_NAME: &str = "simple-notes";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "SIMPLE_NOTES_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub storage_prefix: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            data_dir: None,
            storage_prefix: None,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Data directory: explicit flag, then environment, then config, then default.
    pub fn resolve_data_dir(&self, explicit: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
        if let Some(path) = explicit {
            return path;
        }
        if let Some(path) = normalize_text_option(env_value) {
            return PathBuf::from(path);
        }
        if let Some(path) = self.data_dir.clone() {
            return path;
        }
        default_data_dir()
    }

    pub fn storage_prefix(&self) -> String {
        self.storage_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_STORAGE_PREFIX.to_string())
    }

    fn normalize(&mut self) {
        self.storage_prefix = normalize_text_option(self.storage_prefix.take());
        self.data_dir = self
            .data_dir
            .take()
            .filter(|path| !path.as_os_str().is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.storage_prefix(), "simple-notes");
    }

    #[test]
    fn default_config_matches_deserialized_empty_file() {
        let parsed = serde_json::from_str::<CliConfig>("{}").unwrap();
        assert_eq!(CliConfig::default(), parsed);
        assert_eq!(CliConfig::default().version, 1);
    }

    #[test]
    fn config_roundtrip_normalizes_blank_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = CliConfig {
            version: 1,
            data_dir: Some(PathBuf::from("/tmp/notes-data")),
            storage_prefix: Some("   ".to_string()),
        };
        config.save_to_path(&path).unwrap();

        let loaded = CliConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.data_dir, Some(PathBuf::from("/tmp/notes-data")));
        assert_eq!(loaded.storage_prefix, None);
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ nope").unwrap();
        let error = CliConfig::load_from_path(&path).unwrap_err();
        assert!(error.contains("Failed to parse config"));
    }

    #[test]
    fn resolve_data_dir_prefers_flag_then_env_then_config() {
        let config = CliConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..CliConfig::default()
        };

        assert_eq!(
            config.resolve_data_dir(Some(PathBuf::from("/from/flag")), Some("/from/env".into())),
            PathBuf::from("/from/flag")
        );
        assert_eq!(
            config.resolve_data_dir(None, Some("/from/env".into())),
            PathBuf::from("/from/env")
        );
        assert_eq!(
            config.resolve_data_dir(None, Some("  ".into())),
            PathBuf::from("/from/config")
        );
        assert_eq!(
            CliConfig::default().resolve_data_dir(None, None),
            default_data_dir()
        );
    }
}
