use crate::constants::{DATA_DIR_ENV, DEFAULT_DATA_DIR, PROMPTVC_CLI};
use confy::ConfyError;
use promptvc_core::file_storage::FileStorage;
use serde::{Deserialize, Serialize};
use std::env::home_dir;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptvcConfig {
    pub data_dir: String,
    /// Recorded as the author of new versions when `--author` is not given.
    #[serde(default)]
    pub author: Option<String>,
}

impl Default for PromptvcConfig {
    fn default() -> Self {
        let data_dir = home_dir()
            .map(|p| p.join(DEFAULT_DATA_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self {
            data_dir: data_dir.display().to_string(),
            author: None,
        }
    }
}

pub fn load_config() -> Result<PromptvcConfig, ConfyError> {
    confy::load(PROMPTVC_CLI, None)
}

/// Picks the data directory: the command line flag wins, then the environment,
/// then the configuration file.
pub fn data_dir(
    config: &PromptvcConfig,
    storage_path: Option<PathBuf>,
    env_value: Option<String>,
) -> PathBuf {
    storage_path
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(&config.data_dir))
}

pub fn get_storage(config: &PromptvcConfig, storage_path: Option<PathBuf>) -> FileStorage {
    let base_path = data_dir(config, storage_path, std::env::var(DATA_DIR_ENV).ok());
    tracing::debug!(path = %base_path.display(), "using data directory");
    FileStorage::new(base_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PromptvcConfig {
        PromptvcConfig {
            data_dir: "/from/config".to_string(),
            author: None,
        }
    }

    #[test]
    fn test_data_dir_precedence() {
        assert_eq!(
            PathBuf::from("/from/flag"),
            data_dir(
                &config(),
                Some(PathBuf::from("/from/flag")),
                Some("/from/env".to_string())
            )
        );
        assert_eq!(
            PathBuf::from("/from/env"),
            data_dir(&config(), None, Some("/from/env".to_string()))
        );
        assert_eq!(PathBuf::from("/from/config"), data_dir(&config(), None, None));
        assert_eq!(
            PathBuf::from("/from/config"),
            data_dir(&config(), None, Some(String::new()))
        );
    }

    #[test]
    fn test_default_data_dir() {
        let config = PromptvcConfig::default();
        assert!(config.data_dir.ends_with(DEFAULT_DATA_DIR));
        assert!(config.author.is_none());
    }

    #[test]
    fn test_config_without_author() {
        let config: PromptvcConfig = toml::from_str(r#"data_dir = "/tmp/prompts""#).unwrap();
        assert_eq!("/tmp/prompts", config.data_dir);
        assert!(config.author.is_none());
    }
}
