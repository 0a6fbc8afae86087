//! `foundryconfig.json` loading.

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file name, looked up in the project root
pub const CONFIG_FILE: &str = "foundryconfig.json";

/// Developer-local settings for deploy and release
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoundryConfig {
    /// Host application's user data root; must contain `Data/`
    #[serde(rename = "dataPath", default)]
    pub data_path: Option<PathBuf>,
    /// Base URL for raw file hosting of the repository
    #[serde(rename = "rawURL", default)]
    pub raw_url: Option<String>,
    /// Source repository URL
    #[serde(default)]
    pub repository: Option<String>,
}

/// The two URLs a release rewrites into the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrls {
    /// Raw hosting base, without trailing slash
    pub raw_url: String,
    /// Repository URL
    pub repository: String,
}

impl FoundryConfig {
    /// Load the config from `root`, failing if it does not exist
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Err(ConfigError::NotFound { path }.into());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: FoundryConfig = serde_json::from_str(&content)?;
        log::debug!("Loaded {}", path.display());
        Ok(config)
    }

    /// Both release URLs, or `MissingRepositoryUrls`
    pub fn repository_urls(&self) -> Result<RepositoryUrls> {
        match (non_empty(&self.raw_url), non_empty(&self.repository)) {
            (Some(raw), Some(repo)) => Ok(RepositoryUrls {
                raw_url: raw.trim_end_matches('/').to_string(),
                repository: repo.to_string(),
            }),
            _ => Err(ConfigError::MissingRepositoryUrls.into()),
        }
    }

    /// `{dataPath}/Data`, validated to exist
    pub fn user_data_dir(&self) -> Result<PathBuf> {
        let data_path = self
            .data_path
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingDataPath)?;
        let data_dir = data_path.join("Data");
        if !data_dir.is_dir() {
            return Err(ConfigError::LinkTargetInvalid {
                path: data_path.clone(),
            }
            .into());
        }
        Ok(data_dir)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    #[test]
    fn parses_camel_case_keys() {
        let config: FoundryConfig = serde_json::from_str(
            r#"{"dataPath": "/data", "rawURL": "https://raw.example/u/r/", "repository": "https://example/u/r", "extra": 1}"#,
        )
        .unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("/data")));
        let urls = config.repository_urls().unwrap();
        assert_eq!(urls.raw_url, "https://raw.example/u/r");
        assert_eq!(urls.repository, "https://example/u/r");
    }

    #[test]
    fn missing_urls_are_reported() {
        let config = FoundryConfig {
            raw_url: Some("https://raw.example".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.repository_urls(),
            Err(ReleaseError::Config(ConfigError::MissingRepositoryUrls))
        ));
    }

    #[test]
    fn missing_data_path_is_reported() {
        let config = FoundryConfig::default();
        assert!(matches!(
            config.user_data_dir(),
            Err(ReleaseError::Config(ConfigError::MissingDataPath))
        ));
    }
}
