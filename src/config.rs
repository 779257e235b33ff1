//! Configuration file for the server and CLI
//!
//! Read from `<config_dir>/wordbook/config.toml` unless a path is given.
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dictionary::DEFAULT_BASE_URL;
use crate::storage::{FileStorage, StorageError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the word store lives (default: `<data_local_dir>/wordbook`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub server: ServerConfig,
    pub dictionary: DictionaryConfig,
    pub review: ReviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Allow cross-origin requests (for a browser front end on another port)
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            cors: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl DictionaryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Post completed sessions here instead of writing the local store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions_url: Option<String>,
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wordbook").join("config.toml"))
    }

    /// Load from `path`, or from the default location when it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolved data directory for the word store
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(FileStorage::default_data_dir()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert!(config.server.cors);
        assert_eq!(config.dictionary.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.dictionary.timeout(), Duration::from_secs(10));
        assert!(config.review.sessions_url.is_none());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
data_dir = "/tmp/words"

[server]
bind = "0.0.0.0:8080"

[review]
sessions_url = "http://localhost:8080/api/flashcards/sessions"
"#,
        )
        .unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/words")));
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert!(config.server.cors);
        assert_eq!(config.dictionary.timeout_secs, 10);
        assert_eq!(
            config.review.sessions_url.as_deref(),
            Some("http://localhost:8080/api/flashcards/sessions")
        );
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/words"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("[server\nbind = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));

        let present = temp.path().join("config.toml");
        fs::write(&present, "[dictionary]\ntimeout_secs = 3\n").unwrap();
        let config = Config::load(Some(&present)).unwrap();
        assert_eq!(config.dictionary.timeout_secs, 3);
    }
}
