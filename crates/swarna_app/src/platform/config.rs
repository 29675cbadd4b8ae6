//! Front-end configuration: a RON file plus environment overrides.
//!
//! Lookup order for the file is `$SWARNA_CONFIG`, then `./swarna.ron`. A
//! missing default file is not an error; a missing file named explicitly is.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use swarna_engine::{ClientSettings, RetryPolicy};
use thiserror::Error;

pub const CONFIG_ENV: &str = "SWARNA_CONFIG";
pub const API_URL_ENV: &str = "SWARNA_API_URL";
const DEFAULT_CONFIG_FILE: &str = "swarna.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub combined_wire_token: String,
    pub top_k: Option<u32>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: Option<u64>,
    pub retry: RetryConfig,
    /// Where per-process tab storage files live. Defaults to a `swarna`
    /// directory under the system temp dir.
    pub state_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_to_file: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            api_base_url: client.base_url,
            combined_wire_token: client.combined_wire_token,
            top_k: client.top_k,
            connect_timeout_ms: duration_ms(client.connect_timeout),
            request_timeout_ms: client.request_timeout.map(duration_ms),
            retry: RetryConfig::default(),
            state_dir: None,
            log_level: None,
            log_to_file: true,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries,
            base_delay_ms: duration_ms(policy.base_delay),
            max_delay_ms: duration_ms(policy.max_delay),
        }
    }
}

impl AppConfig {
    /// Loads the configuration the way the binary does: file lookup plus
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from(Path::new(&path), true)?,
            None => Self::load_from(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };
        config.apply_overrides(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Reads `path`. When `required` is false a missing file yields defaults.
    pub fn load_from(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn apply_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.clone(),
            combined_wire_token: self.combined_wire_token.clone(),
            top_k: self.top_k,
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
            retry: RetryPolicy {
                max_retries: self.retry.max_retries,
                base_delay: Duration::from_millis(self.retry.base_delay_ms),
                max_delay: Duration::from_millis(self.retry.max_delay_ms),
            },
        }
    }

    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("swarna"))
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_client_defaults() {
        let settings = AppConfig::default().client_settings();
        let expected = ClientSettings::default();
        assert_eq!(settings.base_url, expected.base_url);
        assert_eq!(settings.connect_timeout, expected.connect_timeout);
        assert_eq!(settings.request_timeout, None);
        assert_eq!(settings.retry, RetryPolicy::default());
    }

    #[test]
    fn missing_optional_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp.path().join("swarna.ron"), false).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = AppConfig::load_from(&temp.path().join("nope.ron"), true).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("swarna.ron");
        fs::write(
            &path,
            r#"(
                api_base_url: "http://search.local:9000",
                combined_wire_token: "hybrid",
                top_k: Some(20),
                request_timeout_ms: Some(5000),
                retry: (max_retries: 1),
            )"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path, true).unwrap();
        let settings = config.client_settings();

        assert_eq!(settings.base_url, "http://search.local:9000");
        assert_eq!(settings.combined_wire_token, "hybrid");
        assert_eq!(settings.top_k, Some(20));
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(settings.retry.max_retries, 1);
        assert_eq!(settings.retry.base_delay, Duration::from_millis(200));
        assert!(config.log_to_file);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("swarna.ron");
        fs::write(&path, "(top_k: \"many\")").unwrap();

        let err = AppConfig::load_from(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn api_url_override_wins_unless_blank() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("   ".to_string()));
        assert_eq!(config.api_base_url, AppConfig::default().api_base_url);

        config.apply_overrides(Some(" http://10.0.0.2:8000 ".to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.2:8000");
    }
}
