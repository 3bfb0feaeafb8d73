use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub mock_server: MockServerConfig,
}

/// Backend the HTTP adapters talk to
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Mock backend served by the binary
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MockServerConfig {
    pub host: String,
    pub port: u16,
    /// Artificial latency of `GET /api/locations`
    pub locations_delay_ms: u64,
    /// Artificial latency of `POST /api/submit-consignment`
    pub submit_delay_ms: u64,
    pub locations: Vec<String>,
}

impl Default for MockServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            locations_delay_ms: 1000,
            submit_delay_ms: 2000,
            locations: [
                "Perth",
                "Sydney",
                "Melbourne",
                "Brisbane",
                "Adelaide",
                "Darwin",
                "Hobart",
                "Canberra",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialize() {
        let yaml = r#"
log_level: "debug"
log_dir: "./logs"
log_file: "consignment.log"
use_json: false
rotation: "daily"
api:
  base_url: "http://127.0.0.1:4000"
  timeout_ms: 2500
mock_server:
  host: "0.0.0.0"
  port: 4000
  locations_delay_ms: 0
  submit_delay_ms: 10
  locations: ["Perth", "Hobart"]
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api.base_url, "http://127.0.0.1:4000");
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.mock_server.port, 4000);
        assert_eq!(config.mock_server.locations, vec!["Perth", "Hobart"]);
    }

    #[test]
    fn test_sections_default_when_missing() {
        let yaml = r#"
log_level: "info"
log_dir: "./logs"
log_file: "consignment.log"
use_json: true
rotation: "never"
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.mock_server.port, 3001);
        assert_eq!(config.mock_server.locations_delay_ms, 1000);
        assert_eq!(config.mock_server.submit_delay_ms, 2000);
        assert_eq!(config.mock_server.locations.len(), 8);
        assert_eq!(config.mock_server.locations[0], "Perth");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load("does-not-exist").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("config/does-not-exist.yaml"));
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        let err = AppConfig::from_yaml("log_level: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
