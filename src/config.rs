use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::SnapshotLines;

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the platform (http or https); the websocket endpoint
    /// is derived from it
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Bearer token for the already-authorized API channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Directory exported log artifacts are written to (default: cwd)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// Default snapshot line count; must be one of 50, 100, 200, 500
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_lines: Option<u32>,

    // This field is not serialized, just used at runtime
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            token: None,
            export_dir: None,
            snapshot_lines: None,
            config_path: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file. A missing file yields the defaults,
    /// so the TUI works against a local platform without any setup.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Streaming endpoint for one container, derived from `server_url`
    /// (`http` -> `ws`, `https` -> `wss`).
    pub fn ws_logs_url(&self, container_id: i64) -> String {
        let base = self.server_url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            format!("ws://{}", base)
        };
        format!("{}/ws/logs/{}", ws_base, container_id)
    }

    /// Default snapshot line count; invalid configured values fall back
    /// to 100 rather than failing startup.
    pub fn snapshot_lines(&self) -> SnapshotLines {
        self.snapshot_lines
            .and_then(SnapshotLines::from_count)
            .unwrap_or_default()
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::from_file("/nonexistent/.sandtail.toml").unwrap();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert!(config.token.is_none());
        assert_eq!(config.snapshot_lines().count(), 100);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server_url = \"https://sandbox.example.com\"").unwrap();
        writeln!(file, "token = \"abc123\"").unwrap();
        writeln!(file, "snapshot_lines = 200").unwrap();
        file.flush().unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server_url, "https://sandbox.example.com");
        assert_eq!(config.token.as_deref(), Some("abc123"));
        assert_eq!(config.snapshot_lines().count(), 200);
    }

    #[test]
    fn test_ws_url_scheme_derivation() {
        let mut config = Config::default();
        assert_eq!(config.ws_logs_url(7), "ws://localhost:8080/ws/logs/7");

        config.server_url = "https://sandbox.example.com/".to_string();
        assert_eq!(config.ws_logs_url(7), "wss://sandbox.example.com/ws/logs/7");

        config.server_url = "sandbox.example.com:8080".to_string();
        assert_eq!(config.ws_logs_url(7), "ws://sandbox.example.com:8080/ws/logs/7");
    }

    #[test]
    fn test_invalid_snapshot_lines_falls_back_to_default() {
        let config = Config {
            snapshot_lines: Some(123),
            ..Config::default()
        };
        assert_eq!(config.snapshot_lines().count(), 100);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server_url = [not toml").unwrap();
        file.flush().unwrap();
        assert!(Config::from_file(file.path().to_str().unwrap()).is_err());
    }
}
