use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "SPLITT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },
    #[error("No OCR API key configured; set SPLITT_OCR_API_KEY or `ocr_api_key`")]
    MissingApiKey,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub ocr_endpoint: String,
    pub ocr_api_key: Option<String>,
    pub ocr_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            ocr_endpoint: "https://api.ocr.space/parse/image".to_string(),
            ocr_api_key: None,
            ocr_timeout_secs: 30,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load from the file named by `SPLITT_CONFIG` (if any), then apply
    /// `SPLITT_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        Self::load_from(path.as_deref(), |key| std::env::var(key).ok())
    }

    pub fn load_from(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .map_err(|source| ConfigError::Io { path: p.to_path_buf(), source })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        config.apply_env(env)?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(v) = env("SPLITT_BIND_ADDR") {
            self.bind_addr = v;
        }
        if let Some(v) = env("SPLITT_OCR_ENDPOINT") {
            self.ocr_endpoint = v;
        }
        if let Some(v) = env("SPLITT_OCR_API_KEY") {
            self.ocr_api_key = Some(v);
        }
        if let Some(v) = env("SPLITT_OCR_TIMEOUT_SECS") {
            self.ocr_timeout_secs = v
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { key: "SPLITT_OCR_TIMEOUT_SECS", value: v })?;
        }
        if let Some(v) = env("SPLITT_MAX_BODY_BYTES") {
            self.max_body_bytes = v
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { key: "SPLITT_MAX_BODY_BYTES", value: v })?;
        }
        Ok(())
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.ocr_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn ocr_timeout(&self) -> Duration {
        Duration::from_secs(self.ocr_timeout_secs)
    }
}
