//! Client configuration with multi-source merging.
//!
//! Base URL, default headers and timeout are environment concerns; the
//! client only attaches them to outgoing requests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Project-level config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "folio.toml";

/// Prefix for environment overrides; nested keys are split on `__`.
pub const ENV_PREFIX: &str = "FOLIO_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("base_url must be an http(s) URL, got {0:?}")]
    InvalidBaseUrl(String),
}

/// Which responder answers chat questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Live,
    Stub,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub mode: ChatMode,
    /// Simulated latency of the stub responder, in milliseconds.
    pub stub_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            mode: ChatMode::Live,
            stub_delay_ms: 1500,
        }
    }
}

impl ChatConfig {
    pub fn stub_delay(&self) -> Duration {
        Duration::from_millis(self.stub_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Headers attached to every request (e.g. `authorization`).
    #[serde(deserialize_with = "header_map")]
    pub headers: BTreeMap<String, String>,
    pub chat: ChatConfig,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
            headers: BTreeMap::new(),
            chat: ChatConfig::default(),
        }
    }
}

impl BrainConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

/// Env keys can only carry `_`, so header names are normalised to `-`.
/// Env values arrive already parsed, so any scalar is taken as text.
fn header_map<'de, D: Deserializer<'de>>(de: D) -> Result<BTreeMap<String, String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        UInt(u64),
        Float(f64),
        Bool(bool),
    }

    let raw = BTreeMap::<String, Scalar>::deserialize(de)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                Scalar::Text(s) => s,
                Scalar::Int(n) => n.to_string(),
                Scalar::UInt(n) => n.to_string(),
                Scalar::Float(n) => n.to_string(),
                Scalar::Bool(b) => b.to_string(),
            };
            (name.replace('_', "-").to_ascii_lowercase(), value)
        })
        .collect())
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `FOLIO_BASE_URL`, `FOLIO_CHAT__MODE`, ...
    /// 2. Explicit config path (if provided)
    /// 3. Project file `./folio.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<BrainConfig, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }
        let config: BrainConfig = Self::figment(config_path)
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Merged sources without the existence check on `config_path`.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(BrainConfig::default()));

        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.exists() {
            figment = figment.merge(Toml::file(&project));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
