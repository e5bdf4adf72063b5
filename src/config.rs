use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::util::SecretString;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model id sent in the chat completions body
    #[serde(default = "default_model")]
    pub model: String,

    /// OpenAI-compatible base URL; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the bearer token.
    /// "none" disables the remote path entirely.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_json_path")]
    pub json_path: String,

    #[serde(default = "default_html_path")]
    pub html_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: default_json_path(),
            html_path: default_html_path(),
        }
    }
}

fn default_model() -> String {
    "grok-4-latest".to_string()
}

fn default_base_url() -> String {
    "https://api.x.ai/v1".to_string()
}

fn default_api_key_env() -> String {
    "XAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.3
}

fn default_json_path() -> String {
    "skill_tree.json".to_string()
}

fn default_html_path() -> String {
    "skill_tree.html".to_string()
}

impl Config {
    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<&str>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(config_path)
                .with_context(|| format!("failed to load config from {}", config_path));
        }

        if let Ok(config) = Self::load_from_path("skilltree.toml") {
            debug!("Loaded config from ./skilltree.toml");
            return Ok(config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("skilltree").join("config.toml");
            if let Ok(config) = Self::load_from_path(&config_path) {
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// API key from the configured environment variable.
    ///
    /// A missing or blank key is not an error: classification simply takes
    /// the keyword path.
    pub fn get_api_key(&self) -> Option<SecretString> {
        let env_var = self.llm.api_key_env.trim();
        if env_var.is_empty() || env_var.eq_ignore_ascii_case("none") {
            return None;
        }

        match env::var(env_var) {
            Ok(key) if !key.trim().is_empty() => Some(SecretString::new(key.trim().to_string())),
            _ => None,
        }
    }
}
