use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_API_BASE: &str = "https://api.deepseek.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE_PATH: &str = "config.toml";

/// Service configuration, loaded from `config.toml` with environment
/// variables taking precedence. There is deliberately no default API key:
/// the binary refuses to start without one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                match toml::from_str::<Config>(&content) {
                    Ok(file_config) => config = file_config,
                    Err(e) => log::warn!("Ignoring malformed {CONFIG_FILE_PATH}: {e}"),
                }
            }
        }

        // Environment variables override file values
        if let Ok(api_key) = std::env::var("DEEPSEEK_API_KEY") {
            if !api_key.trim().is_empty() {
                config.api_key = Some(api_key);
            }
        }
        if let Ok(api_base) = std::env::var("DEEPSEEK_API_BASE") {
            config.api_base = Some(api_base);
        }
        if let Ok(model) = std::env::var("NAMEGEN_MODEL") {
            config.model = Some(model);
        }
        if let Ok(timeout) = std::env::var("NAMEGEN_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout.parse().ok();
        }
        config
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
