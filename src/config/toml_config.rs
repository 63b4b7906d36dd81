use crate::core::ConfigProvider;
use crate::utils::error::{QuizError, Result};
use crate::utils::validation::{
    validate_path, validate_range, validate_slot_name, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/app";
pub const DEFAULT_STORAGE_SLOT: &str = "quiz-app-questions";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// When false the remote API is never called.
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: 5,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub slot: String,
    pub ephemeral: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            slot: DEFAULT_STORAGE_SLOT.to_string(),
            ephemeral: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub success_message_seconds: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            success_message_seconds: 3,
        }
    }
}

impl QuizConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuizError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuizError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuizError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_range("api.timeout_seconds", self.api.timeout_seconds, 1, 300)?;
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_slot_name("storage.slot", &self.storage.slot)?;
        validate_range("ui.success_message_seconds", self.ui.success_message_seconds, 1, 60)?;
        Ok(())
    }
}

impl ConfigProvider for QuizConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn api_enabled(&self) -> bool {
        self.api.enabled
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds
    }

    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn storage_slot(&self) -> &str {
        &self.storage.slot
    }

    fn ephemeral_storage(&self) -> bool {
        self.storage.ephemeral
    }

    fn success_message_seconds(&self) -> u64 {
        self.ui.success_message_seconds
    }
}

impl Validate for QuizConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
