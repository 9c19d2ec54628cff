use crate::core::policy::{ValidationPolicy, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
use crate::core::snapshot::DEFAULT_SNAPSHOT_FILE;
use crate::core::ConfigProvider;
use crate::utils::error::{CinemaError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 20322;

/// Upper bound accepted for `validation.max_width` / `validation.max_height`.
pub const MAX_GRID_SIDE: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub validation: ValidationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub enabled: bool,
    pub data_dir: String,
    pub snapshot_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            data_dir: "./data".to_string(),
            snapshot_file: DEFAULT_SNAPSHOT_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl ServiceConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CinemaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CinemaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CinemaError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy::new(self.validation.max_width, self.validation.max_height)
    }
}

impl ConfigProvider for ServiceConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn max_width(&self) -> u32 {
        self.validation.max_width
    }

    fn max_height(&self) -> u32 {
        self.validation.max_height
    }

    fn data_dir(&self) -> Option<&str> {
        self.storage.enabled.then_some(self.storage.data_dir.as_str())
    }

    fn snapshot_file(&self) -> &str {
        &self.storage.snapshot_file
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;
        validation::validate_range("validation.max_width", self.validation.max_width, 1, MAX_GRID_SIDE)?;
        validation::validate_range(
            "validation.max_height",
            self.validation.max_height,
            1,
            MAX_GRID_SIDE,
        )?;

        if self.storage.enabled {
            validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
            validation::validate_path("storage.snapshot_file", &self.storage.snapshot_file)?;
        }

        Ok(())
    }
}
