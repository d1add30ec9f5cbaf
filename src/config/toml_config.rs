use crate::config::CatalogSettings;
use crate::core::{CatalogSource, ConfigProvider};
use crate::utils::error::{QuizError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

// Matches `${VAR_NAME}`
static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogSettings,
    pub game: Option<GameSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub seed: Option<u64>,
    pub year: Option<i64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuizError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text, replacing `${VAR}` with the environment value first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| QuizError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn game(&self) -> GameSettings {
        self.game.clone().unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_source(&self) -> Result<CatalogSource> {
        self.catalog.source()
    }

    fn query_timeout(&self) -> Duration {
        self.catalog.timeout()
    }

    fn seed(&self) -> Option<u64> {
        self.game().seed
    }

    fn preset_year(&self) -> Option<i64> {
        self.game().year
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.catalog.validate()?;
        if let Some(api_key) = &self.catalog.api_key {
            if ENV_VAR.is_match(api_key) {
                return Err(QuizError::MissingConfigError {
                    field: format!("catalog.api_key (environment variable {} is not set)", api_key),
                });
            }
        }
        Ok(())
    }
}
