use serde::Deserialize;
use std::env;

use crate::services::difficulty_service::DifficultyPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub difficulty: DifficultyPolicy,
    /// Attach multiple-choice options to generated problems unless the request says otherwise.
    pub multiple_choice: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8081".to_string(),
            difficulty: DifficultyPolicy::default(),
            multiple_choice: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // .env is optional
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/{env}.toml, then APP__SECTION__KEY environment overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &config::Config) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let bind_addr = settings
            .get_string("server.bind_addr")
            .unwrap_or(defaults.bind_addr);

        let promote_after = match settings.get_int("difficulty.promote_after") {
            Ok(value) => u32::try_from(value)
                .ok()
                .filter(|v| *v >= 1)
                .ok_or_else(|| {
                    config::ConfigError::Message(format!(
                        "difficulty.promote_after must be at least 1, got {}",
                        value
                    ))
                })?,
            Err(config::ConfigError::NotFound(_)) => defaults.difficulty.promote_after,
            Err(e) => return Err(e),
        };

        let demote_on_incorrect = match settings.get_bool("difficulty.demote_on_incorrect") {
            Ok(value) => value,
            Err(config::ConfigError::NotFound(_)) => defaults.difficulty.demote_on_incorrect,
            Err(e) => return Err(e),
        };

        let multiple_choice = match settings.get_bool("quiz.multiple_choice") {
            Ok(value) => value,
            Err(config::ConfigError::NotFound(_)) => defaults.multiple_choice,
            Err(e) => return Err(e),
        };

        Ok(Config {
            bind_addr,
            difficulty: DifficultyPolicy {
                promote_after,
                demote_on_incorrect,
            },
            multiple_choice,
        })
    }
}
