//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MEMORY_KEEPER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use memory_keeper::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod export;
mod server;
mod speech;
mod storage;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use server::{Environment, ServerConfig};
pub use speech::SpeechConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// local setup with polishing and speech turned off.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Answers and audio file locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// PDF export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Text-to-speech settings
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEMORY_KEEPER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEMORY_KEEPER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MEMORY_KEEPER__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEMORY_KEEPER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unusable port, a timeout outside
    /// 1..=300 seconds or an empty path.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        self.export.validate()?;
        self.speech.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MEMORY_KEEPER__SERVER__PORT",
        "MEMORY_KEEPER__SERVER__ENVIRONMENT",
        "MEMORY_KEEPER__AI__OPENAI_API_KEY",
        "MEMORY_KEEPER__AI__PRIMARY_PROVIDER",
        "MEMORY_KEEPER__STORAGE__DATA_DIR",
        "MEMORY_KEEPER__EXPORT__FALLBACK_ENABLED",
        "MEMORY_KEEPER__SPEECH__VOICE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> AppConfig {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        clear_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result.unwrap()
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = load_with(&[]);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.answers_path(), PathBuf::from("data/memories.json"));
        assert_eq!(config.export.log_path(), PathBuf::from("pdf/pdf_log.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_are_read() {
        let config = load_with(&[
            ("MEMORY_KEEPER__SERVER__PORT", "3000"),
            ("MEMORY_KEEPER__AI__OPENAI_API_KEY", "sk-test"),
            ("MEMORY_KEEPER__AI__PRIMARY_PROVIDER", "anthropic"),
            ("MEMORY_KEEPER__STORAGE__DATA_DIR", "/var/lib/memories"),
            ("MEMORY_KEEPER__EXPORT__FALLBACK_ENABLED", "false"),
            ("MEMORY_KEEPER__SPEECH__VOICE", "nova"),
        ]);

        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.ai.openai_api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("sk-test")
        );
        assert_eq!(config.ai.primary_provider, AiProvider::Anthropic);
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/memories"));
        assert!(!config.export.fallback_enabled);
        assert_eq!(config.speech.voice, "nova");
    }

    #[test]
    fn test_is_production() {
        let config = load_with(&[("MEMORY_KEEPER__SERVER__ENVIRONMENT", "production")]);
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_reports_first_failing_section() {
        let mut config = AppConfig::default();
        config.speech.timeout_secs = 0;

        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTimeout("speech.timeout_secs"))
        );
    }
}
