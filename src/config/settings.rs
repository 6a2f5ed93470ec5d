//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    #[serde(default)]
    pub state: StateConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
    pub admin_panel: AdminPanelConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub admin_ids: Vec<i64>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Zero keeps idle connections open indefinitely
    pub idle_timeout_seconds: u64,
    /// Zero lets connections live for the lifetime of the pool
    pub max_lifetime_seconds: u64,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Where conversation contexts live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateConfig {
    pub backend: StateBackend,
    /// How often the in-memory backend drops expired contexts
    pub cleanup_interval_seconds: u64,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            backend: StateBackend::Redis,
            cleanup_interval_seconds: 300,
        }
    }
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
}

fn default_translations_dir() -> String {
    "translations".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Admin panel HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminPanelConfig {
    pub enabled: bool,
    pub bind_address: String,
    pub base_path: String,
    pub username: String,
    pub password: String,
    pub page_size: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Nested keys use a double underscore, e.g. `AMIHELPER__BOT__TOKEN`.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("AMIHELPER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids")
                    .with_list_parse_key("i18n.supported_languages")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::AmiHelperError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                webhook_url: None,
                admin_ids: vec![],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/amihelper".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
                idle_timeout_seconds: 600,
                max_lifetime_seconds: 1800,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "amihelper:".to_string(),
                ttl_seconds: 86400,
            },
            state: StateConfig::default(),
            i18n: I18nConfig {
                default_language: "uk".to_string(),
                supported_languages: vec!["uk".to_string(), "en".to_string()],
                translations_dir: default_translations_dir(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
            admin_panel: AdminPanelConfig {
                enabled: true,
                bind_address: "0.0.0.0:4000".to_string(),
                base_path: "/extra-wh-2020/".to_string(),
                username: "admin".to_string(),
                password: String::new(),
                page_size: 20,
            },
        }
    }
}
