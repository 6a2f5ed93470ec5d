//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::{Settings, StateBackend};
use crate::utils::errors::{AmiHelperError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    if settings.state.backend == StateBackend::Redis {
        validate_redis_config(&settings.redis)?;
    }
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;
    validate_admin_panel_config(&settings.admin_panel)?;

    Ok(())
}

fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(AmiHelperError::Config("Bot token is required".to_string()));
    }

    if let Some(url) = &config.webhook_url {
        url::Url::parse(url)
            .map_err(|e| AmiHelperError::Config(format!("Invalid webhook URL: {}", e)))?;
    }

    Ok(())
}

fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(AmiHelperError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(AmiHelperError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(AmiHelperError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(AmiHelperError::Config("Redis URL is required".to_string()));
    }

    if config.ttl_seconds == 0 {
        return Err(AmiHelperError::Config(
            "Redis TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(AmiHelperError::Config("Default language is required".to_string()));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(AmiHelperError::Config(
            "Default language must be in supported languages list".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
        return Err(AmiHelperError::Config(format!(
            "Invalid log level: {}. Valid levels: {}",
            config.level,
            valid_levels.join(", ")
        )));
    }

    if config.file_path.is_empty() {
        return Err(AmiHelperError::Config("Log directory is required".to_string()));
    }

    Ok(())
}

fn validate_admin_panel_config(config: &super::AdminPanelConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    if config.username.is_empty() || config.password.is_empty() {
        return Err(AmiHelperError::Config(
            "Admin panel requires basic auth username and password".to_string(),
        ));
    }

    if !config.base_path.starts_with('/') {
        return Err(AmiHelperError::Config(
            "Admin panel base path must start with '/'".to_string(),
        ));
    }

    if config.page_size == 0 {
        return Err(AmiHelperError::Config(
            "Admin panel page size must be greater than 0".to_string(),
        ));
    }

    config
        .bind_address
        .parse::<std::net::SocketAddr>()
        .map_err(|e| AmiHelperError::Config(format!("Invalid admin panel bind address: {}", e)))?;

    Ok(())
}
