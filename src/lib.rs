//! AmiHelper Telegram Bot
//!
//! A Telegram bot for a student community: profiles, an FAQ tree and event
//! registration with manual approval, plus a small JSON admin panel. The
//! conversational flows are driven through storage and transport traits so
//! they run the same against PostgreSQL and Telegram or in-process fakes.

#![allow(non_snake_case)]

pub mod admin_panel;
pub mod config;
pub mod database;
pub mod flows;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AmiHelperError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use flows::App;
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
