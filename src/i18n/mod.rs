//! Internationalization module
//!
//! This module resolves the bot's user-facing texts from per-language
//! translation files with `{placeholder}` substitution.

pub mod loader;

pub use loader::{I18n, TranslationParams};
