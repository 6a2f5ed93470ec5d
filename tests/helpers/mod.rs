//! Test helpers module
//!
//! Utilities shared by the integration tests: the recording chat transport,
//! the in-memory application context, fixtures, the mocked Bot API and the
//! PostgreSQL container helper.

pub mod database_helper;
pub mod failing_store;
pub mod recording_messenger;
pub mod telegram_mock;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use failing_store::*;
pub use recording_messenger::*;
pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
