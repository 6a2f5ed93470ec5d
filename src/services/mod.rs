//! Services module
//!
//! Capability checks and the chat transport used by the flows.

pub mod auth;
pub mod messenger;

pub use auth::AuthService;
pub use messenger::{Button, ButtonAction, Keyboard, MessageOptions, Messenger, TelegramMessenger};
