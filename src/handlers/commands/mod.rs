//! Command handlers module

use std::sync::Arc;

use teloxide::{types::Message, utils::command::BotCommands};
use tracing::debug;

use super::actor_for;
use crate::flows::App;
use crate::utils::errors::{AmiHelperError, Result};

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "AmiHelper commands:")]
pub enum Command {
    #[command(description = "Show the main menu")]
    Start(String),
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Create a new event (admin only)")]
    EventCreation,
    #[command(description = "Approve a pending registration (admin only)")]
    ApproveEventRegistration(String),
    #[command(description = "Reject a pending registration (admin only)")]
    RejectEventRegistration(String),
}

/// Main command dispatcher
pub async fn handle_command(msg: Message, cmd: Command, app: Arc<App>) -> Result<()> {
    let user = msg
        .from
        .as_ref()
        .ok_or_else(|| AmiHelperError::InvalidInput("No user in message".to_string()))?;
    let actor = actor_for(&app, msg.chat.id.0, user);

    debug!(user_id = actor.user_id, command = ?cmd, "Processing command");
    app.dispatch_command(&actor, msg.id.0, cmd).await
}
