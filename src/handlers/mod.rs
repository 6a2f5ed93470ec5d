//! Bot handlers module
//!
//! Thin teloxide glue: each endpoint turns an update into an [`Actor`] and
//! hands it to the flow dispatcher. Errors are logged here and never stop the
//! dispatcher.

pub mod callbacks;
pub mod commands;
pub mod messages;

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatJoinRequest, Update};
use tracing::error;

use crate::flows::{Actor, App};

pub use commands::Command;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub(crate) fn actor_for(app: &App, chat_id: i64, user: &teloxide::types::User) -> Actor {
    Actor {
        chat_id,
        user_id: user.id.0 as i64,
        username: user.username.clone(),
        language: app.i18n.detect_user_language(user.language_code.as_deref()),
    }
}

/// Create the main update handler
pub fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(on_command),
                )
                .branch(dptree::endpoint(on_message)),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback))
        .branch(Update::filter_chat_join_request().endpoint(on_join_request))
}

async fn on_command(msg: Message, cmd: Command, app: Arc<App>) -> HandlerResult {
    if let Err(e) = commands::handle_command(msg, cmd, app).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling command");
    }
    Ok(())
}

async fn on_message(msg: Message, app: Arc<App>) -> HandlerResult {
    if let Err(e) = messages::handle_message(msg, app).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling message");
    }
    Ok(())
}

async fn on_callback(bot: Bot, query: CallbackQuery, app: Arc<App>) -> HandlerResult {
    let user_id = query.from.id.0 as i64;
    if let Err(e) = callbacks::handle_callback_query(bot, query, app).await {
        error!(user_id = user_id, error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling callback query");
    }
    Ok(())
}

async fn on_join_request(request: ChatJoinRequest, app: Arc<App>) -> HandlerResult {
    if let Err(e) = messages::handle_chat_join_request(request, app).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling chat join request");
    }
    Ok(())
}
