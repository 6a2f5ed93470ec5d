//! Message and chat join request handlers

use std::sync::Arc;

use teloxide::types::{ChatJoinRequest, Message};
use tracing::debug;

use super::actor_for;
use crate::flows::{App, IncomingMessage};
use crate::utils::errors::{AmiHelperError, Result};

/// Handle incoming non-command messages
pub async fn handle_message(msg: Message, app: Arc<App>) -> Result<()> {
    let user = msg
        .from
        .as_ref()
        .ok_or_else(|| AmiHelperError::InvalidInput("No user in message".to_string()))?;
    let actor = actor_for(&app, msg.chat.id.0, user);

    let incoming = IncomingMessage {
        message_id: msg.id.0,
        text: msg.text().map(str::to_string),
        photo: msg
            .photo()
            .and_then(|sizes| sizes.first())
            .map(|size| size.file.id.to_string()),
    };
    debug!(user_id = actor.user_id, has_text = incoming.text.is_some(), "Processing message");

    app.dispatch_message(&actor, incoming).await
}

/// Handle join requests to the managed event chats
pub async fn handle_chat_join_request(request: ChatJoinRequest, app: Arc<App>) -> Result<()> {
    let chat_id = request.chat.id.0;
    let user_id = request.from.id.0 as i64;
    debug!(chat_id = chat_id, user_id = user_id, "Processing chat join request");

    app.dispatch_join_request(chat_id, user_id).await
}
