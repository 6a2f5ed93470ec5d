//! Chat join gating for the per-division event chats

use tracing::error;

use super::App;
use crate::utils::errors::Result;
use crate::utils::logging::log_join_decision;

/// Approve only holders of an approved registration for exactly this chat.
///
/// A failed lookup declines the request.
pub async fn decide(app: &App, chat_id: i64, user_id: i64) -> Result<()> {
    let approved = match app
        .store
        .find_approved_membership(user_id, &chat_id.to_string())
        .await
    {
        Ok(registration) => registration.is_some(),
        Err(e) => {
            error!(chat_id = chat_id, user_id = user_id, error = %e, "Membership lookup failed");
            false
        }
    };

    if approved {
        app.messenger.approve_join_request(chat_id, user_id).await?;
    } else {
        app.messenger.decline_join_request(chat_id, user_id).await?;
    }
    log_join_decision(chat_id, user_id, approved);

    Ok(())
}
