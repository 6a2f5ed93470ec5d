//! Callback query handlers module

use std::sync::Arc;

use teloxide::{prelude::*, types::CallbackQuery};
use tracing::{debug, warn};

use super::actor_for;
use crate::flows::App;
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, app: Arc<App>) -> Result<()> {
    // Answer first to remove the loading state
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let Some(data) = query.data.as_deref() else {
        debug!("Callback query without data");
        return Ok(());
    };
    let Some(message) = query.message.as_ref() else {
        debug!(callback_data = %data, "Callback query without message");
        return Ok(());
    };

    let actor = actor_for(&app, message.chat().id.0, &query.from);
    debug!(user_id = actor.user_id, callback_data = %data, "Processing callback query");

    app.dispatch_callback(&actor, message.id().0, data).await
}
