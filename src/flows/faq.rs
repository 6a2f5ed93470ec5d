//! FAQ tree navigation

use super::{keyboards, Actor, App};
use crate::services::MessageOptions;
use crate::state::{Dialogue, FaqCursor};
use crate::utils::errors::Result;
use crate::utils::helpers::escape_markdown;

fn cursor_of(dialogue: Dialogue) -> FaqCursor {
    match dialogue {
        Dialogue::Faq(cursor) => cursor,
        _ => FaqCursor::default(),
    }
}

async fn listing(app: &App, actor: &Actor, level: Option<i64>) -> Result<MessageOptions> {
    let categories = match level {
        Some(parent_id) => app.store.list_child_categories(parent_id).await?,
        None => app.store.list_root_categories().await?,
    };
    let keyboard = keyboards::faq(&app.i18n, &actor.language, &categories, level.is_some());
    Ok(MessageOptions::with_keyboard(keyboard))
}

/// Entry from the main menu: reply with the root listing
pub async fn open(app: &App, actor: &Actor, message_id: i32) -> Result<()> {
    app.set_dialogue(actor.chat_id, Dialogue::Faq(FaqCursor::default()))
        .await?;
    let options = listing(app, actor, None).await?.reply_to(message_id);
    app.send(actor, &app.t(actor, "faq.faq_main"), options).await?;
    Ok(())
}

pub async fn select(
    app: &App,
    actor: &Actor,
    message_id: i32,
    category_id: i64,
    dialogue: Dialogue,
) -> Result<()> {
    let mut cursor = cursor_of(dialogue);

    match app.store.find_category(category_id).await? {
        Some(category) if category.is_leaf() => {
            cursor.open_answer();
            let answer = match category.category_answer {
                Some(answer) => answer,
                None => escape_markdown(&app.t(actor, "faq.no_answer")),
            };
            let keyboard = keyboards::faq(&app.i18n, &actor.language, &[], true);
            let options = MessageOptions::with_keyboard(keyboard)
                .markdown()
                .without_preview();
            app.edit(actor, message_id, &answer, options).await?;
        }
        Some(category) => {
            cursor.descend(category.id);
            render_level(app, actor, message_id, cursor.level()).await?;
        }
        None => {
            cursor.reset();
            render_level(app, actor, message_id, None).await?;
        }
    }

    app.set_dialogue(actor.chat_id, Dialogue::Faq(cursor)).await
}

pub async fn back(app: &App, actor: &Actor, message_id: i32, dialogue: Dialogue) -> Result<()> {
    let mut cursor = cursor_of(dialogue);
    let level = cursor.back();
    render_level(app, actor, message_id, level).await?;
    app.set_dialogue(actor.chat_id, Dialogue::Faq(cursor)).await
}

async fn render_level(app: &App, actor: &Actor, message_id: i32, level: Option<i64>) -> Result<()> {
    let options = listing(app, actor, level).await?;
    app.edit(actor, message_id, &app.t(actor, "faq.faq_main"), options)
        .await
}
