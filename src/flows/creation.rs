//! Admin-only event creation dialogue

use tracing::debug;

use super::profile::send_card;
use super::{keyboards, Actor, App, IncomingMessage};
use crate::models::CreateEventRequest;
use crate::services::MessageOptions;
use crate::state::{CreationForm, CreationStep, Dialogue};
use crate::utils::errors::Result;
use crate::utils::helpers::{escape_markdown, event_caption};
use crate::utils::logging::log_admin_action;

pub async fn start(app: &App, actor: &Actor, message_id: i32) -> Result<()> {
    app.set_dialogue(actor.chat_id, Dialogue::EventCreation(CreationForm::default()))
        .await?;
    prompt(app, actor, message_id, "event_creation.title").await
}

async fn prompt(app: &App, actor: &Actor, reply_to: i32, key: &str) -> Result<()> {
    app.send(actor, &app.t(actor, key), MessageOptions::default().reply_to(reply_to))
        .await?;
    Ok(())
}

pub async fn on_message(
    app: &App,
    actor: &Actor,
    message: &IncomingMessage,
    mut form: CreationForm,
) -> Result<()> {
    match form.step {
        CreationStep::Title => {
            let Some(title) = &message.text else {
                return prompt(app, actor, message.message_id, "event_creation.title").await;
            };
            form.title = title.clone();
            form.step = CreationStep::Description;
            app.set_dialogue(actor.chat_id, Dialogue::EventCreation(form))
                .await?;
            prompt(app, actor, message.message_id, "event_creation.description").await
        }
        CreationStep::Description => {
            let Some(description) = &message.text else {
                return prompt(app, actor, message.message_id, "event_creation.description").await;
            };
            form.description = description.clone();
            form.step = CreationStep::Photo;
            app.set_dialogue(actor.chat_id, Dialogue::EventCreation(form))
                .await?;
            prompt(app, actor, message.message_id, "event_creation.photo").await
        }
        CreationStep::Photo => {
            // Anything that is not a photo means the event has none
            form.photo = message.photo.clone();
            form.step = CreationStep::Confirm;

            let caption = format!(
                "{}\n\n{}",
                escape_markdown(&app.t(actor, "event_creation.approve_creation_text")),
                event_caption(&form.title, &form.description)
            );
            let options =
                MessageOptions::with_keyboard(keyboards::yes_no(&app.i18n, &actor.language))
                    .markdown();
            send_card(
                app.messenger.as_ref(),
                actor.chat_id,
                form.photo.as_deref(),
                &caption,
                options,
            )
            .await?;

            app.set_dialogue(actor.chat_id, Dialogue::EventCreation(form))
                .await
        }
        CreationStep::Confirm => app.use_keyboard(actor).await,
    }
}

/// `yes` persists the event with registration disabled, `no` discards it
pub async fn on_answer(
    app: &App,
    actor: &Actor,
    message_id: i32,
    answer: &str,
    form: CreationForm,
) -> Result<()> {
    if form.step != CreationStep::Confirm || !matches!(answer, keyboards::YES | keyboards::NO) {
        debug!(chat_id = actor.chat_id, step = ?form.step, answer = answer, "Unexpected creation answer");
        return Ok(());
    }

    app.strip_keyboard(actor.chat_id, message_id).await;
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;

    let key = if answer == keyboards::YES {
        let event = app
            .store
            .create_event(CreateEventRequest {
                title: form.title,
                description: form.description,
                photo: form.photo,
            })
            .await?;
        log_admin_action(
            actor.user_id,
            "event_created",
            Some(&event.id.to_string()),
            Some(&event.title),
        );
        "event_creation.event_created"
    } else {
        "event_creation.event_creation_canceled"
    };

    prompt(app, actor, message_id, key).await
}
