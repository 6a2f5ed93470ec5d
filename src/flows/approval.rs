//! Admin approval and rejection of pending registrations
//!
//! Both commands only act on registrations that exist and are still pending;
//! anything else leaves the store untouched and notifies nobody.

use super::{keyboards, Actor, App, IncomingMessage};
use crate::models::RegistrationWithEvent;
use crate::services::MessageOptions;
use crate::state::Dialogue;
use crate::utils::errors::Result;
use crate::utils::helpers::parse_trailing_id;
use crate::utils::logging::{log_admin_action, log_registration_action};

async fn reply(app: &App, actor: &Actor, message_id: i32, key: &str) -> Result<()> {
    app.send(actor, &app.t(actor, key), MessageOptions::default().reply_to(message_id))
        .await?;
    Ok(())
}

/// `/approve_event_registration <id>`
pub async fn approve(app: &App, actor: &Actor, message_id: i32, args: &str) -> Result<()> {
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;

    let Some(registration_id) = parse_trailing_id(args) else {
        return reply(app, actor, message_id, "event_admin_prompts.usage_approve").await;
    };

    let Some(RegistrationWithEvent { registration, event }) = app
        .store
        .approve_pending_registration(registration_id)
        .await?
    else {
        return reply(app, actor, message_id, "event_admin_prompts.registration_not_found").await;
    };

    log_registration_action(registration.id, event.id, registration.user_id, "approved");
    log_admin_action(
        actor.user_id,
        "approve_registration",
        Some(&registration.id.to_string()),
        None,
    );

    // The registrant's language is unknown here
    let lang = app.i18n.default_language();
    let text = app.i18n.t_args(
        "event_admin_prompts.registration_approved",
        lang,
        &[("event_name", event.title.as_str())],
    );
    let options = match registration.invite_link.as_deref() {
        Some(link) => MessageOptions::with_keyboard(keyboards::invite(&app.i18n, lang, link)),
        None => MessageOptions::default(),
    };
    app.messenger
        .send_text(registration.user_id, &text, options)
        .await?;

    reply(app, actor, message_id, "event_admin_prompts.sent").await
}

/// `/reject_event_registration <id>`: ask for the reason first
pub async fn reject(app: &App, actor: &Actor, message_id: i32, args: &str) -> Result<()> {
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;

    let Some(registration_id) = parse_trailing_id(args) else {
        return reply(app, actor, message_id, "event_admin_prompts.usage_reject").await;
    };

    app.set_dialogue(actor.chat_id, Dialogue::Rejection { registration_id })
        .await?;
    reply(app, actor, message_id, "event_admin_prompts.enter_reject_reason").await
}

pub async fn on_reject_reason(
    app: &App,
    actor: &Actor,
    message: &IncomingMessage,
    registration_id: i64,
) -> Result<()> {
    let Some(reason) = &message.text else {
        return reply(app, actor, message.message_id, "event_admin_prompts.enter_reject_reason").await;
    };
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;

    let Some(RegistrationWithEvent { registration, event }) = app
        .store
        .delete_pending_registration(registration_id)
        .await?
    else {
        return reply(
            app,
            actor,
            message.message_id,
            "event_admin_prompts.registration_not_found",
        )
        .await;
    };

    log_registration_action(registration.id, event.id, registration.user_id, "rejected");
    log_admin_action(
        actor.user_id,
        "reject_registration",
        Some(&registration.id.to_string()),
        Some(reason),
    );

    let text = app.i18n.t_args(
        "event_admin_prompts.reject_registration",
        app.i18n.default_language(),
        &[("event_name", event.title.as_str()), ("decline_reason", reason.as_str())],
    );
    app.messenger
        .send_text(registration.user_id, &text, MessageOptions::default())
        .await?;

    reply(app, actor, message.message_id, "event_admin_prompts.sent").await
}
