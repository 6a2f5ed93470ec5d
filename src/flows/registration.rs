//! Event listing and the registration dialogue

use tracing::{debug, warn};

use super::profile::send_card;
use super::{keyboards, Actor, App, IncomingMessage};
use crate::models::{Division, NewRegistration};
use crate::services::MessageOptions;
use crate::state::{Dialogue, RegistrationDraft, RegistrationStep};
use crate::utils::errors::Result;
use crate::utils::helpers::event_caption;
use crate::utils::logging::log_registration_action;

/// List events open for registration; resets any dialogue
pub async fn list_events(app: &App, actor: &Actor, reply_to: Option<i32>) -> Result<()> {
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;
    let events = app.store.list_open_events().await?;

    if events.is_empty() {
        app.send(
            actor,
            &app.t(actor, "event_registrations.no_events"),
            MessageOptions::default(),
        )
        .await?;
        return Ok(());
    }

    let mut options =
        MessageOptions::with_keyboard(keyboards::event_list(&app.i18n, &actor.language, &events));
    if let Some(message_id) = reply_to {
        options = options.reply_to(message_id);
    }
    app.send(actor, &app.t(actor, "event_registrations.select_event"), options)
        .await?;
    Ok(())
}

pub async fn select_event(app: &App, actor: &Actor, message_id: i32, event_id: i64) -> Result<()> {
    app.discard_message(actor.chat_id, message_id).await;
    send_event_card(app, actor, event_id, true).await
}

/// Photo card of an event with its register button
pub async fn send_event_card(app: &App, actor: &Actor, event_id: i64, with_back: bool) -> Result<()> {
    let event = match app.store.find_event(event_id).await? {
        Some(event) if event.is_registration_enabled => event,
        _ => return registration_ends(app, actor).await,
    };

    let keyboard = keyboards::event_card(&app.i18n, &actor.language, event.id, with_back);
    send_card(
        app.messenger.as_ref(),
        actor.chat_id,
        event.photo.as_deref(),
        &event_caption(&event.title, &event.description),
        MessageOptions::with_keyboard(keyboard).markdown(),
    )
    .await?;
    Ok(())
}

pub async fn back_to_list(app: &App, actor: &Actor, message_id: i32) -> Result<()> {
    app.discard_message(actor.chat_id, message_id).await;
    list_events(app, actor, None).await
}

/// Register button on an event card
pub async fn register(app: &App, actor: &Actor, message_id: i32, event_id: i64) -> Result<()> {
    app.strip_keyboard(actor.chat_id, message_id).await;

    let open = matches!(
        app.store.find_event(event_id).await?,
        Some(event) if event.is_registration_enabled
    );
    if !open {
        app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;
        return registration_ends(app, actor).await;
    }

    if app
        .store
        .find_registration(event_id, actor.user_id)
        .await?
        .is_some()
    {
        app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;
        app.send(
            actor,
            &app.t(actor, "event_registrations.already_registered"),
            MessageOptions::default(),
        )
        .await?;
        return Ok(());
    }

    app.set_dialogue(
        actor.chat_id,
        Dialogue::Registration(RegistrationDraft::new(event_id)),
    )
    .await?;
    let options = MessageOptions::with_keyboard(keyboards::yes_no(&app.i18n, &actor.language))
        .reply_to(message_id);
    app.send(actor, &app.t(actor, "event_registrations.is_ami_student"), options)
        .await?;
    Ok(())
}

/// Only the CodinGame username step takes free text
pub async fn on_message(
    app: &App,
    actor: &Actor,
    message: &IncomingMessage,
    mut draft: RegistrationDraft,
) -> Result<()> {
    let username = match (&message.text, draft.step) {
        (Some(text), RegistrationStep::CodingameUsername) => text.clone(),
        _ => return app.use_keyboard(actor).await,
    };

    draft.codingame_username = Some(username);
    draft.step = RegistrationStep::Division;
    app.set_dialogue(actor.chat_id, Dialogue::Registration(draft))
        .await?;

    let options = MessageOptions::with_keyboard(keyboards::division(&app.i18n, &actor.language));
    app.send(
        actor,
        &app.t(actor, "event_registrations.division_selection_text"),
        options,
    )
    .await?;
    Ok(())
}

pub async fn on_answer(
    app: &App,
    actor: &Actor,
    message_id: i32,
    answer: &str,
    mut draft: RegistrationDraft,
) -> Result<()> {
    match (draft.step, answer) {
        (RegistrationStep::AmiStudent, keyboards::YES | keyboards::NO) => {
            draft.is_ami_student = answer == keyboards::YES;
            draft.step = RegistrationStep::CodingameUsername;
            app.set_dialogue(actor.chat_id, Dialogue::Registration(draft))
                .await?;
            let text = app.t(actor, "event_registrations.enter_codingame_username");
            app.edit(actor, message_id, &text, MessageOptions::default())
                .await
        }
        (RegistrationStep::Division, keyboards::FIRST_DIVISION | keyboards::SECOND_DIVISION) => {
            draft.division = Some(Division::from_callback(answer));
            draft.step = RegistrationStep::PersonalDataConsent;
            app.set_dialogue(actor.chat_id, Dialogue::Registration(draft))
                .await?;
            let text = app.t(actor, "event_registrations.personal_info_processing");
            let options =
                MessageOptions::with_keyboard(keyboards::yes_only(&app.i18n, &actor.language));
            app.edit(actor, message_id, &text, options).await
        }
        (RegistrationStep::PersonalDataConsent, keyboards::YES) => {
            draft.step = RegistrationStep::MediaConsent;
            app.set_dialogue(actor.chat_id, Dialogue::Registration(draft))
                .await?;
            let text = app.t(actor, "event_registrations.media_publishing_processing");
            let options =
                MessageOptions::with_keyboard(keyboards::yes_only(&app.i18n, &actor.language));
            app.edit(actor, message_id, &text, options).await
        }
        (RegistrationStep::MediaConsent, keyboards::YES) => {
            complete(app, actor, message_id, draft).await
        }
        (step, _) => {
            debug!(chat_id = actor.chat_id, step = ?step, answer = answer, "Unexpected registration answer");
            Ok(())
        }
    }
}

/// Re-validate the event and insert the registration
async fn complete(
    app: &App,
    actor: &Actor,
    message_id: i32,
    draft: RegistrationDraft,
) -> Result<()> {
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;

    let event = match app.store.find_event(draft.event_id).await? {
        Some(event) if event.is_registration_enabled => event,
        _ => {
            let text = app.t(actor, "event_registrations.registration_ends");
            return app.edit(actor, message_id, &text, MessageOptions::default()).await;
        }
    };

    if app
        .store
        .find_registration(event.id, actor.user_id)
        .await?
        .is_some()
    {
        let text = app.t(actor, "event_registrations.already_registered");
        return app.edit(actor, message_id, &text, MessageOptions::default()).await;
    }

    let (Some(division), Some(username)) = (draft.division, draft.codingame_username) else {
        warn!(chat_id = actor.chat_id, event_id = draft.event_id, "Incomplete registration draft");
        let text = app.t(actor, "prompts.unknown_state");
        return app.edit(actor, message_id, &text, MessageOptions::default()).await;
    };

    let registration = app
        .store
        .create_registration(NewRegistration::snapshot(
            &event,
            actor.user_id,
            draft.is_ami_student,
            username,
            division,
        ))
        .await?;
    log_registration_action(registration.id, event.id, actor.user_id, "created");

    let text = app.t(actor, "event_registrations.registration_completed");
    app.edit(actor, message_id, &text, MessageOptions::default()).await
}

async fn registration_ends(app: &App, actor: &Actor) -> Result<()> {
    app.send(
        actor,
        &app.t(actor, "event_registrations.registration_ends"),
        MessageOptions::default(),
    )
    .await?;
    Ok(())
}
