//! Profile summary, profile editing and the "my events" listing

use tracing::debug;

use super::{keyboards, Actor, App, IncomingMessage};
use crate::models::{Gender, User};
use crate::services::{MessageOptions, Messenger};
use crate::state::{Dialogue, ProfileForm, ProfileStep};
use crate::utils::errors::Result;
use crate::utils::helpers::{escape_markdown, event_caption, or_dash};
use crate::utils::logging::log_user_action;

const MY_EVENTS_LIMIT: i64 = 5;

fn summary(app: &App, actor: &Actor, user: &User) -> String {
    let gender = match user.gender {
        Some(gender) => app.t(actor, &format!("gender.{}", gender.as_str())),
        None => "-".to_string(),
    };
    let username = or_dash(user.username.as_deref());
    let full_name = or_dash(user.full_name.as_deref());
    let instagram = or_dash(user.instagram.as_deref());
    let academic_group = or_dash(user.academic_group.as_deref());
    app.t_args(
        actor,
        "profile_prompts.profile_details",
        &[
            ("username", username.as_str()),
            ("full_name", full_name.as_str()),
            ("instagram", instagram.as_str()),
            ("academic_group", academic_group.as_str()),
            ("gender", gender.as_str()),
        ],
    )
}

async fn current_user(app: &App, actor: &Actor) -> Result<User> {
    match app.store.find_user(actor.user_id).await? {
        Some(user) => Ok(user),
        None => app.store.ensure_user(actor.user_id, actor.username.clone()).await,
    }
}

/// Entry from the main menu: reply with the profile summary
pub async fn show(app: &App, actor: &Actor, message_id: i32) -> Result<()> {
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;
    let user = current_user(app, actor).await?;
    let options = MessageOptions::with_keyboard(keyboards::profile(&app.i18n, &actor.language))
        .reply_to(message_id);
    app.send(actor, &summary(app, actor, &user), options).await?;
    Ok(())
}

pub async fn back_to_profile(app: &App, actor: &Actor, message_id: i32) -> Result<()> {
    let user = current_user(app, actor).await?;
    let options = MessageOptions::with_keyboard(keyboards::profile(&app.i18n, &actor.language));
    app.edit(actor, message_id, &summary(app, actor, &user), options)
        .await
}

pub async fn manage(app: &App, actor: &Actor, message_id: i32) -> Result<()> {
    let form = ProfileForm::new(Some(message_id));
    let prompt = app.t(actor, form.step.prompt_key());
    app.set_dialogue(actor.chat_id, Dialogue::Profile(form)).await?;

    let options = MessageOptions::with_keyboard(keyboards::skip_question(&app.i18n, &actor.language));
    app.edit(actor, message_id, &prompt, options).await
}

/// Free text while editing: hold the answer until it is confirmed
pub async fn on_message(
    app: &App,
    actor: &Actor,
    message: &IncomingMessage,
    mut form: ProfileForm,
) -> Result<()> {
    let text = match (&message.text, form.step) {
        (Some(text), step) if step != ProfileStep::Gender => text.clone(),
        _ => return app.use_keyboard(actor).await,
    };

    if let Some(prompt_id) = form.prompt_message_id {
        app.strip_keyboard(actor.chat_id, prompt_id).await;
    }

    let reply = app.t_args(actor, "profile_prompts.validate_data", &[("data", text.as_str())]);
    form.reply_info = Some(text);
    let options = MessageOptions::with_keyboard(keyboards::validate(&app.i18n, &actor.language))
        .reply_to(message.message_id);
    let sent = app.send(actor, &reply, options).await?;

    form.prompt_message_id = Some(sent);
    app.set_dialogue(actor.chat_id, Dialogue::Profile(form)).await
}

pub async fn validate(app: &App, actor: &Actor, message_id: i32, dialogue: Dialogue) -> Result<()> {
    let mut form = match dialogue {
        Dialogue::Profile(form) if form.step != ProfileStep::Gender => form,
        _ => {
            let text = app.t(actor, "prompts.use_keyboard");
            return app.edit(actor, message_id, &text, MessageOptions::default()).await;
        }
    };

    form.commit_reply();
    let prompt = app.t(actor, form.step.prompt_key());

    if form.step == ProfileStep::Gender {
        app.strip_keyboard(actor.chat_id, message_id).await;
        let options = MessageOptions::with_keyboard(keyboards::gender(&app.i18n, &actor.language));
        let sent = app.send(actor, &prompt, options).await?;
        form.prompt_message_id = Some(sent);
    } else {
        let options =
            MessageOptions::with_keyboard(keyboards::skip_question(&app.i18n, &actor.language));
        app.edit(actor, message_id, &prompt, options).await?;
        form.prompt_message_id = Some(message_id);
    }

    app.set_dialogue(actor.chat_id, Dialogue::Profile(form)).await
}

pub async fn try_again(app: &App, actor: &Actor, message_id: i32, dialogue: Dialogue) -> Result<()> {
    match dialogue {
        Dialogue::Profile(mut form) if form.step != ProfileStep::Gender => {
            form.reply_info = None;
            form.prompt_message_id = Some(message_id);
            let prompt = app.t(actor, form.step.prompt_key());
            let options =
                MessageOptions::with_keyboard(keyboards::skip_question(&app.i18n, &actor.language));
            app.edit(actor, message_id, &prompt, options).await?;
            app.set_dialogue(actor.chat_id, Dialogue::Profile(form)).await
        }
        _ => {
            let text = app.t(actor, "prompts.unknown_state");
            app.edit(actor, message_id, &text, MessageOptions::default()).await
        }
    }
}

/// Skip and gender buttons inside the editing flow
pub async fn on_answer(
    app: &App,
    actor: &Actor,
    message_id: i32,
    answer: &str,
    mut form: ProfileForm,
) -> Result<()> {
    match (form.step, answer) {
        (ProfileStep::Gender, keyboards::MALE | keyboards::FEMALE | keyboards::SKIP_QUESTION) => {
            commit(app, actor, message_id, form, Gender::from_callback(answer)).await
        }
        (_, keyboards::SKIP_QUESTION) => {
            form.reply_info = None;
            form.prompt_message_id = Some(message_id);
            let text = app.t(actor, "profile_prompts.validate_skip_data");
            let options =
                MessageOptions::with_keyboard(keyboards::validate(&app.i18n, &actor.language));
            app.edit(actor, message_id, &text, options).await?;
            app.set_dialogue(actor.chat_id, Dialogue::Profile(form)).await
        }
        (step, _) => {
            debug!(chat_id = actor.chat_id, step = ?step, answer = answer, "Unexpected profile answer");
            Ok(())
        }
    }
}

async fn commit(
    app: &App,
    actor: &Actor,
    message_id: i32,
    form: ProfileForm,
    gender: Option<Gender>,
) -> Result<()> {
    app.strip_keyboard(actor.chat_id, message_id).await;

    let user = app
        .store
        .update_profile(actor.user_id, form.into_update(gender))
        .await?;
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;
    log_user_action(actor.user_id, "profile_updated", None);

    let text = format!(
        "{}\n\n{}",
        app.t(actor, "profile_prompts.profile_updated"),
        summary(app, actor, &user)
    );
    app.send(actor, &text, MessageOptions::default()).await?;
    Ok(())
}

async fn my_events_listing(app: &App, actor: &Actor) -> Result<(String, MessageOptions)> {
    let registrations = app
        .store
        .list_user_registrations(actor.user_id, MY_EVENTS_LIMIT)
        .await?;
    let keyboard = keyboards::my_events(&app.i18n, &actor.language, &registrations);
    Ok((
        app.t(actor, "profile_prompts.my_events"),
        MessageOptions::with_keyboard(keyboard),
    ))
}

pub async fn my_events(app: &App, actor: &Actor, message_id: i32) -> Result<()> {
    let (text, options) = my_events_listing(app, actor).await?;
    app.edit(actor, message_id, &text, options).await
}

pub async fn my_event_back(app: &App, actor: &Actor, message_id: i32) -> Result<()> {
    app.discard_message(actor.chat_id, message_id).await;
    let (text, options) = my_events_listing(app, actor).await?;
    app.send(actor, &text, options).await?;
    Ok(())
}

/// Card of one of the user's own registrations with its approval status
pub async fn my_event_card(
    app: &App,
    actor: &Actor,
    message_id: i32,
    registration_id: i64,
) -> Result<()> {
    app.discard_message(actor.chat_id, message_id).await;
    let back = MessageOptions::with_keyboard(keyboards::my_event_back(&app.i18n, &actor.language));

    let registration = app
        .store
        .find_registration_by_id(registration_id)
        .await?
        .filter(|registration| registration.user_id == actor.user_id);
    let event = match &registration {
        Some(registration) => app.store.find_event(registration.event_id).await?,
        None => None,
    };

    let (Some(registration), Some(event)) = (registration, event) else {
        app.send(actor, &app.t(actor, "profile_prompts.registration_missing"), back)
            .await?;
        return Ok(());
    };

    let status = if registration.is_approved {
        app.t(actor, "profile_prompts.registration_approved")
    } else {
        app.t(actor, "profile_prompts.registration_awaiting_approval")
    };
    let caption = format!(
        "{}\n\n*{}*",
        event_caption(&event.title, &event.description),
        escape_markdown(&status)
    );

    send_card(app.messenger.as_ref(), actor.chat_id, event.photo.as_deref(), &caption, back.markdown())
        .await?;
    Ok(())
}

/// Send a MarkdownV2 card as a photo, or as text when the event has no photo
pub(crate) async fn send_card(
    messenger: &dyn Messenger,
    chat_id: i64,
    photo: Option<&str>,
    caption: &str,
    options: MessageOptions,
) -> Result<i32> {
    match photo {
        Some(photo) => messenger.send_photo(chat_id, photo, caption, options).await,
        None => messenger.send_text(chat_id, caption, options).await,
    }
}
