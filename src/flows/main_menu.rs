//! Welcome, help and the reply keyboard entries

use super::{faq, keyboards, profile, registration, Actor, App};
use crate::i18n::I18n;
use crate::services::MessageOptions;
use crate::state::Dialogue;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Profile,
    Events,
    Faq,
    Help,
    Tumbochka,
}

impl MenuEntry {
    /// Recognize a reply keyboard button in any shipped language
    pub fn from_text(i18n: &I18n, text: &str) -> Option<Self> {
        [
            ("buttons.profile", MenuEntry::Profile),
            ("buttons.events", MenuEntry::Events),
            ("buttons.faq", MenuEntry::Faq),
            ("buttons.help", MenuEntry::Help),
            ("buttons.tumbochka", MenuEntry::Tumbochka),
        ]
        .into_iter()
        .find(|(key, _)| i18n.matches_any_language(key, text))
        .map(|(_, entry)| entry)
    }
}

pub async fn open(app: &App, actor: &Actor, message_id: i32, entry: MenuEntry) -> Result<()> {
    log_user_action(actor.user_id, "menu", Some(&format!("{:?}", entry)));
    match entry {
        MenuEntry::Profile => profile::show(app, actor, message_id).await,
        MenuEntry::Events => registration::list_events(app, actor, Some(message_id)).await,
        MenuEntry::Faq => faq::open(app, actor, message_id).await,
        MenuEntry::Help => help(app, actor).await,
        MenuEntry::Tumbochka => tumbochka(app, actor).await,
    }
}

/// Deep-link payload of `/start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPayload {
    Event(i64),
    Tumbochka,
}

impl StartPayload {
    pub fn parse(payload: &str) -> Option<Self> {
        let payload = payload.trim();
        if payload == TUMBOCHKA_PAYLOAD {
            return Some(StartPayload::Tumbochka);
        }
        payload
            .strip_prefix("event_")
            .and_then(|id| id.parse::<i64>().ok())
            .map(StartPayload::Event)
    }
}

const TUMBOCHKA_PAYLOAD: &str = "tumbochka";

/// `/start [event_<id> | tumbochka]`
pub async fn start(app: &App, actor: &Actor, payload: &str) -> Result<()> {
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;
    send_welcome(app, actor).await?;

    match StartPayload::parse(payload) {
        Some(StartPayload::Event(event_id)) => {
            registration::send_event_card(app, actor, event_id, false).await
        }
        Some(StartPayload::Tumbochka) => tumbochka(app, actor).await,
        None => Ok(()),
    }
}

/// Promotional shelf; nothing is stocked yet
pub async fn tumbochka(app: &App, actor: &Actor) -> Result<()> {
    let keyboard = keyboards::tumbochka(&app.i18n, &actor.language);
    app.send(
        actor,
        &app.t(actor, "prompts.tumbochka_empty"),
        MessageOptions::with_keyboard(keyboard),
    )
    .await?;
    Ok(())
}

pub async fn help(app: &App, actor: &Actor) -> Result<()> {
    app.send(actor, &app.t(actor, "prompts.help_message"), MessageOptions::default())
        .await?;
    Ok(())
}

pub async fn close(app: &App, actor: &Actor, message_id: i32) -> Result<()> {
    app.set_dialogue(actor.chat_id, Dialogue::Idle).await?;
    app.discard_message(actor.chat_id, message_id).await;
    send_welcome(app, actor).await
}

async fn send_welcome(app: &App, actor: &Actor) -> Result<()> {
    let keyboard = keyboards::main_menu(&app.i18n, &actor.language);
    app.send(
        actor,
        &app.t(actor, "prompts.start_message"),
        MessageOptions::with_keyboard(keyboard),
    )
    .await?;
    Ok(())
}
