//! Conversational flows
//!
//! Each update is routed to one transition: the dispatcher loads the chat's
//! [`Dialogue`], matches the trigger against it, lets the flow module act and
//! persists whatever dialogue the transition leaves behind.

pub mod approval;
pub mod creation;
pub mod faq;
pub mod join_request;
pub mod keyboards;
pub mod main_menu;
pub mod profile;
pub mod registration;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::database::BotStore;
use crate::handlers::Command;
use crate::i18n::I18n;
use crate::services::{AuthService, MessageOptions, Messenger};
use crate::state::{ConversationContext, Dialogue, StateStore};
use crate::utils::errors::Result;
use crate::utils::helpers::parse_callback_id;
use crate::utils::logging::log_admin_action;

/// Who sent the update and where to answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub chat_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub language: String,
}

/// A plain message: text, photo or anything else
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingMessage {
    pub message_id: i32,
    pub text: Option<String>,
    /// File id of the first photo size variant
    pub photo: Option<String>,
}

impl IncomingMessage {
    pub fn text(message_id: i32, text: impl Into<String>) -> Self {
        Self {
            message_id,
            text: Some(text.into()),
            photo: None,
        }
    }
}

/// Callback payload routes, parsed from inline button data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackRoute {
    Close,
    ManageProfile,
    MyEvents,
    MyEventSelect(i64),
    MyEventBack,
    ProfileBack,
    Validate,
    TryAgain,
    EventSelect(i64),
    EventRegister(i64),
    EventRegistrationBack,
    FaqSelect(i64),
    FaqBack,
    /// Answers whose meaning depends on the active dialogue
    Answer(String),
}

impl CallbackRoute {
    pub fn parse(data: &str) -> Self {
        use keyboards as kb;

        match data {
            kb::CLOSE => return CallbackRoute::Close,
            kb::MANAGE_PROFILE => return CallbackRoute::ManageProfile,
            kb::MY_EVENTS => return CallbackRoute::MyEvents,
            kb::MY_EVENT_BACK => return CallbackRoute::MyEventBack,
            kb::PROFILE_BACK => return CallbackRoute::ProfileBack,
            kb::VALIDATE => return CallbackRoute::Validate,
            kb::TRY_AGAIN => return CallbackRoute::TryAgain,
            kb::FAQ_BACK => return CallbackRoute::FaqBack,
            _ => {}
        }

        if data.starts_with(kb::EVENT_REGISTRATION_BACK) {
            CallbackRoute::EventRegistrationBack
        } else if let Some(id) = parse_callback_id(data, kb::MY_EVENT_SELECT) {
            CallbackRoute::MyEventSelect(id)
        } else if let Some(id) = parse_callback_id(data, kb::EVENT_SELECT) {
            CallbackRoute::EventSelect(id)
        } else if let Some(id) = parse_callback_id(data, kb::EVENT_REGISTER) {
            CallbackRoute::EventRegister(id)
        } else if let Some(id) = parse_callback_id(data, kb::FAQ_SELECT) {
            CallbackRoute::FaqSelect(id)
        } else {
            CallbackRoute::Answer(data.to_string())
        }
    }
}

/// Everything a transition needs
#[derive(Clone)]
pub struct App {
    pub store: Arc<dyn BotStore>,
    pub messenger: Arc<dyn Messenger>,
    pub states: Arc<dyn StateStore>,
    pub i18n: Arc<I18n>,
    pub auth: AuthService,
    pub state_ttl_seconds: u64,
}

impl App {
    pub fn new(
        store: Arc<dyn BotStore>,
        messenger: Arc<dyn Messenger>,
        states: Arc<dyn StateStore>,
        i18n: Arc<I18n>,
        auth: AuthService,
        state_ttl_seconds: u64,
    ) -> Self {
        Self {
            store,
            messenger,
            states,
            i18n,
            auth,
            state_ttl_seconds,
        }
    }

    /// Route a bot command
    pub async fn dispatch_command(
        &self,
        actor: &Actor,
        message_id: i32,
        command: Command,
    ) -> Result<()> {
        let user = self
            .store
            .ensure_user(actor.user_id, actor.username.clone())
            .await?;

        match command {
            Command::Start(payload) => main_menu::start(self, actor, &payload).await,
            Command::Help => main_menu::help(self, actor).await,
            admin_command => {
                if !self.auth.is_admin(&user) {
                    warn!(
                        user_id = actor.user_id,
                        command = ?admin_command,
                        "Ignoring admin command from non-admin"
                    );
                    return Ok(());
                }
                log_admin_action(actor.user_id, &format!("{:?}", admin_command), None, None);

                match admin_command {
                    Command::EventCreation => creation::start(self, actor, message_id).await,
                    Command::ApproveEventRegistration(args) => {
                        approval::approve(self, actor, message_id, &args).await
                    }
                    Command::RejectEventRegistration(args) => {
                        approval::reject(self, actor, message_id, &args).await
                    }
                    Command::Start(_) | Command::Help => Ok(()),
                }
            }
        }
    }

    /// Route a non-command message; main menu buttons win over any dialogue
    pub async fn dispatch_message(&self, actor: &Actor, message: IncomingMessage) -> Result<()> {
        self.store
            .ensure_user(actor.user_id, actor.username.clone())
            .await?;

        if let Some(entry) = message
            .text
            .as_deref()
            .and_then(|text| main_menu::MenuEntry::from_text(&self.i18n, text))
        {
            return main_menu::open(self, actor, message.message_id, entry).await;
        }

        match self.dialogue(actor.chat_id).await? {
            Dialogue::Profile(form) => profile::on_message(self, actor, &message, form).await,
            Dialogue::Registration(draft) => {
                registration::on_message(self, actor, &message, draft).await
            }
            Dialogue::EventCreation(form) => creation::on_message(self, actor, &message, form).await,
            Dialogue::Rejection { registration_id } => {
                approval::on_reject_reason(self, actor, &message, registration_id).await
            }
            dialogue @ (Dialogue::Idle | Dialogue::Faq(_)) => {
                debug!(chat_id = actor.chat_id, flow = dialogue.name(), "Ignoring free text");
                Ok(())
            }
        }
    }

    /// Route an inline button press on message `message_id`
    pub async fn dispatch_callback(&self, actor: &Actor, message_id: i32, data: &str) -> Result<()> {
        self.store
            .ensure_user(actor.user_id, actor.username.clone())
            .await?;

        let route = CallbackRoute::parse(data);
        debug!(chat_id = actor.chat_id, route = ?route, "Routing callback");

        match route {
            CallbackRoute::Close => main_menu::close(self, actor, message_id).await,
            CallbackRoute::ManageProfile => profile::manage(self, actor, message_id).await,
            CallbackRoute::MyEvents => profile::my_events(self, actor, message_id).await,
            CallbackRoute::MyEventSelect(id) => {
                profile::my_event_card(self, actor, message_id, id).await
            }
            CallbackRoute::MyEventBack => profile::my_event_back(self, actor, message_id).await,
            CallbackRoute::ProfileBack => profile::back_to_profile(self, actor, message_id).await,
            CallbackRoute::Validate => {
                let dialogue = self.dialogue(actor.chat_id).await?;
                profile::validate(self, actor, message_id, dialogue).await
            }
            CallbackRoute::TryAgain => {
                let dialogue = self.dialogue(actor.chat_id).await?;
                profile::try_again(self, actor, message_id, dialogue).await
            }
            CallbackRoute::EventSelect(id) => {
                registration::select_event(self, actor, message_id, id).await
            }
            CallbackRoute::EventRegister(id) => {
                registration::register(self, actor, message_id, id).await
            }
            CallbackRoute::EventRegistrationBack => {
                registration::back_to_list(self, actor, message_id).await
            }
            CallbackRoute::FaqSelect(id) => {
                let dialogue = self.dialogue(actor.chat_id).await?;
                faq::select(self, actor, message_id, id, dialogue).await
            }
            CallbackRoute::FaqBack => {
                let dialogue = self.dialogue(actor.chat_id).await?;
                faq::back(self, actor, message_id, dialogue).await
            }
            CallbackRoute::Answer(answer) => match self.dialogue(actor.chat_id).await? {
                Dialogue::Profile(form) => {
                    profile::on_answer(self, actor, message_id, &answer, form).await
                }
                Dialogue::Registration(draft) => {
                    registration::on_answer(self, actor, message_id, &answer, draft).await
                }
                Dialogue::EventCreation(form) => {
                    creation::on_answer(self, actor, message_id, &answer, form).await
                }
                dialogue => {
                    debug!(
                        chat_id = actor.chat_id,
                        flow = dialogue.name(),
                        data = %answer,
                        "Ignoring callback outside its flow"
                    );
                    Ok(())
                }
            },
        }
    }

    /// Decide a chat join request
    pub async fn dispatch_join_request(&self, chat_id: i64, user_id: i64) -> Result<()> {
        join_request::decide(self, chat_id, user_id).await
    }

    /// Current dialogue of a chat, `Idle` when none is stored
    pub async fn dialogue(&self, chat_id: i64) -> Result<Dialogue> {
        Ok(self
            .states
            .load(chat_id)
            .await?
            .map(|context| context.dialogue)
            .unwrap_or_default())
    }

    /// Persist the dialogue left by a transition; `Idle` clears the context
    pub async fn set_dialogue(&self, chat_id: i64, dialogue: Dialogue) -> Result<()> {
        if dialogue.is_idle() {
            return self.states.clear(chat_id).await;
        }
        let context = ConversationContext::new(chat_id, dialogue).expire_in(self.state_ttl_seconds);
        self.states.save(&context).await
    }

    pub(crate) fn t(&self, actor: &Actor, key: &str) -> String {
        self.i18n.t(key, &actor.language, None)
    }

    pub(crate) fn t_args(&self, actor: &Actor, key: &str, args: &[(&str, &str)]) -> String {
        self.i18n.t_args(key, &actor.language, args)
    }

    pub(crate) async fn send(&self, actor: &Actor, text: &str, options: MessageOptions) -> Result<i32> {
        self.messenger.send_text(actor.chat_id, text, options).await
    }

    pub(crate) async fn edit(
        &self,
        actor: &Actor,
        message_id: i32,
        text: &str,
        options: MessageOptions,
    ) -> Result<()> {
        self.messenger
            .edit_text(actor.chat_id, message_id, text, options)
            .await
    }

    /// Best effort: strip the inline keyboard of a message
    pub(crate) async fn strip_keyboard(&self, chat_id: i64, message_id: i32) {
        if let Err(e) = self.messenger.clear_keyboard(chat_id, message_id).await {
            warn!(chat_id = chat_id, message_id = message_id, error = %e, "Failed to strip keyboard");
        }
    }

    /// Best effort: delete a message
    pub(crate) async fn discard_message(&self, chat_id: i64, message_id: i32) {
        if let Err(e) = self.messenger.delete_message(chat_id, message_id).await {
            warn!(chat_id = chat_id, message_id = message_id, error = %e, "Failed to delete message");
        }
    }

    pub(crate) async fn use_keyboard(&self, actor: &Actor) -> Result<()> {
        self.send(actor, &self.t(actor, "prompts.use_keyboard"), MessageOptions::default())
            .await?;
        Ok(())
    }
}
