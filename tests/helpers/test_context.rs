//! Test application wiring
//!
//! Builds an [`App`] over the in-memory store, in-memory conversation state and
//! a recording messenger, with the shipped translation files.

use std::path::PathBuf;
use std::sync::{Arc, Once};

use AmiHelper::config::{BotConfig, I18nConfig};
use AmiHelper::database::{BotStore, MemoryStore};
use AmiHelper::flows::{Actor, App, IncomingMessage};
use AmiHelper::handlers::Command;
use AmiHelper::i18n::I18n;
use AmiHelper::services::AuthService;
use AmiHelper::state::{Dialogue, MemoryStateStorage, StateStore};

use super::RecordingMessenger;

pub const ADMIN_ID: i64 = 1000;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

pub async fn load_i18n() -> I18n {
    let mut i18n = I18n::new(&I18nConfig {
        default_language: "uk".to_string(),
        supported_languages: vec!["uk".to_string(), "en".to_string()],
        translations_dir: "translations".to_string(),
    });
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("translations");
    i18n.load_translations(dir)
        .await
        .expect("Failed to load translations");
    i18n
}

pub struct TestApp {
    pub app: App,
    pub store: Arc<MemoryStore>,
    pub messenger: Arc<RecordingMessenger>,
    pub states: Arc<MemoryStateStorage>,
    pub i18n: Arc<I18n>,
    next_message_id: std::sync::atomic::AtomicI32,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_store(|store| store).await
    }

    /// Let the app see the in-memory store through another [`BotStore`]
    pub async fn with_store(wrap: impl FnOnce(Arc<MemoryStore>) -> Arc<dyn BotStore>) -> Self {
        init_test_logging();

        let store = Arc::new(MemoryStore::new());
        let messenger = Arc::new(RecordingMessenger::new());
        let states = Arc::new(MemoryStateStorage::new());
        let i18n = Arc::new(load_i18n().await);
        let auth = AuthService::new(&BotConfig {
            token: "test_token".to_string(),
            webhook_url: None,
            admin_ids: vec![ADMIN_ID],
        });

        let app = App::new(
            wrap(store.clone()),
            messenger.clone(),
            states.clone(),
            i18n.clone(),
            auth,
            3600,
        );

        Self {
            app,
            store,
            messenger,
            states,
            i18n,
            next_message_id: std::sync::atomic::AtomicI32::new(1),
        }
    }

    /// A private chat user writing in English
    pub fn actor(&self, user_id: i64) -> Actor {
        Actor {
            chat_id: user_id,
            user_id,
            username: Some(format!("user{}", user_id)),
            language: "en".to_string(),
        }
    }

    pub fn admin(&self) -> Actor {
        self.actor(ADMIN_ID)
    }

    pub fn en(&self, key: &str) -> String {
        self.i18n.t(key, "en", None)
    }

    pub fn en_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.i18n.t_args(key, "en", args)
    }

    /// Text of `key` in the default language, used for notifications
    pub fn default_lang(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.i18n.t_args(key, self.i18n.default_language(), args)
    }

    fn incoming_id(&self) -> i32 {
        self.next_message_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }

    pub async fn say(&self, actor: &Actor, text: &str) {
        let message = IncomingMessage::text(self.incoming_id(), text);
        self.app
            .dispatch_message(actor, message)
            .await
            .expect("message dispatch failed");
    }

    pub async fn send_photo(&self, actor: &Actor, file_id: &str) {
        let message = IncomingMessage {
            message_id: self.incoming_id(),
            text: None,
            photo: Some(file_id.to_string()),
        };
        self.app
            .dispatch_message(actor, message)
            .await
            .expect("photo dispatch failed");
    }

    pub async fn press(&self, actor: &Actor, message_id: i32, data: &str) {
        self.app
            .dispatch_callback(actor, message_id, data)
            .await
            .expect("callback dispatch failed");
    }

    pub async fn command(&self, actor: &Actor, command: Command) {
        self.app
            .dispatch_command(actor, self.incoming_id(), command)
            .await
            .expect("command dispatch failed");
    }

    pub async fn dialogue(&self, actor: &Actor) -> Dialogue {
        self.states
            .load(actor.chat_id)
            .await
            .expect("state load failed")
            .map(|context| context.dialogue)
            .unwrap_or_default()
    }

    /// Make sure the user row exists, as any first update would
    pub async fn ensure_user(&self, actor: &Actor) {
        self.store
            .ensure_user(actor.user_id, actor.username.clone())
            .await
            .expect("ensure_user failed");
    }
}
