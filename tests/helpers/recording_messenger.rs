//! In-process chat transport that records every outgoing call

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use AmiHelper::services::{MessageOptions, Messenger};
use AmiHelper::utils::errors::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    Text { chat_id: i64, message_id: i32, text: String, options: MessageOptions },
    Photo { chat_id: i64, message_id: i32, photo: String, caption: String, options: MessageOptions },
    Edit { chat_id: i64, message_id: i32, text: String, options: MessageOptions },
    ClearKeyboard { chat_id: i64, message_id: i32 },
    Delete { chat_id: i64, message_id: i32 },
    ApproveJoin { chat_id: i64, user_id: i64 },
    DeclineJoin { chat_id: i64, user_id: i64 },
}

impl Outgoing {
    /// Text or caption of anything that renders a message
    pub fn body(&self) -> Option<&str> {
        match self {
            Outgoing::Text { text, .. } | Outgoing::Edit { text, .. } => Some(text),
            Outgoing::Photo { caption, .. } => Some(caption),
            _ => None,
        }
    }

    pub fn options(&self) -> Option<&MessageOptions> {
        match self {
            Outgoing::Text { options, .. }
            | Outgoing::Photo { options, .. }
            | Outgoing::Edit { options, .. } => Some(options),
            _ => None,
        }
    }

    pub fn chat_id(&self) -> i64 {
        match self {
            Outgoing::Text { chat_id, .. }
            | Outgoing::Photo { chat_id, .. }
            | Outgoing::Edit { chat_id, .. }
            | Outgoing::ClearKeyboard { chat_id, .. }
            | Outgoing::Delete { chat_id, .. }
            | Outgoing::ApproveJoin { chat_id, .. }
            | Outgoing::DeclineJoin { chat_id, .. } => *chat_id,
        }
    }
}

/// Messenger double: sent messages get increasing ids starting at 1000
#[derive(Debug)]
pub struct RecordingMessenger {
    log: Mutex<Vec<Outgoing>>,
    next_id: AtomicI32,
}

impl Default for RecordingMessenger {
    fn default() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1000),
        }
    }
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, outgoing: Outgoing) {
        self.log.lock().unwrap().push(outgoing);
    }

    fn allocate_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn outgoing(&self) -> Vec<Outgoing> {
        self.log.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        self.log.lock().unwrap().clear();
    }

    /// Everything rendered into a chat, in order
    pub fn bodies_for(&self, chat_id: i64) -> Vec<String> {
        self.outgoing()
            .iter()
            .filter(|o| o.chat_id() == chat_id)
            .filter_map(|o| o.body().map(str::to_string))
            .collect()
    }

    pub fn last_for(&self, chat_id: i64) -> Option<Outgoing> {
        self.outgoing()
            .into_iter()
            .filter(|o| o.chat_id() == chat_id && o.body().is_some())
            .last()
    }

    pub fn last_body_for(&self, chat_id: i64) -> Option<String> {
        self.last_for(chat_id)
            .and_then(|o| o.body().map(str::to_string))
    }

    /// Callback payloads of the last rendered message in a chat
    pub fn last_callbacks_for(&self, chat_id: i64) -> Vec<String> {
        self.last_for(chat_id)
            .and_then(|o| o.options().and_then(|opts| opts.keyboard.clone()))
            .map(|keyboard| keyboard.callbacks().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Id of the last message sent (not edited) into a chat
    pub fn last_sent_id(&self, chat_id: i64) -> Option<i32> {
        self.outgoing().iter().rev().find_map(|o| match o {
            Outgoing::Text { chat_id: c, message_id, .. }
            | Outgoing::Photo { chat_id: c, message_id, .. }
                if *c == chat_id =>
            {
                Some(*message_id)
            }
            _ => None,
        })
    }

    pub fn messages_to(&self, chat_id: i64) -> usize {
        self.outgoing()
            .iter()
            .filter(|o| matches!(o, Outgoing::Text { chat_id: c, .. } | Outgoing::Photo { chat_id: c, .. } if *c == chat_id))
            .count()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, chat_id: i64, text: &str, options: MessageOptions) -> Result<i32> {
        let message_id = self.allocate_id();
        self.record(Outgoing::Text { chat_id, message_id, text: text.to_string(), options });
        Ok(message_id)
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: &str,
        caption: &str,
        options: MessageOptions,
    ) -> Result<i32> {
        let message_id = self.allocate_id();
        self.record(Outgoing::Photo {
            chat_id,
            message_id,
            photo: photo.to_string(),
            caption: caption.to_string(),
            options,
        });
        Ok(message_id)
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        options: MessageOptions,
    ) -> Result<()> {
        self.record(Outgoing::Edit { chat_id, message_id, text: text.to_string(), options });
        Ok(())
    }

    async fn clear_keyboard(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.record(Outgoing::ClearKeyboard { chat_id, message_id });
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.record(Outgoing::Delete { chat_id, message_id });
        Ok(())
    }

    async fn approve_join_request(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.record(Outgoing::ApproveJoin { chat_id, user_id });
        Ok(())
    }

    async fn decline_join_request(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.record(Outgoing::DeclineJoin { chat_id, user_id });
        Ok(())
    }
}
