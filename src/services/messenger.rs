//! Chat transport abstraction
//!
//! Flows talk to Telegram through the [`Messenger`] trait so that they can be
//! driven without a live Bot API. [`TelegramMessenger`] is the teloxide-backed
//! implementation.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, KeyboardButton,
    KeyboardMarkup, LinkPreviewOptions, MessageId, ParseMode, ReplyMarkup, ReplyParameters,
    UserId,
};
use tracing::{debug, warn};

use crate::utils::errors::Result;

/// What pressing a button does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Callback(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::Url(url.into()),
        }
    }

    pub fn callback_data(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Callback(data) => Some(data),
            ButtonAction::Url(_) => None,
        }
    }
}

/// Keyboard attached to an outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Inline buttons under the message
    Inline(Vec<Vec<Button>>),
    /// Persistent reply keyboard with plain text buttons
    MainMenu(Vec<Vec<String>>),
}

impl Keyboard {
    /// Every callback payload on an inline keyboard, row by row
    pub fn callbacks(&self) -> Vec<&str> {
        match self {
            Keyboard::Inline(rows) => rows
                .iter()
                .flatten()
                .filter_map(Button::callback_data)
                .collect(),
            Keyboard::MainMenu(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOptions {
    pub keyboard: Option<Keyboard>,
    pub reply_to: Option<i32>,
    /// Send as MarkdownV2
    pub markdown: bool,
    pub disable_preview: bool,
}

impl MessageOptions {
    pub fn with_keyboard(keyboard: Keyboard) -> Self {
        Self {
            keyboard: Some(keyboard),
            ..Self::default()
        }
    }

    pub fn markdown(mut self) -> Self {
        self.markdown = true;
        self
    }

    pub fn reply_to(mut self, message_id: i32) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    pub fn without_preview(mut self) -> Self {
        self.disable_preview = true;
        self
    }
}

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a text message and return its id
    async fn send_text(&self, chat_id: i64, text: &str, options: MessageOptions) -> Result<i32>;
    /// Send a photo by Telegram file id and return the message id
    async fn send_photo(
        &self,
        chat_id: i64,
        photo: &str,
        caption: &str,
        options: MessageOptions,
    ) -> Result<i32>;
    /// Replace the text of a message; only inline keyboards can be attached
    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        options: MessageOptions,
    ) -> Result<()>;
    async fn clear_keyboard(&self, chat_id: i64, message_id: i32) -> Result<()>;
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()>;
    async fn approve_join_request(&self, chat_id: i64, user_id: i64) -> Result<()>;
    async fn decline_join_request(&self, chat_id: i64, user_id: i64) -> Result<()>;
}

/// Teloxide-based implementation of [`Messenger`]
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn inline_markup(rows: &[Vec<Button>]) -> InlineKeyboardMarkup {
    let rows = rows
        .iter()
        .map(|row| {
            row.iter()
                .filter_map(|button| match &button.action {
                    ButtonAction::Callback(data) => {
                        Some(InlineKeyboardButton::callback(button.text.clone(), data.clone()))
                    }
                    ButtonAction::Url(link) => match url::Url::parse(link) {
                        Ok(link) => Some(InlineKeyboardButton::url(button.text.clone(), link)),
                        Err(e) => {
                            warn!(url = %link, error = %e, "Skipping button with invalid URL");
                            None
                        }
                    },
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(rows)
}

fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Inline(rows) => ReplyMarkup::InlineKeyboard(inline_markup(rows)),
        Keyboard::MainMenu(rows) => {
            let rows = rows
                .iter()
                .map(|row| row.iter().map(KeyboardButton::new).collect::<Vec<_>>())
                .collect::<Vec<_>>();
            ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard())
        }
    }
}

fn disabled_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat_id: i64, text: &str, options: MessageOptions) -> Result<i32> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(keyboard) = &options.keyboard {
            request = request.reply_markup(reply_markup(keyboard));
        }
        if let Some(reply_to) = options.reply_to {
            request = request.reply_parameters(ReplyParameters::new(MessageId(reply_to)));
        }
        if options.markdown {
            request = request.parse_mode(ParseMode::MarkdownV2);
        }
        if options.disable_preview {
            request = request.link_preview_options(disabled_preview());
        }

        let sent = request.await?;
        debug!(chat_id = chat_id, message_id = sent.id.0, "Message sent");
        Ok(sent.id.0)
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: &str,
        caption: &str,
        options: MessageOptions,
    ) -> Result<i32> {
        let mut request = self
            .bot
            .send_photo(ChatId(chat_id), InputFile::file_id(photo.to_string()))
            .caption(caption);
        if let Some(keyboard) = &options.keyboard {
            request = request.reply_markup(reply_markup(keyboard));
        }
        if let Some(reply_to) = options.reply_to {
            request = request.reply_parameters(ReplyParameters::new(MessageId(reply_to)));
        }
        if options.markdown {
            request = request.parse_mode(ParseMode::MarkdownV2);
        }

        let sent = request.await?;
        debug!(chat_id = chat_id, message_id = sent.id.0, "Photo sent");
        Ok(sent.id.0)
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        options: MessageOptions,
    ) -> Result<()> {
        let mut request = self
            .bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id), text);
        if let Some(Keyboard::Inline(rows)) = &options.keyboard {
            request = request.reply_markup(inline_markup(rows));
        }
        if options.markdown {
            request = request.parse_mode(ParseMode::MarkdownV2);
        }
        if options.disable_preview {
            request = request.link_preview_options(disabled_preview());
        }

        request.await?;
        Ok(())
    }

    async fn clear_keyboard(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .edit_message_reply_markup(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }

    async fn approve_join_request(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.bot
            .approve_chat_join_request(ChatId(chat_id), UserId(user_id as u64))
            .await?;
        Ok(())
    }

    async fn decline_join_request(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.bot
            .decline_chat_join_request(ChatId(chat_id), UserId(user_id as u64))
            .await?;
        Ok(())
    }
}
