//! Teloxide-backed transport against a mocked Bot API

use assert_matches::assert_matches;
use serde_json::json;
use AmiHelper::services::{Button, Keyboard, MessageOptions, Messenger, TelegramMessenger};
use AmiHelper::utils::errors::AmiHelperError;

use crate::helpers::*;

#[tokio::test]
async fn test_send_text_with_inline_keyboard_and_markdown() {
    let mock = TelegramMockServer::new().await;
    mock.mock_method_expecting(
        "SendMessage",
        "\"parse_mode\":\"MarkdownV2\"",
        TelegramMockServer::message_json(42, 321, "*Hi*"),
        1,
    )
    .await;
    let messenger = TelegramMessenger::new(mock.bot());

    let keyboard = Keyboard::Inline(vec![vec![
        Button::callback("Yes", "yes"),
        Button::url("Chat", "https://t.me/+abc"),
    ]]);
    let options = MessageOptions::with_keyboard(keyboard).markdown().reply_to(7);
    let id = messenger.send_text(42, "*Hi*", options).await.unwrap();

    assert_eq!(id, 321);
    let body = &mock.received_bodies("SendMessage").await[0];
    assert!(body.contains("\"callback_data\":\"yes\""));
    assert!(body.contains("https://t.me/+abc"));
    assert!(body.contains("\"message_id\":7"));
}

#[tokio::test]
async fn test_main_menu_is_a_resized_reply_keyboard() {
    let mock = TelegramMockServer::new().await;
    mock.mock_method("SendMessage", TelegramMockServer::message_json(42, 5, "Hi"))
        .await;
    let messenger = TelegramMessenger::new(mock.bot());

    let keyboard = Keyboard::MainMenu(vec![vec!["Profile".to_string(), "Events".to_string()]]);
    messenger
        .send_text(42, "Hi", MessageOptions::with_keyboard(keyboard))
        .await
        .unwrap();

    let body = &mock.received_bodies("SendMessage").await[0];
    assert!(body.contains("\"resize_keyboard\":true"));
    assert!(body.contains("Profile"));
}

#[tokio::test]
async fn test_send_photo_returns_message_id() {
    let mock = TelegramMockServer::new().await;
    mock.mock_method("SendPhoto", TelegramMockServer::photo_message_json(42, 77, "Card"))
        .await;
    let messenger = TelegramMessenger::new(mock.bot());

    let id = messenger
        .send_photo(42, "AgACAgIAAxk", "Card", MessageOptions::default())
        .await
        .unwrap();

    assert_eq!(id, 77);
    let bodies = mock.received_bodies("SendPhoto").await;
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].contains("AgACAgIAAxk"));
    assert!(bodies[0].contains("Card"));
}

#[tokio::test]
async fn test_edit_clear_and_delete() {
    let mock = TelegramMockServer::new().await;
    mock.mock_method("EditMessageText", TelegramMockServer::message_json(42, 5, "Edited"))
        .await;
    mock.mock_method("EditMessageReplyMarkup", TelegramMockServer::message_json(42, 5, "Edited"))
        .await;
    mock.mock_method("DeleteMessage", json!(true)).await;
    let messenger = TelegramMessenger::new(mock.bot());

    messenger
        .edit_text(42, 5, "Edited", MessageOptions::default().without_preview())
        .await
        .unwrap();
    messenger.clear_keyboard(42, 5).await.unwrap();
    messenger.delete_message(42, 5).await.unwrap();

    let edit = &mock.received_bodies("EditMessageText").await[0];
    assert!(edit.contains("\"is_disabled\":true"));
    assert_eq!(mock.received_bodies("EditMessageReplyMarkup").await.len(), 1);
    assert_eq!(mock.received_bodies("DeleteMessage").await.len(), 1);
}

#[tokio::test]
async fn test_join_request_decisions() {
    let mock = TelegramMockServer::new().await;
    mock.mock_method_expecting("ApproveChatJoinRequest", "\"user_id\":42", json!(true), 1)
        .await;
    mock.mock_method_expecting("DeclineChatJoinRequest", "\"user_id\":43", json!(true), 1)
        .await;
    let messenger = TelegramMessenger::new(mock.bot());

    messenger.approve_join_request(-10011, 42).await.unwrap();
    messenger.decline_join_request(-10011, 43).await.unwrap();
}

#[tokio::test]
async fn test_api_errors_surface_as_telegram_errors() {
    let mock = TelegramMockServer::new().await;
    mock.mock_error("SendMessage", 400, "Bad Request: chat not found").await;
    let messenger = TelegramMessenger::new(mock.bot());

    let result = messenger.send_text(42, "Hi", MessageOptions::default()).await;

    assert_matches!(result, Err(AmiHelperError::Telegram(_)));
}
