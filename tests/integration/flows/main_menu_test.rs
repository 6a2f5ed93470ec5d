//! Welcome, help and close

use AmiHelper::database::BotStore;
use AmiHelper::handlers::Command;
use AmiHelper::services::Keyboard;
use AmiHelper::state::Dialogue;

use crate::helpers::*;

#[tokio::test]
async fn test_start_sends_main_menu_and_creates_user() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.command(&user, Command::Start(String::new())).await;

    let welcome = t.messenger.last_for(42).unwrap();
    assert_eq!(welcome.body().unwrap(), t.en("prompts.start_message"));
    match welcome.options().and_then(|o| o.keyboard.clone()) {
        Some(Keyboard::MainMenu(rows)) => assert_eq!(
            rows,
            vec![
                vec![t.en("buttons.profile"), t.en("buttons.events")],
                vec![t.en("buttons.faq"), t.en("buttons.help")],
                vec![t.en("buttons.tumbochka")],
            ]
        ),
        other => panic!("expected the main menu, got {:?}", other),
    }

    let stored = t.store.find_user(42).await.unwrap().unwrap();
    assert_eq!(stored.username.as_deref(), Some("user42"));
}

#[tokio::test]
async fn test_start_clears_any_dialogue() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.press(&user, 1, "manage_profile").await;
    assert!(!t.dialogue(&user).await.is_idle());

    t.command(&user, Command::Start(String::new())).await;
    assert_eq!(t.dialogue(&user).await, Dialogue::Idle);
}

#[tokio::test]
async fn test_help_button_and_command() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.say(&user, "ℹ️ Help").await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("prompts.help_message")
    );

    t.messenger.reset();
    t.command(&user, Command::Help).await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("prompts.help_message")
    );
}

#[tokio::test]
async fn test_close_deletes_message_and_welcomes() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.press(&user, 1, "manage_profile").await;
    t.press(&user, 1, "close").await;

    assert!(t
        .messenger
        .outgoing()
        .contains(&Outgoing::Delete { chat_id: 42, message_id: 1 }));
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("prompts.start_message")
    );
    assert_eq!(t.dialogue(&user).await, Dialogue::Idle);
}

#[tokio::test]
async fn test_free_text_while_idle_is_ignored() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.say(&user, "hello?").await;

    assert!(t.messenger.outgoing().is_empty());
    assert!(t.store.find_user(42).await.unwrap().is_some());
}

#[tokio::test]
async fn test_tumbochka_button_replies_empty_shelf() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.say(&user, &t.en("buttons.tumbochka")).await;

    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("prompts.tumbochka_empty")
    );
    assert_eq!(t.messenger.last_callbacks_for(42), vec!["close".to_string()]);
}

#[tokio::test]
async fn test_start_with_tumbochka_payload() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.command(&user, Command::Start("tumbochka".to_string())).await;

    assert_eq!(
        t.messenger.bodies_for(42),
        vec![t.en("prompts.start_message"), t.en("prompts.tumbochka_empty")]
    );
    assert_eq!(t.dialogue(&user).await, Dialogue::Idle);
}
