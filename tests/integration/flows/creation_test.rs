//! Admin event creation dialogue

use assert_matches::assert_matches;
use AmiHelper::database::{AdminStore, BotStore};
use AmiHelper::handlers::Command;
use AmiHelper::state::{CreationStep, Dialogue};

use crate::helpers::*;

#[tokio::test]
async fn test_event_creation_with_photo() {
    let t = TestApp::new().await;
    let admin = t.admin();

    t.command(&admin, Command::EventCreation).await;
    assert_eq!(
        t.messenger.last_body_for(ADMIN_ID).unwrap(),
        t.en("event_creation.title")
    );

    t.say(&admin, "Winter Hackathon").await;
    assert_eq!(
        t.messenger.last_body_for(ADMIN_ID).unwrap(),
        t.en("event_creation.description")
    );
    t.say(&admin, "48 hours of code").await;
    assert_eq!(
        t.messenger.last_body_for(ADMIN_ID).unwrap(),
        t.en("event_creation.photo")
    );
    t.send_photo(&admin, "AgACAgIAAxkBAAI").await;

    let preview = t.messenger.last_for(ADMIN_ID).unwrap();
    assert_matches!(&preview, Outgoing::Photo { photo, caption, .. }
        if photo == "AgACAgIAAxkBAAI" && caption.contains("Winter Hackathon"));
    assert_eq!(t.messenger.last_callbacks_for(ADMIN_ID), vec!["yes", "no"]);
    assert_matches!(
        t.dialogue(&admin).await,
        Dialogue::EventCreation(form) if form.step == CreationStep::Confirm
    );

    let preview_id = t.messenger.last_sent_id(ADMIN_ID).unwrap();
    t.press(&admin, preview_id, "yes").await;

    let events = t.store.list_events(10, 0).await.unwrap().items;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Winter Hackathon");
    assert_eq!(events[0].description, "48 hours of code");
    assert_eq!(events[0].photo.as_deref(), Some("AgACAgIAAxkBAAI"));
    assert!(!events[0].is_registration_enabled);
    assert!(t.store.list_open_events().await.unwrap().is_empty());

    assert_eq!(
        t.messenger.last_body_for(ADMIN_ID).unwrap(),
        t.en("event_creation.event_created")
    );
    assert_eq!(t.dialogue(&admin).await, Dialogue::Idle);
}

#[tokio::test]
async fn test_event_creation_without_photo_and_cancel() {
    let t = TestApp::new().await;
    let admin = t.admin();

    t.command(&admin, Command::EventCreation).await;
    t.say(&admin, "Meetup").await;
    t.say(&admin, "Talks and pizza").await;
    t.say(&admin, "no photo, sorry").await;

    assert_matches!(t.messenger.last_for(ADMIN_ID), Some(Outgoing::Text { .. }));
    let preview_id = t.messenger.last_sent_id(ADMIN_ID).unwrap();
    t.press(&admin, preview_id, "no").await;

    assert_eq!(t.store.list_events(10, 0).await.unwrap().total, 0);
    assert_eq!(
        t.messenger.last_body_for(ADMIN_ID).unwrap(),
        t.en("event_creation.event_creation_canceled")
    );
    assert_eq!(t.dialogue(&admin).await, Dialogue::Idle);
}

#[tokio::test]
async fn test_main_menu_button_abandons_creation() {
    let t = TestApp::new().await;
    let admin = t.admin();

    t.command(&admin, Command::EventCreation).await;
    t.say(&admin, "❓ FAQ").await;

    assert_matches!(t.dialogue(&admin).await, Dialogue::Faq(_));
    assert_eq!(t.store.list_events(10, 0).await.unwrap().total, 0);
}
