//! Profile summary and profile editing

use assert_matches::assert_matches;
use AmiHelper::database::BotStore;
use AmiHelper::models::{Division, Gender};
use AmiHelper::state::{Dialogue, ProfileStep};

use crate::helpers::*;

#[tokio::test]
async fn test_profile_button_replies_with_summary() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.say(&user, "👤 Profile").await;

    let last = t.messenger.last_for(42).expect("nothing sent");
    assert_matches!(&last, Outgoing::Text { options, .. } if options.reply_to.is_some());
    let body = last.body().unwrap();
    assert!(body.contains("user42"));
    assert!(body.contains("Full name: -"));
    assert_eq!(
        t.messenger.last_callbacks_for(42),
        vec!["manage_profile", "my_events", "close"]
    );
    assert_eq!(t.dialogue(&user).await, Dialogue::Idle);
}

#[tokio::test]
async fn test_profile_button_in_ukrainian_is_recognized() {
    let t = TestApp::new().await;
    let user = t.actor(42);
    let ukrainian = t.i18n.t("buttons.profile", "uk", None);

    t.say(&user, &ukrainian).await;

    assert_eq!(
        t.messenger.last_callbacks_for(42),
        vec!["manage_profile", "my_events", "close"]
    );
}

#[tokio::test]
async fn test_full_profile_editing_dialogue() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.say(&user, "👤 Profile").await;
    let summary_id = t.messenger.last_sent_id(42).unwrap();

    // Full name
    t.press(&user, summary_id, "manage_profile").await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("profile_prompts.enter_full_name")
    );
    assert_eq!(t.messenger.last_callbacks_for(42), vec!["skip_question"]);

    t.say(&user, "Ada Lovelace").await;
    assert!(t
        .messenger
        .outgoing()
        .contains(&Outgoing::ClearKeyboard { chat_id: 42, message_id: summary_id }));
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en_args("profile_prompts.validate_data", &[("data", "Ada Lovelace")])
    );
    assert_eq!(t.messenger.last_callbacks_for(42), vec!["validate", "try_again"]);
    let confirm_id = t.messenger.last_sent_id(42).unwrap();

    // Academic group, skipped
    t.press(&user, confirm_id, "validate").await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("profile_prompts.enter_academic_group")
    );
    t.press(&user, confirm_id, "skip_question").await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("profile_prompts.validate_skip_data")
    );
    t.press(&user, confirm_id, "validate").await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("profile_prompts.enter_instagram")
    );

    // Instagram, retried once
    t.say(&user, "@ada").await;
    let retry_id = t.messenger.last_sent_id(42).unwrap();
    t.press(&user, retry_id, "try_again").await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("profile_prompts.enter_instagram")
    );
    t.say(&user, "@ada_l").await;
    let instagram_id = t.messenger.last_sent_id(42).unwrap();
    t.press(&user, instagram_id, "validate").await;

    // Gender prompt is a fresh message
    let gender_id = t.messenger.last_sent_id(42).unwrap();
    assert_ne!(gender_id, instagram_id);
    assert_eq!(
        t.messenger.last_callbacks_for(42),
        vec!["male", "female", "skip_question"]
    );
    assert_matches!(
        t.dialogue(&user).await,
        Dialogue::Profile(form) if form.step == ProfileStep::Gender
    );

    t.press(&user, gender_id, "female").await;

    let stored = t.store.find_user(42).await.unwrap().unwrap();
    assert_eq!(stored.full_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(stored.academic_group, None);
    assert_eq!(stored.instagram.as_deref(), Some("@ada_l"));
    assert_eq!(stored.gender, Some(Gender::Female));
    assert_eq!(t.dialogue(&user).await, Dialogue::Idle);
    assert!(t
        .messenger
        .last_body_for(42)
        .unwrap()
        .starts_with(&t.en("profile_prompts.profile_updated")));
}

#[tokio::test]
async fn test_skipping_gender_clears_it() {
    let t = TestApp::new().await;
    let user = t.actor(7);
    t.ensure_user(&user).await;
    t.store
        .update_profile(
            7,
            AmiHelper::models::ProfileUpdate {
                gender: Some(Gender::Male),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    t.press(&user, 1, "manage_profile").await;
    for _ in 0..3 {
        t.press(&user, 1, "skip_question").await;
        t.press(&user, 1, "validate").await;
    }
    let gender_id = t.messenger.last_sent_id(7).unwrap();
    t.press(&user, gender_id, "skip_question").await;

    let stored = t.store.find_user(7).await.unwrap().unwrap();
    assert_eq!(stored.gender, None);
    assert_eq!(stored.full_name, None);
}

#[tokio::test]
async fn test_validate_outside_profile_flow_asks_for_keyboard() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.press(&user, 10, "validate").await;
    assert_matches!(
        t.messenger.last_for(42),
        Some(Outgoing::Edit { message_id: 10, text, .. }) if text == t.en("prompts.use_keyboard")
    );

    t.press(&user, 10, "try_again").await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("prompts.unknown_state")
    );
}

#[tokio::test]
async fn test_text_during_gender_step_asks_for_keyboard() {
    let t = TestApp::new().await;
    let user = t.actor(42);

    t.press(&user, 1, "manage_profile").await;
    for _ in 0..3 {
        t.press(&user, 1, "skip_question").await;
        t.press(&user, 1, "validate").await;
    }
    t.say(&user, "other").await;

    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("prompts.use_keyboard")
    );
    assert_matches!(t.dialogue(&user).await, Dialogue::Profile(_));
}

#[tokio::test]
async fn test_my_events_lists_own_registrations_with_status() {
    let t = TestApp::new().await;
    let user = t.actor(42);
    let first = seed_event(&t.store, true).await;
    let second = seed_event(&t.store, true).await;
    let pending = seed_registration(&t.store, &first, 42, Division::First, false).await;
    let approved = seed_registration(&t.store, &second, 42, Division::Second, true).await;
    let foreign = seed_registration(&t.store, &first, 43, Division::First, false).await;

    t.press(&user, 5, "my_events").await;
    assert_eq!(
        t.messenger.last_callbacks_for(42),
        vec![
            format!("my_event_select_{}", pending.id),
            format!("my_event_select_{}", approved.id),
            "profile_back".to_string(),
        ]
    );

    t.press(&user, 5, &format!("my_event_select_{}", approved.id)).await;
    assert!(t
        .messenger
        .outgoing()
        .contains(&Outgoing::Delete { chat_id: 42, message_id: 5 }));
    let card = t.messenger.last_body_for(42).unwrap();
    assert!(card.contains(&t.en("profile_prompts.registration_approved")));
    assert_eq!(t.messenger.last_callbacks_for(42), vec!["my_event_back"]);

    // Someone else's registration is not shown
    t.press(&user, 6, &format!("my_event_select_{}", foreign.id)).await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("profile_prompts.registration_missing")
    );

    let card_id = t.messenger.last_sent_id(42).unwrap();
    t.press(&user, card_id, "my_event_back").await;
    assert_eq!(
        t.messenger.last_body_for(42).unwrap(),
        t.en("profile_prompts.my_events")
    );
}
