//! Fixture builders for events, registrations and the FAQ tree

use fake::faker::lorem::en::{Sentence, Words};
use fake::Fake;
use AmiHelper::database::{AdminStore, BotStore, MemoryStore};
use AmiHelper::models::*;

/// Chat ids handed to the two division chats of event `n`
pub fn division_chat_id(event_no: i64, division: i32) -> String {
    format!("-100{}{}", event_no, division)
}

pub fn event_form(event_no: i64, enabled: bool) -> EventForm {
    EventForm {
        title: Words(2..4).fake::<Vec<String>>().join(" "),
        description: Sentence(4..8).fake(),
        photo: None,
        max_capacity: Some(100),
        is_registration_enabled: enabled,
        first_division_invite_link: Some(format!("https://t.me/+first{}", event_no)),
        second_division_invite_link: Some(format!("https://t.me/+second{}", event_no)),
        first_division_chat_id: Some(division_chat_id(event_no, 1)),
        second_division_chat_id: Some(division_chat_id(event_no, 2)),
    }
}

pub async fn seed_event(store: &MemoryStore, enabled: bool) -> Event {
    let page = store.list_events(1, 0).await.expect("list events failed");
    store
        .insert_event(event_form(page.total + 1, enabled))
        .await
        .expect("insert event failed")
}

/// Seed events until the one with id `id` exists
pub async fn seed_event_with_id(store: &MemoryStore, id: i64, enabled: bool) -> Event {
    loop {
        let event = seed_event(store, enabled).await;
        if event.id >= id {
            return event;
        }
    }
}

pub async fn seed_registration(
    store: &MemoryStore,
    event: &Event,
    user_id: i64,
    division: Division,
    approved: bool,
) -> EventRegistration {
    store
        .ensure_user(user_id, None)
        .await
        .expect("ensure user failed");
    let registration = store
        .create_registration(NewRegistration::snapshot(
            event,
            user_id,
            true,
            format!("coder{}", user_id),
            division,
        ))
        .await
        .expect("create registration failed");
    if approved {
        store
            .approve_pending_registration(registration.id)
            .await
            .expect("approve failed");
        return store
            .find_registration_by_id(registration.id)
            .await
            .expect("find failed")
            .expect("registration vanished");
    }
    registration
}

pub async fn seed_category(
    store: &MemoryStore,
    title: &str,
    parent_id: Option<i64>,
    leaf_category: Option<bool>,
    answer: Option<&str>,
) -> FaqCategory {
    store
        .insert_category(FaqCategoryForm {
            title: Some(title.to_string()),
            parent_id,
            leaf_category,
            category_answer: answer.map(str::to_string),
        })
        .await
        .expect("insert category failed")
}

/// A linear chain of `depth` branch categories under a listed root, each
/// with one leaf; returns the branch ids from the root down
pub async fn seed_faq_chain(store: &MemoryStore, depth: usize) -> Vec<i64> {
    let mut ids = Vec::new();
    let mut parent = None;
    for level in 0..depth {
        let branch = seed_category(store, &format!("Level {}", level), parent, Some(false), None).await;
        seed_category(store, &format!("Leaf {}", level), Some(branch.id), Some(true), Some("Answer")).await;
        ids.push(branch.id);
        parent = Some(branch.id);
    }
    ids
}
