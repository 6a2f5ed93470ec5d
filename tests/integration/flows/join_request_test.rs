//! Chat join gating

use AmiHelper::models::Division;

use crate::helpers::*;

fn chat(id: &str) -> i64 {
    id.parse().unwrap()
}

#[tokio::test]
async fn test_join_approved_only_for_matching_approved_registration() {
    let t = TestApp::new().await;
    let event = seed_event(&t.store, true).await;
    seed_registration(&t.store, &event, 42, Division::First, true).await;
    seed_registration(&t.store, &event, 43, Division::First, false).await;

    let first_chat = chat(event.first_division_chat_id.as_deref().unwrap());
    let second_chat = chat(event.second_division_chat_id.as_deref().unwrap());

    t.app.dispatch_join_request(first_chat, 42).await.unwrap();
    t.app.dispatch_join_request(second_chat, 42).await.unwrap();
    t.app.dispatch_join_request(first_chat, 43).await.unwrap();
    t.app.dispatch_join_request(first_chat, 44).await.unwrap();

    assert_eq!(
        t.messenger.outgoing(),
        vec![
            Outgoing::ApproveJoin { chat_id: first_chat, user_id: 42 },
            Outgoing::DeclineJoin { chat_id: second_chat, user_id: 42 },
            Outgoing::DeclineJoin { chat_id: first_chat, user_id: 43 },
            Outgoing::DeclineJoin { chat_id: first_chat, user_id: 44 },
        ]
    );
}

#[tokio::test]
async fn test_join_uses_chat_snapshotted_at_registration() {
    let t = TestApp::new().await;
    let event = seed_event(&t.store, true).await;
    let registration = seed_registration(&t.store, &event, 42, Division::Second, true).await;
    let snapshot_chat = chat(registration.member_chat_id.as_deref().unwrap());

    t.app.dispatch_join_request(snapshot_chat, 42).await.unwrap();

    assert_eq!(
        t.messenger.outgoing(),
        vec![Outgoing::ApproveJoin { chat_id: snapshot_chat, user_id: 42 }]
    );
}

#[tokio::test]
async fn test_join_declined_when_membership_lookup_fails() {
    let t = TestApp::with_store(BrokenMembershipStore::wrap).await;
    let event = seed_event(&t.store, true).await;
    seed_registration(&t.store, &event, 42, Division::First, true).await;
    let first_chat = chat(event.first_division_chat_id.as_deref().unwrap());

    t.app.dispatch_join_request(first_chat, 42).await.unwrap();

    assert_eq!(
        t.messenger.outgoing(),
        vec![Outgoing::DeclineJoin { chat_id: first_chat, user_id: 42 }]
    );
}
