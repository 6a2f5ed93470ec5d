//! Store wrapper whose membership lookup always fails
//!
//! Everything else is answered by the wrapped in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use AmiHelper::database::{BotStore, MemoryStore};
use AmiHelper::models::*;
use AmiHelper::utils::errors::{AmiHelperError, Result};

pub struct BrokenMembershipStore {
    inner: Arc<MemoryStore>,
}

impl BrokenMembershipStore {
    pub fn wrap(inner: Arc<MemoryStore>) -> Arc<dyn BotStore> {
        Arc::new(Self { inner })
    }
}

#[async_trait]
impl BotStore for BrokenMembershipStore {
    async fn ensure_user(&self, telegram_id: i64, username: Option<String>) -> Result<User> {
        self.inner.ensure_user(telegram_id, username).await
    }

    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>> {
        self.inner.find_user(telegram_id).await
    }

    async fn update_profile(&self, telegram_id: i64, update: ProfileUpdate) -> Result<User> {
        self.inner.update_profile(telegram_id, update).await
    }

    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.inner.create_event(request).await
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>> {
        self.inner.find_event(id).await
    }

    async fn list_open_events(&self) -> Result<Vec<Event>> {
        self.inner.list_open_events().await
    }

    async fn find_registration(&self, event_id: i64, user_id: i64) -> Result<Option<EventRegistration>> {
        self.inner.find_registration(event_id, user_id).await
    }

    async fn find_registration_by_id(&self, id: i64) -> Result<Option<EventRegistration>> {
        self.inner.find_registration_by_id(id).await
    }

    async fn create_registration(&self, registration: NewRegistration) -> Result<EventRegistration> {
        self.inner.create_registration(registration).await
    }

    async fn list_user_registrations(&self, user_id: i64, limit: i64) -> Result<Vec<RegistrationSummary>> {
        self.inner.list_user_registrations(user_id, limit).await
    }

    async fn approve_pending_registration(&self, id: i64) -> Result<Option<RegistrationWithEvent>> {
        self.inner.approve_pending_registration(id).await
    }

    async fn delete_pending_registration(&self, id: i64) -> Result<Option<RegistrationWithEvent>> {
        self.inner.delete_pending_registration(id).await
    }

    async fn find_approved_membership(&self, _user_id: i64, _chat_id: &str) -> Result<Option<EventRegistration>> {
        Err(AmiHelperError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list_root_categories(&self) -> Result<Vec<FaqCategory>> {
        self.inner.list_root_categories().await
    }

    async fn list_child_categories(&self, parent_id: i64) -> Result<Vec<FaqCategory>> {
        self.inner.list_child_categories(parent_id).await
    }

    async fn find_category(&self, id: i64) -> Result<Option<FaqCategory>> {
        self.inner.find_category(id).await
    }
}
