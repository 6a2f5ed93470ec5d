//! Storage seams consumed by the bot flows and the admin panel
//!
//! [`BotStore`] covers the lookups the conversational flows perform;
//! [`AdminStore`] adds the CRUD surface of the admin panel. Both are
//! implemented by [`DatabaseService`](super::DatabaseService) over PostgreSQL
//! and by [`MemoryStore`](super::MemoryStore) in process.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::*;
use crate::utils::errors::Result;

/// One page of an admin listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[async_trait]
pub trait BotStore: Send + Sync {
    /// Create the user on first contact and refresh the stored username
    async fn ensure_user(&self, telegram_id: i64, username: Option<String>) -> Result<User>;
    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>>;
    /// Commit the profile dialogue atomically; fails with `UserNotFound`
    async fn update_profile(&self, telegram_id: i64, update: ProfileUpdate) -> Result<User>;

    async fn create_event(&self, request: CreateEventRequest) -> Result<Event>;
    async fn find_event(&self, id: i64) -> Result<Option<Event>>;
    async fn list_open_events(&self) -> Result<Vec<Event>>;

    async fn find_registration(&self, event_id: i64, user_id: i64) -> Result<Option<EventRegistration>>;
    async fn find_registration_by_id(&self, id: i64) -> Result<Option<EventRegistration>>;
    async fn create_registration(&self, registration: NewRegistration) -> Result<EventRegistration>;
    async fn list_user_registrations(&self, user_id: i64, limit: i64) -> Result<Vec<RegistrationSummary>>;
    /// Approve only if the registration exists and is still pending
    async fn approve_pending_registration(&self, id: i64) -> Result<Option<RegistrationWithEvent>>;
    /// Delete only if the registration exists and is still pending
    async fn delete_pending_registration(&self, id: i64) -> Result<Option<RegistrationWithEvent>>;
    async fn find_approved_membership(&self, user_id: i64, chat_id: &str) -> Result<Option<EventRegistration>>;

    async fn list_root_categories(&self) -> Result<Vec<FaqCategory>>;
    async fn list_child_categories(&self, parent_id: i64) -> Result<Vec<FaqCategory>>;
    async fn find_category(&self, id: i64) -> Result<Option<FaqCategory>>;
}

#[async_trait]
pub trait AdminStore: BotStore {
    async fn list_users(&self, limit: i64, offset: i64) -> Result<Page<User>>;
    async fn save_user(&self, user: User) -> Result<User>;
    async fn delete_user(&self, telegram_id: i64) -> Result<bool>;

    async fn list_events(&self, limit: i64, offset: i64) -> Result<Page<Event>>;
    async fn insert_event(&self, form: EventForm) -> Result<Event>;
    async fn update_event(&self, id: i64, form: EventForm) -> Result<Option<Event>>;
    async fn delete_event(&self, id: i64) -> Result<bool>;

    async fn list_registrations(&self, filter: RegistrationFilter, limit: i64, offset: i64) -> Result<Page<EventRegistration>>;
    async fn insert_registration(&self, form: RegistrationForm) -> Result<EventRegistration>;
    async fn update_registration(&self, id: i64, form: RegistrationForm) -> Result<Option<EventRegistration>>;
    async fn delete_registration(&self, id: i64) -> Result<bool>;

    async fn list_categories(&self, limit: i64, offset: i64) -> Result<Page<FaqCategory>>;
    async fn insert_category(&self, form: FaqCategoryForm) -> Result<FaqCategory>;
    async fn update_category(&self, id: i64, form: FaqCategoryForm) -> Result<Option<FaqCategory>>;
    async fn delete_category(&self, id: i64) -> Result<bool>;
}
