//! Database service layer
//!
//! This module provides a high-level interface to database operations

use async_trait::async_trait;

use crate::database::store::{AdminStore, BotStore, Page};
use crate::database::{DatabasePool, EventRepository, FaqRepository, RegistrationRepository, UserRepository};
use crate::models::*;
use crate::utils::errors::{AmiHelperError, Result};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pub faq: FaqRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            faq: FaqRepository::new(pool),
        }
    }
}

#[async_trait]
impl BotStore for DatabaseService {
    async fn ensure_user(&self, telegram_id: i64, username: Option<String>) -> Result<User> {
        self.users.upsert_seen(telegram_id, username).await
    }

    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>> {
        self.users.find_by_telegram_id(telegram_id).await
    }

    async fn update_profile(&self, telegram_id: i64, update: ProfileUpdate) -> Result<User> {
        self.users
            .update_profile(telegram_id, update)
            .await?
            .ok_or(AmiHelperError::UserNotFound { user_id: telegram_id })
    }

    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.events.create(request.into()).await
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>> {
        self.events.find_by_id(id).await
    }

    async fn list_open_events(&self) -> Result<Vec<Event>> {
        self.events.list_registration_open().await
    }

    async fn find_registration(&self, event_id: i64, user_id: i64) -> Result<Option<EventRegistration>> {
        self.registrations.find_by_event_and_user(event_id, user_id).await
    }

    async fn find_registration_by_id(&self, id: i64) -> Result<Option<EventRegistration>> {
        self.registrations.find_by_id(id).await
    }

    async fn create_registration(&self, registration: NewRegistration) -> Result<EventRegistration> {
        self.registrations.create(registration).await
    }

    async fn list_user_registrations(&self, user_id: i64, limit: i64) -> Result<Vec<RegistrationSummary>> {
        self.registrations.list_for_user(user_id, limit).await
    }

    async fn approve_pending_registration(&self, id: i64) -> Result<Option<RegistrationWithEvent>> {
        self.registrations.approve_pending(id).await
    }

    async fn delete_pending_registration(&self, id: i64) -> Result<Option<RegistrationWithEvent>> {
        self.registrations.delete_pending(id).await
    }

    async fn find_approved_membership(&self, user_id: i64, chat_id: &str) -> Result<Option<EventRegistration>> {
        self.registrations.find_approved_membership(user_id, chat_id).await
    }

    async fn list_root_categories(&self) -> Result<Vec<FaqCategory>> {
        self.faq.list_roots().await
    }

    async fn list_child_categories(&self, parent_id: i64) -> Result<Vec<FaqCategory>> {
        self.faq.list_children(parent_id).await
    }

    async fn find_category(&self, id: i64) -> Result<Option<FaqCategory>> {
        self.faq.find_by_id(id).await
    }
}

#[async_trait]
impl AdminStore for DatabaseService {
    async fn list_users(&self, limit: i64, offset: i64) -> Result<Page<User>> {
        Ok(Page {
            items: self.users.list(limit, offset).await?,
            total: self.users.count().await?,
        })
    }

    async fn save_user(&self, user: User) -> Result<User> {
        self.users.save(user).await
    }

    async fn delete_user(&self, telegram_id: i64) -> Result<bool> {
        self.users.delete(telegram_id).await
    }

    async fn list_events(&self, limit: i64, offset: i64) -> Result<Page<Event>> {
        Ok(Page {
            items: self.events.list(limit, offset).await?,
            total: self.events.count().await?,
        })
    }

    async fn insert_event(&self, form: EventForm) -> Result<Event> {
        self.events.create(form).await
    }

    async fn update_event(&self, id: i64, form: EventForm) -> Result<Option<Event>> {
        self.events.update(id, form).await
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        self.events.delete(id).await
    }

    async fn list_registrations(&self, filter: RegistrationFilter, limit: i64, offset: i64) -> Result<Page<EventRegistration>> {
        Ok(Page {
            items: self.registrations.list(filter, limit, offset).await?,
            total: self.registrations.count(filter).await?,
        })
    }

    async fn insert_registration(&self, form: RegistrationForm) -> Result<EventRegistration> {
        self.registrations.insert(form).await
    }

    async fn update_registration(&self, id: i64, form: RegistrationForm) -> Result<Option<EventRegistration>> {
        self.registrations.update(id, form).await
    }

    async fn delete_registration(&self, id: i64) -> Result<bool> {
        self.registrations.delete(id).await
    }

    async fn list_categories(&self, limit: i64, offset: i64) -> Result<Page<FaqCategory>> {
        Ok(Page {
            items: self.faq.list(limit, offset).await?,
            total: self.faq.count().await?,
        })
    }

    async fn insert_category(&self, form: FaqCategoryForm) -> Result<FaqCategory> {
        self.faq.create(form).await
    }

    async fn update_category(&self, id: i64, form: FaqCategoryForm) -> Result<Option<FaqCategory>> {
        self.faq.update(id, form).await
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        self.faq.delete(id).await
    }
}
