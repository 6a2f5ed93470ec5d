//! In-process store
//!
//! Mirrors the PostgreSQL filters and constraints closely enough to run the bot
//! without a database and to drive the flows in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::store::{AdminStore, BotStore, Page};
use crate::models::*;
use crate::utils::errors::{AmiHelperError, Result};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    events: BTreeMap<i64, Event>,
    registrations: BTreeMap<i64, EventRegistration>,
    categories: BTreeMap<i64, FaqCategory>,
    next_event_id: i64,
    next_registration_id: i64,
    next_category_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn check_registration_refs(&self, event_id: i64, user_id: i64, division: i32) -> Result<()> {
        if !self.events.contains_key(&event_id) {
            return Err(AmiHelperError::InvalidInput(format!("event {} does not exist", event_id)));
        }
        if !self.users.contains_key(&user_id) {
            return Err(AmiHelperError::InvalidInput(format!("user {} does not exist", user_id)));
        }
        if division != 1 && division != 2 {
            return Err(AmiHelperError::InvalidInput(format!("division must be 1 or 2, got {}", division)));
        }
        Ok(())
    }

    fn check_parent(&self, parent_id: Option<i64>) -> Result<()> {
        match parent_id {
            Some(id) if !self.categories.contains_key(&id) => Err(AmiHelperError::InvalidInput(
                format!("parent category {} does not exist", id),
            )),
            _ => Ok(()),
        }
    }

    fn with_event(&self, registration: EventRegistration) -> Result<RegistrationWithEvent> {
        let event = self
            .events
            .get(&registration.event_id)
            .cloned()
            .ok_or(AmiHelperError::EventNotFound { event_id: registration.event_id })?;
        Ok(RegistrationWithEvent { registration, event })
    }
}

fn paginate<T: Clone>(rows: impl Iterator<Item = T>, limit: i64, offset: i64) -> Page<T> {
    let rows: Vec<T> = rows.collect();
    let total = rows.len() as i64;
    let items = rows
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect();
    Page { items, total }
}

/// Store backed by ordered maps behind an async lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BotStore for MemoryStore {
    async fn ensure_user(&self, telegram_id: i64, username: Option<String>) -> Result<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .entry(telegram_id)
            .or_insert_with(|| User::new(telegram_id, None));
        user.username = username;
        Ok(user.clone())
    }

    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&telegram_id).cloned())
    }

    async fn update_profile(&self, telegram_id: i64, update: ProfileUpdate) -> Result<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&telegram_id)
            .ok_or(AmiHelperError::UserNotFound { user_id: telegram_id })?;
        user.full_name = update.full_name;
        user.academic_group = update.academic_group;
        user.instagram = update.instagram;
        user.gender = update.gender;
        Ok(user.clone())
    }

    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.insert_event(request.into()).await
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn list_open_events(&self) -> Result<Vec<Event>> {
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .values()
            .filter(|event| event.is_registration_enabled)
            .cloned()
            .collect())
    }

    async fn find_registration(&self, event_id: i64, user_id: i64) -> Result<Option<EventRegistration>> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .values()
            .find(|r| r.event_id == event_id && r.user_id == user_id)
            .cloned())
    }

    async fn find_registration_by_id(&self, id: i64) -> Result<Option<EventRegistration>> {
        Ok(self.tables.read().await.registrations.get(&id).cloned())
    }

    async fn create_registration(&self, registration: NewRegistration) -> Result<EventRegistration> {
        self.insert_registration(RegistrationForm {
            event_id: registration.event_id,
            user_id: registration.user_id,
            is_ami_student: registration.is_ami_student,
            codingame_username: registration.codingame_username,
            is_approved: false,
            division: registration.division,
            invite_link: registration.invite_link,
            member_chat_id: registration.member_chat_id,
        })
        .await
    }

    async fn list_user_registrations(&self, user_id: i64, limit: i64) -> Result<Vec<RegistrationSummary>> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .values()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                tables.events.get(&r.event_id).map(|event| RegistrationSummary {
                    id: r.id,
                    event_title: event.title.clone(),
                })
            })
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn approve_pending_registration(&self, id: i64) -> Result<Option<RegistrationWithEvent>> {
        let mut tables = self.tables.write().await;
        let approved = match tables.registrations.get_mut(&id) {
            Some(registration) if !registration.is_approved => {
                registration.is_approved = true;
                registration.clone()
            }
            _ => return Ok(None),
        };
        tables.with_event(approved).map(Some)
    }

    async fn delete_pending_registration(&self, id: i64) -> Result<Option<RegistrationWithEvent>> {
        let mut tables = self.tables.write().await;
        let pending = matches!(tables.registrations.get(&id), Some(r) if !r.is_approved);
        if !pending {
            return Ok(None);
        }
        match tables.registrations.remove(&id) {
            Some(removed) => tables.with_event(removed).map(Some),
            None => Ok(None),
        }
    }

    async fn find_approved_membership(&self, user_id: i64, chat_id: &str) -> Result<Option<EventRegistration>> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .values()
            .find(|r| {
                r.user_id == user_id && r.is_approved && r.member_chat_id.as_deref() == Some(chat_id)
            })
            .cloned())
    }

    async fn list_root_categories(&self) -> Result<Vec<FaqCategory>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .filter(|c| c.is_root_listed())
            .cloned()
            .collect())
    }

    async fn list_child_categories(&self, parent_id: i64) -> Result<Vec<FaqCategory>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn find_category(&self, id: i64) -> Result<Option<FaqCategory>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn list_users(&self, limit: i64, offset: i64) -> Result<Page<User>> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.users.values().cloned(), limit, offset))
    }

    async fn save_user(&self, user: User) -> Result<User> {
        let mut tables = self.tables.write().await;
        tables.users.insert(user.telegram_id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, telegram_id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.registrations.values().any(|r| r.user_id == telegram_id) {
            return Err(AmiHelperError::InvalidInput(format!(
                "user {} still has registrations",
                telegram_id
            )));
        }
        Ok(tables.users.remove(&telegram_id).is_some())
    }

    async fn list_events(&self, limit: i64, offset: i64) -> Result<Page<Event>> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.events.values().cloned(), limit, offset))
    }

    async fn insert_event(&self, form: EventForm) -> Result<Event> {
        let mut tables = self.tables.write().await;
        let id = Tables::next_id(&mut tables.next_event_id);
        let event = form.into_event(id);
        tables.events.insert(id, event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: i64, form: EventForm) -> Result<Option<Event>> {
        let mut tables = self.tables.write().await;
        match tables.events.get_mut(&id) {
            Some(event) => {
                *event = form.into_event(id);
                Ok(Some(event.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.registrations.values().any(|r| r.event_id == id) {
            return Err(AmiHelperError::InvalidInput(format!("event {} still has registrations", id)));
        }
        Ok(tables.events.remove(&id).is_some())
    }

    async fn list_registrations(&self, filter: RegistrationFilter, limit: i64, offset: i64) -> Result<Page<EventRegistration>> {
        let tables = self.tables.read().await;
        let rows = tables.registrations.values().filter(|r| filter.matches(r)).cloned();
        Ok(paginate(rows, limit, offset))
    }

    async fn insert_registration(&self, form: RegistrationForm) -> Result<EventRegistration> {
        let mut tables = self.tables.write().await;
        tables.check_registration_refs(form.event_id, form.user_id, form.division)?;
        let id = Tables::next_id(&mut tables.next_registration_id);
        let registration = form.into_registration(id);
        tables.registrations.insert(id, registration.clone());
        Ok(registration)
    }

    async fn update_registration(&self, id: i64, form: RegistrationForm) -> Result<Option<EventRegistration>> {
        let mut tables = self.tables.write().await;
        if !tables.registrations.contains_key(&id) {
            return Ok(None);
        }
        tables.check_registration_refs(form.event_id, form.user_id, form.division)?;
        let registration = form.into_registration(id);
        tables.registrations.insert(id, registration.clone());
        Ok(Some(registration))
    }

    async fn delete_registration(&self, id: i64) -> Result<bool> {
        Ok(self.tables.write().await.registrations.remove(&id).is_some())
    }

    async fn list_categories(&self, limit: i64, offset: i64) -> Result<Page<FaqCategory>> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.categories.values().cloned(), limit, offset))
    }

    async fn insert_category(&self, form: FaqCategoryForm) -> Result<FaqCategory> {
        let mut tables = self.tables.write().await;
        tables.check_parent(form.parent_id)?;
        let id = Tables::next_id(&mut tables.next_category_id);
        let category = form.into_category(id);
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: i64, form: FaqCategoryForm) -> Result<Option<FaqCategory>> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id) {
            return Ok(None);
        }
        tables.check_parent(form.parent_id)?;
        let category = form.into_category(id);
        tables.categories.insert(id, category.clone());
        Ok(Some(category))
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.categories.values().any(|c| c.parent_id == Some(id)) {
            return Err(AmiHelperError::InvalidInput(format!("category {} still has children", id)));
        }
        Ok(tables.categories.remove(&id).is_some())
    }
}
