//! Event registration model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::event::{Division, Event};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EventRegistration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub is_ami_student: bool,
    pub codingame_username: String,
    pub is_approved: bool,
    pub division: i32,
    pub invite_link: Option<String>,
    pub member_chat_id: Option<String>,
}

/// Registration about to be inserted by the registration dialogue.
///
/// Invite link and chat id are copied from the event at construction time and
/// do not follow later edits of the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRegistration {
    pub event_id: i64,
    pub user_id: i64,
    pub is_ami_student: bool,
    pub codingame_username: String,
    pub division: i32,
    pub invite_link: Option<String>,
    pub member_chat_id: Option<String>,
}

impl NewRegistration {
    pub fn snapshot(
        event: &Event,
        user_id: i64,
        is_ami_student: bool,
        codingame_username: String,
        division: Division,
    ) -> Self {
        Self {
            event_id: event.id,
            user_id,
            is_ami_student,
            codingame_username,
            division: division.number(),
            invite_link: event.invite_link(division).map(str::to_string),
            member_chat_id: event.chat_id(division).map(str::to_string),
        }
    }
}

/// A registration paired with its event, as returned by approve/reject lookups
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationWithEvent {
    pub registration: EventRegistration,
    pub event: Event,
}

/// Row of the "my events" list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RegistrationSummary {
    pub id: i64,
    pub event_title: String,
}

/// Editable registration columns used by the admin panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub event_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub is_ami_student: bool,
    pub codingame_username: String,
    #[serde(default)]
    pub is_approved: bool,
    pub division: i32,
    pub invite_link: Option<String>,
    pub member_chat_id: Option<String>,
}

impl RegistrationForm {
    pub fn into_registration(self, id: i64) -> EventRegistration {
        EventRegistration {
            id,
            event_id: self.event_id,
            user_id: self.user_id,
            is_ami_student: self.is_ami_student,
            codingame_username: self.codingame_username,
            is_approved: self.is_approved,
            division: self.division,
            invite_link: self.invite_link,
            member_chat_id: self.member_chat_id,
        }
    }
}

/// Optional filters of the admin registrations list
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationFilter {
    pub event_id: Option<i64>,
    pub is_approved: Option<bool>,
}

impl RegistrationFilter {
    pub fn matches(&self, registration: &EventRegistration) -> bool {
        self.event_id.map_or(true, |id| registration.event_id == id)
            && self.is_approved.map_or(true, |flag| registration.is_approved == flag)
    }
}
