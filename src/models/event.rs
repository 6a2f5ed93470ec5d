//! Event model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One of the two parallel registration tracks of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Division {
    First,
    Second,
}

impl Division {
    /// `first` selects division 1, any other payload division 2
    pub fn from_callback(data: &str) -> Self {
        if data == "first" {
            Division::First
        } else {
            Division::Second
        }
    }

    pub fn number(&self) -> i32 {
        match self {
            Division::First => 1,
            Division::Second => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub photo: Option<String>,
    pub max_capacity: Option<i32>,
    pub is_registration_enabled: bool,
    pub first_division_invite_link: Option<String>,
    pub second_division_invite_link: Option<String>,
    pub first_division_chat_id: Option<String>,
    pub second_division_chat_id: Option<String>,
}

impl Event {
    pub fn invite_link(&self, division: Division) -> Option<&str> {
        match division {
            Division::First => self.first_division_invite_link.as_deref(),
            Division::Second => self.second_division_invite_link.as_deref(),
        }
    }

    pub fn chat_id(&self, division: Division) -> Option<&str> {
        match division {
            Division::First => self.first_division_chat_id.as_deref(),
            Division::Second => self.second_division_chat_id.as_deref(),
        }
    }
}

/// Event created from the admin creation dialogue; registration starts disabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub photo: Option<String>,
}

/// Full set of editable event columns used by the admin panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub photo: Option<String>,
    pub max_capacity: Option<i32>,
    #[serde(default)]
    pub is_registration_enabled: bool,
    pub first_division_invite_link: Option<String>,
    pub second_division_invite_link: Option<String>,
    pub first_division_chat_id: Option<String>,
    pub second_division_chat_id: Option<String>,
}

impl From<CreateEventRequest> for EventForm {
    fn from(request: CreateEventRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            photo: request.photo,
            max_capacity: None,
            is_registration_enabled: false,
            first_division_invite_link: None,
            second_division_invite_link: None,
            first_division_chat_id: None,
            second_division_chat_id: None,
        }
    }
}

impl EventForm {
    pub fn into_event(self, id: i64) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            photo: self.photo,
            max_capacity: self.max_capacity,
            is_registration_enabled: self.is_registration_enabled,
            first_division_invite_link: self.first_division_invite_link,
            second_division_invite_link: self.second_division_invite_link,
            first_division_chat_id: self.first_division_chat_id,
            second_division_chat_id: self.second_division_chat_id,
        }
    }
}
