//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Gender choices offered at the last profile step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Map gender keyboard payloads; anything else (including skip) is no choice
    pub fn from_callback(data: &str) -> Option<Self> {
        match data {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub academic_group: Option<String>,
    pub instagram: Option<String>,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub gender: Option<Gender>,
}

impl User {
    /// A fresh user as created on first contact
    pub fn new(telegram_id: i64, username: Option<String>) -> Self {
        Self {
            telegram_id,
            username,
            full_name: None,
            academic_group: None,
            instagram: None,
            is_banned: false,
            is_admin: false,
            gender: None,
        }
    }
}

/// Fields committed at the end of the profile editing dialogue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub academic_group: Option<String>,
    pub instagram: Option<String>,
    pub gender: Option<Gender>,
}
