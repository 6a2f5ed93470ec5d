//! Conversation context management
//!
//! Every chat carries at most one active [`Dialogue`]. Each variant owns the
//! form data its flow accumulates, so a transition receives the whole typed
//! state instead of loosely keyed scratch values.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Division, Gender, ProfileUpdate};

/// Per-chat conversation context as persisted by the state store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub chat_id: i64,
    pub dialogue: Dialogue,
    pub updated_at: DateTime<Utc>,
    /// When this context expires (for cleanup)
    pub expires_at: Option<DateTime<Utc>>,
}

impl ConversationContext {
    pub fn new(chat_id: i64, dialogue: Dialogue) -> Self {
        Self {
            chat_id,
            dialogue,
            updated_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Set the expiry `ttl_seconds` from now
    pub fn expire_in(mut self, ttl_seconds: u64) -> Self {
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        self.expires_at = Utc::now().checked_add_signed(Duration::seconds(ttl));
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.map_or(false, |expires_at| Utc::now() > expires_at)
    }
}

/// The active flow of a chat together with its form data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum Dialogue {
    #[default]
    Idle,
    Profile(ProfileForm),
    Registration(RegistrationDraft),
    EventCreation(CreationForm),
    Rejection { registration_id: i64 },
    Faq(FaqCursor),
}

impl Dialogue {
    pub fn name(&self) -> &'static str {
        match self {
            Dialogue::Idle => "idle",
            Dialogue::Profile(_) => "profile",
            Dialogue::Registration(_) => "registration",
            Dialogue::EventCreation(_) => "event_creation",
            Dialogue::Rejection { .. } => "rejection",
            Dialogue::Faq(_) => "faq",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Dialogue::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStep {
    FullName,
    AcademicGroup,
    Instagram,
    Gender,
}

impl ProfileStep {
    /// Translation key of the prompt asked at this step
    pub fn prompt_key(&self) -> &'static str {
        match self {
            ProfileStep::FullName => "profile_prompts.enter_full_name",
            ProfileStep::AcademicGroup => "profile_prompts.enter_academic_group",
            ProfileStep::Instagram => "profile_prompts.enter_instagram",
            ProfileStep::Gender => "profile_prompts.enter_gender",
        }
    }

    pub fn next(&self) -> ProfileStep {
        match self {
            ProfileStep::FullName => ProfileStep::AcademicGroup,
            ProfileStep::AcademicGroup => ProfileStep::Instagram,
            ProfileStep::Instagram | ProfileStep::Gender => ProfileStep::Gender,
        }
    }
}

/// Answers collected by the profile editing flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub step: ProfileStep,
    /// Message carrying the inline keyboard of the last prompt
    pub prompt_message_id: Option<i32>,
    /// Answer awaiting confirmation for the current step
    pub reply_info: Option<String>,
    pub full_name: Option<String>,
    pub academic_group: Option<String>,
    pub instagram: Option<String>,
}

impl ProfileForm {
    pub fn new(prompt_message_id: Option<i32>) -> Self {
        Self {
            step: ProfileStep::FullName,
            prompt_message_id,
            reply_info: None,
            full_name: None,
            academic_group: None,
            instagram: None,
        }
    }

    /// Move the pending answer into the field of the current step and advance
    pub fn commit_reply(&mut self) {
        let answer = self.reply_info.take();
        match self.step {
            ProfileStep::FullName => self.full_name = answer,
            ProfileStep::AcademicGroup => self.academic_group = answer,
            ProfileStep::Instagram => self.instagram = answer,
            ProfileStep::Gender => return,
        }
        self.step = self.step.next();
    }

    pub fn into_update(self, gender: Option<Gender>) -> ProfileUpdate {
        ProfileUpdate {
            full_name: self.full_name,
            academic_group: self.academic_group,
            instagram: self.instagram,
            gender,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    AmiStudent,
    CodingameUsername,
    Division,
    PersonalDataConsent,
    MediaConsent,
}

/// Answers collected by the event registration flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub event_id: i64,
    pub step: RegistrationStep,
    pub is_ami_student: bool,
    pub codingame_username: Option<String>,
    pub division: Option<Division>,
}

impl RegistrationDraft {
    pub fn new(event_id: i64) -> Self {
        Self {
            event_id,
            step: RegistrationStep::AmiStudent,
            is_ami_student: false,
            codingame_username: None,
            division: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationStep {
    Title,
    Description,
    Photo,
    Confirm,
}

/// Event fields collected by an admin before confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationForm {
    pub step: CreationStep,
    pub title: String,
    pub description: String,
    pub photo: Option<String>,
}

impl Default for CreationForm {
    fn default() -> Self {
        Self {
            step: CreationStep::Title,
            title: String::new(),
            description: String::new(),
            photo: None,
        }
    }
}

/// Position inside the FAQ tree.
///
/// `path` holds the branch ids descended from the root listing, innermost
/// last. `answer_open` is set while a leaf answer replaces the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqCursor {
    pub path: Vec<i64>,
    pub answer_open: bool,
}

impl FaqCursor {
    /// Branch whose children are currently listed, `None` for the root listing
    pub fn level(&self) -> Option<i64> {
        self.path.last().copied()
    }

    pub fn descend(&mut self, branch_id: i64) {
        self.answer_open = false;
        self.path.push(branch_id);
    }

    pub fn open_answer(&mut self) {
        self.answer_open = true;
    }

    /// Close the open answer or pop one level; returns the level to render
    pub fn back(&mut self) -> Option<i64> {
        if self.answer_open {
            self.answer_open = false;
        } else {
            self.path.pop();
        }
        self.level()
    }

    pub fn reset(&mut self) {
        self.path.clear();
        self.answer_open = false;
    }
}
