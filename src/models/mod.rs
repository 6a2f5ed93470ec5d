//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod faq;
pub mod registration;
pub mod user;

// Re-export commonly used models
pub use event::{CreateEventRequest, Division, Event, EventForm};
pub use faq::{FaqCategory, FaqCategoryForm};
pub use registration::{
    EventRegistration, NewRegistration, RegistrationFilter, RegistrationForm,
    RegistrationSummary, RegistrationWithEvent,
};
pub use user::{Gender, ProfileUpdate, User};
