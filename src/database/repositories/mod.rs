//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod event;
pub mod faq;
pub mod registration;
pub mod user;

// Re-export repositories
pub use event::EventRepository;
pub use faq::FaqRepository;
pub use registration::RegistrationRepository;
pub use user::UserRepository;

use crate::utils::errors::AmiHelperError;

/// Turn constraint violations into input errors so the admin panel can report them
pub(crate) fn map_constraint_error(error: sqlx::Error) -> AmiHelperError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_foreign_key_violation()
            || db_error.is_unique_violation()
            || db_error.is_check_violation()
        {
            return AmiHelperError::InvalidInput(db_error.message().to_string());
        }
    }
    AmiHelperError::Database(error)
}
