//! Conversational flow tests, one module per flow

pub mod creation_test;
pub mod join_request_test;
pub mod main_menu_test;
pub mod profile_test;
