//! Conversation state management
//!
//! Typed per-chat dialogues and the stores that persist them between updates.

pub mod context;
pub mod storage;

pub use context::{
    ConversationContext, CreationForm, CreationStep, Dialogue, FaqCursor, ProfileForm,
    ProfileStep, RegistrationDraft, RegistrationStep,
};
pub use storage::{MemoryStateStorage, RedisStateStorage, StateStore};
