//! Authentication service implementation
//!
//! Admin capability is granted by the configured `bot.admin_ids` list or by
//! the `is_admin` flag stored on the user row.

use std::collections::HashSet;

use tracing::debug;

use crate::config::BotConfig;
use crate::models::User;

#[derive(Debug, Clone, Default)]
pub struct AuthService {
    admin_ids: HashSet<i64>,
}

impl AuthService {
    pub fn new(config: &BotConfig) -> Self {
        Self {
            admin_ids: config.admin_ids.iter().copied().collect(),
        }
    }

    /// Check if the id is listed in the configuration
    pub fn is_configured_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Check admin capability for a stored user
    pub fn is_admin(&self, user: &User) -> bool {
        let allowed = self.is_configured_admin(user.telegram_id) || user.is_admin;
        debug!(user_id = user.telegram_id, allowed = allowed, "Admin capability check");
        allowed
    }
}
