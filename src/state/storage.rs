//! State storage implementation
//!
//! Conversation contexts are persisted as JSON, either in Redis with a TTL
//! or in an in-process map for local runs and tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::context::ConversationContext;
use crate::config::RedisConfig;
use crate::utils::errors::Result;

/// Persistence seam for per-chat conversation contexts
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the context of a chat; expired contexts load as absent
    async fn load(&self, chat_id: i64) -> Result<Option<ConversationContext>>;
    async fn save(&self, context: &ConversationContext) -> Result<()>;
    async fn clear(&self, chat_id: i64) -> Result<()>;
}

/// Redis-based state storage
#[derive(Clone)]
pub struct RedisStateStorage {
    connection_manager: redis::aio::ConnectionManager,
    config: RedisConfig,
}

impl RedisStateStorage {
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    fn context_key(&self, chat_id: i64) -> String {
        format!("{}context:{}", self.config.prefix, chat_id)
    }

    fn ttl_for(&self, context: &ConversationContext) -> u64 {
        match context.expires_at {
            Some(expires_at) => {
                let remaining = (expires_at - chrono::Utc::now()).num_seconds();
                // Minimum 60 seconds
                std::cmp::max(remaining, 60) as u64
            }
            None => self.config.ttl_seconds,
        }
    }
}

#[async_trait]
impl StateStore for RedisStateStorage {
    async fn load(&self, chat_id: i64) -> Result<Option<ConversationContext>> {
        let key = self.context_key(chat_id);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await.map_err(|e| {
            error!(chat_id = chat_id, error = %e, "Failed to get context from Redis");
            e
        })?;

        let Some(data) = serialized else {
            debug!(chat_id = chat_id, "No context found in Redis");
            return Ok(None);
        };

        let context: ConversationContext = match serde_json::from_str(&data) {
            Ok(context) => context,
            Err(e) => {
                // Undecodable contexts are dropped
                warn!(chat_id = chat_id, error = %e, "Discarding undecodable context");
                self.clear(chat_id).await?;
                return Ok(None);
            }
        };

        if context.is_expired() {
            warn!(chat_id = chat_id, expires_at = ?context.expires_at, "Context has expired, removing");
            self.clear(chat_id).await?;
            return Ok(None);
        }

        debug!(chat_id = chat_id, flow = context.dialogue.name(), "Context loaded");
        Ok(Some(context))
    }

    async fn save(&self, context: &ConversationContext) -> Result<()> {
        let key = self.context_key(context.chat_id);
        let serialized = serde_json::to_string(context)?;
        let ttl_seconds = self.ttl_for(context);

        let mut conn = self.connection_manager.clone();
        conn.set_ex::<_, _, ()>(&key, serialized, ttl_seconds)
            .await
            .map_err(|e| {
                error!(chat_id = context.chat_id, error = %e, "Failed to save context to Redis");
                e
            })?;

        debug!(
            chat_id = context.chat_id,
            flow = context.dialogue.name(),
            ttl_seconds = ttl_seconds,
            "Context saved to Redis"
        );
        Ok(())
    }

    async fn clear(&self, chat_id: i64) -> Result<()> {
        let key = self.context_key(chat_id);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        if deleted > 0 {
            debug!("Deleted context for chat {}", chat_id);
        }

        Ok(())
    }
}

/// In-process state storage
#[derive(Debug, Default)]
pub struct MemoryStateStorage {
    contexts: RwLock<HashMap<i64, ConversationContext>>,
}

impl MemoryStateStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.contexts.read().await.len()
    }

    /// Drop every expired context, returning how many were removed
    pub async fn cleanup_expired_contexts(&self) -> usize {
        let mut contexts = self.contexts.write().await;
        let before = contexts.len();
        contexts.retain(|_, context| !context.is_expired());
        let cleaned = before - contexts.len();
        if cleaned > 0 {
            debug!("Cleaned up {} expired contexts", cleaned);
        }
        cleaned
    }

    /// Sweep expired contexts on a fixed interval until the task is aborted
    pub fn spawn_cleanup(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        info!("Started state cleanup task with interval {:?}", every);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let count = self.cleanup_expired_contexts().await;
                if count > 0 {
                    info!("Cleanup task removed {} expired contexts", count);
                }
            }
        })
    }
}

#[async_trait]
impl StateStore for MemoryStateStorage {
    async fn load(&self, chat_id: i64) -> Result<Option<ConversationContext>> {
        let context = self.contexts.read().await.get(&chat_id).cloned();
        match context {
            Some(context) if context.is_expired() => {
                self.contexts.write().await.remove(&chat_id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn save(&self, context: &ConversationContext) -> Result<()> {
        let mut contexts = self.contexts.write().await;
        contexts.retain(|_, stored| !stored.is_expired());
        if context.is_expired() {
            contexts.remove(&context.chat_id);
        } else {
            contexts.insert(context.chat_id, context.clone());
        }
        Ok(())
    }

    async fn clear(&self, chat_id: i64) -> Result<()> {
        self.contexts.write().await.remove(&chat_id);
        Ok(())
    }
}
