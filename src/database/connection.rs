//! PostgreSQL pool built from the `[database]` settings

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::utils::errors::Result;

pub type DatabasePool = PgPool;

fn optional_secs(seconds: u64) -> Option<Duration> {
    (seconds > 0).then(|| Duration::from_secs(seconds))
}

impl DatabaseConfig {
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_seconds))
            .idle_timeout(optional_secs(self.idle_timeout_seconds))
            .max_lifetime(optional_secs(self.max_lifetime_seconds))
    }
}

/// Connect, then make sure the server answers before handing the pool out
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool> {
    let pool = config.pool_options().connect(&config.url).await?;
    health_check(&pool).await?;

    info!(max_connections = config.max_connections, "Database connection pool created");
    Ok(pool)
}

pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

pub async fn health_check(pool: &DatabasePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
