//! AmiHelper Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use tracing::{error, info, warn};

use AmiHelper::{
    admin_panel,
    config::StateBackend,
    database::{create_pool, run_migrations, DatabaseService},
    flows::App,
    handlers,
    i18n::I18n,
    services::{AuthService, TelegramMessenger},
    state::{MemoryStateStorage, RedisStateStorage, StateStore},
    utils::logging,
    Settings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", AmiHelper::info());

    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;
    run_migrations(&pool).await?;
    let database = Arc::new(DatabaseService::new(pool));

    let states: Arc<dyn StateStore> = match settings.state.backend {
        StateBackend::Redis => {
            info!("Connecting to Redis...");
            Arc::new(RedisStateStorage::new(settings.redis.clone()).await?)
        }
        StateBackend::Memory => {
            warn!("Conversation state is kept in memory and will not survive a restart");
            let storage = Arc::new(MemoryStateStorage::new());
            storage.clone().spawn_cleanup(Duration::from_secs(
                settings.state.cleanup_interval_seconds.max(1),
            ));
            storage
        }
    };

    info!("Loading translations...");
    let mut i18n = I18n::new(&settings.i18n);
    i18n.load_translations(&settings.i18n.translations_dir).await?;

    let bot = Bot::new(&settings.bot.token);
    let app = Arc::new(App::new(
        database.clone(),
        Arc::new(TelegramMessenger::new(bot.clone())),
        states,
        Arc::new(i18n),
        AuthService::new(&settings.bot),
        settings.redis.ttl_seconds,
    ));

    if settings.admin_panel.enabled {
        let config = settings.admin_panel.clone();
        let store = database.clone();
        tokio::spawn(async move {
            if let Err(e) = admin_panel::serve(store, config).await {
                error!(error = %e, "Admin panel stopped");
            }
        });
    }

    let mut dispatcher = Dispatcher::builder(bot, handlers::create_handler())
        .dependencies(dptree::deps![app])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    if let Some(webhook_url) = &settings.bot.webhook_url {
        info!("Webhook URL configured: {}", webhook_url);
        info!("Webhooks are not served by this binary, falling back to polling");
    }

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    info!("AmiHelper bot has been shut down.");
    Ok(())
}
