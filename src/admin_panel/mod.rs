//! Admin CRUD panel
//!
//! A small JSON API over the four entities, served by axum behind HTTP basic
//! auth. Every route lives under the configured base path.

pub mod auth;
pub mod resources;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::config::AdminPanelConfig;
use crate::database::AdminStore;
use crate::utils::errors::{AmiHelperError, Result};

pub use auth::require_basic_auth;

const ENTITIES: [&str; 4] = ["users", "events", "registrations", "faq"];

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Shared state of the admin routes
#[derive(Clone)]
pub struct AdminState {
    pub store: Arc<dyn AdminStore>,
    pub credentials: Arc<Credentials>,
    pub page_size: u32,
}

/// `/extra-wh-2020/` becomes `/extra-wh-2020`; the root becomes an empty prefix
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

async fn index() -> Json<Value> {
    Json(json!({ "entities": ENTITIES }))
}

/// Build the admin router with authentication applied to every route
pub fn router(store: Arc<dyn AdminStore>, config: &AdminPanelConfig) -> Router {
    let state = AdminState {
        store,
        credentials: Arc::new(Credentials {
            username: config.username.clone(),
            password: config.password.clone(),
        }),
        page_size: config.page_size.max(1),
    };
    let base = normalize_base_path(&config.base_path);

    let mut routes = Router::new()
        .route(&format!("{}/", base), get(index))
        .route(
            &format!("{}/users", base),
            get(resources::list_users).post(resources::create_user),
        )
        .route(
            &format!("{}/users/{{id}}", base),
            get(resources::get_user)
                .put(resources::update_user)
                .delete(resources::delete_user),
        )
        .route(
            &format!("{}/events", base),
            get(resources::list_events).post(resources::create_event),
        )
        .route(
            &format!("{}/events/{{id}}", base),
            get(resources::get_event)
                .put(resources::update_event)
                .delete(resources::delete_event),
        )
        .route(
            &format!("{}/registrations", base),
            get(resources::list_registrations).post(resources::create_registration),
        )
        .route(
            &format!("{}/registrations/{{id}}", base),
            get(resources::get_registration)
                .put(resources::update_registration)
                .delete(resources::delete_registration),
        )
        .route(
            &format!("{}/faq", base),
            get(resources::list_categories).post(resources::create_category),
        )
        .route(
            &format!("{}/faq/{{id}}", base),
            get(resources::get_category)
                .put(resources::update_category)
                .delete(resources::delete_category),
        );

    if !base.is_empty() {
        routes = routes.route(&base, get(index));
    }

    routes
        .layer(middleware::from_fn_with_state(state.clone(), require_basic_auth))
        .with_state(state)
}

/// Bind the configured address and serve until the process exits
pub async fn serve(store: Arc<dyn AdminStore>, config: AdminPanelConfig) -> Result<()> {
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|e| AmiHelperError::Config(format!("Invalid admin panel bind address: {}", e)))?;

    let app = router(store, &config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, base_path = %config.base_path, "Admin panel listening");

    axum::serve(listener, app).await?;
    Ok(())
}
