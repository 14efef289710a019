pub mod appresult;
pub mod auth;
pub mod config;
pub mod db;
pub mod messages;
pub mod registration;
pub mod res;
pub mod session;

use axum::{Router, extract::FromRef};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

pub use appresult::{AppError, AppResult};
pub use config::Config;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

pub fn session_layer(expiry: time::Duration) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(expiry))
}

pub fn app(app_state: AppState, session_expiry: time::Duration) -> Router {
    Router::new()
        .merge(messages::router())
        .merge(registration::router())
        .merge(auth::router())

        .with_state(app_state)
        .layer(session_layer(session_expiry))
        .layer(TraceLayer::new_for_http())
}
