//! Shared setup for tests that drive the whole router.

use std::sync::Arc;

use argon2::Params;
use axum::Router;

use crate::{
    auth::{Argon2PasswordHasher, PasswordHasher},
    config::AppConfig,
    db::connection,
    middleware::catch_panic_layer,
    routes::router,
    state::AppState,
};

/// Defaults with a private in-memory SQLite database. One pooled
/// connection, since every SQLite memory connection is its own database.
pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.database.url = "sqlite::memory:".to_string();
    cfg.database.max_connections = 1;
    cfg.database.min_idle = 1;
    cfg.session.secret = "test-session-secret".to_string();
    cfg
}

/// Argon2 with minimal cost parameters.
pub fn fast_hasher() -> anyhow::Result<Arc<dyn PasswordHasher>> {
    let params = Params::new(8, 1, 1, None).map_err(|err| anyhow::anyhow!("argon2 params: {err}"))?;
    Ok(Arc::new(Argon2PasswordHasher::with_params(params)))
}

pub async fn test_state() -> anyhow::Result<Arc<AppState>> {
    let cfg = test_config();
    let db = connection::connect(&cfg.database).await?;
    Ok(AppState::with_hasher(cfg, db, fast_hasher()?))
}

pub fn test_router(state: Arc<AppState>) -> Router {
    router(state).layer(catch_panic_layer())
}
