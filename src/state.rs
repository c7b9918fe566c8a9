use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    auth::{Argon2PasswordHasher, PasswordHasher, SessionManager},
    config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub sessions: SessionManager,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        Self::with_hasher(config, db, Arc::new(Argon2PasswordHasher::default()))
    }

    pub fn with_hasher(
        config: AppConfig,
        db: DatabaseConnection,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Arc<Self> {
        let sessions = SessionManager::new(&config.session);
        Arc::new(Self {
            config,
            db,
            sessions,
            hasher,
        })
    }
}
