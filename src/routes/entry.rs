use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::views;

pub fn router(state: Arc<AppState>) -> Router {
    views::router(state)
}
