use std::{path::PathBuf, sync::Arc};

use askama::Template;
use axum::{Router, response::Html, routing::get};
use tower_http::services::ServeDir;

use crate::{
    auth::Principal,
    error::AppError,
    response::render,
    routes::paths,
    state::AppState,
};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    logged_in: bool,
    user_name: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(paths::HOME, get(index))
        .nest_service(paths::STATIC, ServeDir::new(resolve_public_dir()))
        .with_state(state)
}

fn resolve_public_dir() -> PathBuf {
    if let Ok(current_dir) = std::env::current_dir() {
        let candidate = current_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let candidate = exe_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("public")
}

async fn index(principal: Principal) -> Result<Html<String>, AppError> {
    render(&IndexTemplate {
        logged_in: principal.is_authenticated(),
        user_name: principal.user().map(|u| u.name.clone()).unwrap_or_default(),
    })
}
