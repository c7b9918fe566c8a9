use std::sync::Arc;

use axum::Router;
use uuid::Uuid;

use crate::{
    db::entities::{board, todo},
    error::AppError,
    routes::paths,
    state::AppState,
};

pub mod auth;
pub mod boards;
pub mod public;
pub mod todos;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router(state.clone()))
        .merge(auth::router(state.clone()))
        .merge(boards::router(state.clone()))
        .merge(todos::router(state))
}

/// Path ids that are not UUIDs cannot name anything, so they are `NotFound`.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("no record with id {raw:?}")))
}

/// HTML checkboxes are only submitted when ticked.
pub(crate) fn checked(value: Option<&str>) -> bool {
    value.is_some()
}

/// Board fields plus the URLs its page links to.
pub(crate) struct BoardRow {
    pub name: String,
    pub view_url: String,
    pub rename_url: String,
    pub delete_url: String,
    pub add_todo_url: String,
}

impl From<&board::Model> for BoardRow {
    fn from(board: &board::Model) -> Self {
        Self {
            name: board.name.clone(),
            view_url: paths::board(&board.id),
            rename_url: paths::rename_board(&board.id),
            delete_url: paths::delete_board(&board.id),
            add_todo_url: paths::add_todo(&board.id),
        }
    }
}

pub(crate) struct TodoRow {
    pub name: String,
    pub description: String,
    pub important: bool,
    pub completed: bool,
    pub edit_url: String,
    pub delete_url: String,
    pub complete_url: String,
}

impl From<&todo::Model> for TodoRow {
    fn from(todo: &todo::Model) -> Self {
        Self {
            name: todo.name.clone(),
            description: todo.description.clone().unwrap_or_default(),
            important: todo.important,
            completed: todo.completed,
            edit_url: paths::edit_todo(&todo.board_id, &todo.id),
            delete_url: paths::delete_todo(&todo.board_id, &todo.id),
            complete_url: paths::complete_todo(&todo.board_id, &todo.id),
        }
    }
}
