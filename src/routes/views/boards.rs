use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;

use super::{BoardRow, TodoRow, parse_id};
use crate::{
    auth::CurrentUser,
    db::entities::todo,
    error::AppError,
    response::render,
    routes::paths,
    services::ServiceContext,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BoardForm {
    pub name: String,
}

#[derive(Template)]
#[template(path = "boards.html")]
struct BoardsTemplate {
    logged_in: bool,
    user_name: String,
    boards: Vec<BoardRow>,
    add_url: &'static str,
}

/// One titled column on the board page.
struct TodoSection {
    id: &'static str,
    title: &'static str,
    todos: Vec<TodoRow>,
}

#[derive(Template)]
#[template(path = "board.html")]
struct BoardTemplate {
    logged_in: bool,
    board: BoardRow,
    sections: Vec<TodoSection>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(paths::DASHBOARDS, get(list_boards))
        .route(paths::ADD_DASHBOARD, post(create_board))
        .route("/update_dashboard/{id}", post(rename_board))
        .route("/delete_dashboard/{id}", post(delete_board))
        .route("/dashboard/{board_id}", get(view_board))
        .with_state(state)
}

fn rows(todos: &[todo::Model]) -> Vec<TodoRow> {
    todos.iter().map(TodoRow::from).collect()
}

async fn list_boards(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let boards = ServiceContext::from_state(state.as_ref())
        .board()
        .list_for(&user)
        .await?;
    render(&BoardsTemplate {
        logged_in: true,
        user_name: user.name,
        boards: boards.iter().map(BoardRow::from).collect(),
        add_url: paths::ADD_DASHBOARD,
    })
}

async fn create_board(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Form(form): Form<BoardForm>,
) -> Result<Redirect, AppError> {
    ServiceContext::from_state(state.as_ref())
        .board()
        .create(&user, &form.name)
        .await?;
    Ok(Redirect::to(paths::DASHBOARDS))
}

async fn rename_board(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<BoardForm>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let board = ServiceContext::from_state(state.as_ref())
        .board()
        .rename(&user, &id, &form.name)
        .await?;
    Ok(Redirect::to(&paths::board(&board.id)))
}

async fn delete_board(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    ServiceContext::from_state(state.as_ref())
        .board()
        .delete(&user, &id)
        .await?;
    Ok(Redirect::to(paths::DASHBOARDS))
}

async fn view_board(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let view = ServiceContext::from_state(state.as_ref())
        .board()
        .view(&user, &id)
        .await?;

    render(&BoardTemplate {
        logged_in: true,
        board: BoardRow::from(&view.board),
        sections: vec![
            TodoSection {
                id: "important",
                title: "Important",
                todos: rows(&view.todos.important),
            },
            TodoSection {
                id: "other",
                title: "Other",
                todos: rows(&view.todos.other),
            },
            TodoSection {
                id: "completed",
                title: "Completed",
                todos: rows(&view.todos.completed),
            },
        ],
    })
}
