use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use super::{BoardRow, checked, parse_id};
use crate::{
    auth::CurrentUser,
    db::entities::board,
    error::AppError,
    response::{render, render_with_status},
    routes::paths,
    services::{ServiceContext, todo_service::TodoInput},
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TodoForm {
    pub name: String,
    pub description: String,
    pub important: Option<String>,
}

impl From<TodoForm> for TodoInput {
    fn from(form: TodoForm) -> Self {
        Self {
            important: checked(form.important.as_deref()),
            name: form.name,
            description: form.description,
        }
    }
}

#[derive(Template)]
#[template(path = "todo_form.html")]
struct TodoFormTemplate {
    logged_in: bool,
    board: BoardRow,
    heading: &'static str,
    action: String,
    name: String,
    description: String,
    important: bool,
    error: String,
}

impl TodoFormTemplate {
    fn new(
        board: &board::Model,
        heading: &'static str,
        action: String,
        input: TodoInput,
    ) -> Self {
        Self {
            logged_in: true,
            board: BoardRow::from(board),
            heading,
            action,
            name: input.name,
            description: input.description,
            important: input.important,
            error: String::new(),
        }
    }

    fn with_error(mut self, message: String) -> Self {
        self.error = message;
        self
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/dashboard/{board_id}/add_todo", get(new_todo).post(create_todo))
        .route(
            "/dashboard/{board_id}/edit_todo/{todo_id}",
            get(edit_todo_form).post(edit_todo),
        )
        .route(
            "/dashboard/{board_id}/delete_todo/{todo_id}",
            post(delete_todo),
        )
        .route(
            "/dashboard/{board_id}/complete_todo/{todo_id}",
            post(complete_todo),
        )
        .with_state(state)
}

fn parse_ids((board_id, todo_id): &(String, String)) -> Result<(Uuid, Uuid), AppError> {
    Ok((parse_id(board_id)?, parse_id(todo_id)?))
}

fn back_to_board(board_id: &Uuid) -> Redirect {
    Redirect::to(&paths::board(board_id))
}

async fn new_todo(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let board = ServiceContext::from_state(state.as_ref())
        .board()
        .require_owned(&user, &id)
        .await?;
    let page = TodoFormTemplate::new(
        &board,
        "Add todo",
        paths::add_todo(&id),
        TodoInput::default(),
    );
    Ok(render(&page)?.into_response())
}

async fn create_todo(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let services = ServiceContext::from_state(state.as_ref());
    let input = TodoInput::from(form);
    match services.todo().create(&user, &id, &input).await {
        Ok(_) => Ok(back_to_board(&id).into_response()),
        Err(AppError::Validation(message)) => {
            let board = services.board().require_owned(&user, &id).await?;
            let page = TodoFormTemplate::new(&board, "Add todo", paths::add_todo(&id), input)
                .with_error(message);
            render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &page)
        }
        Err(err) => Err(err),
    }
}

async fn edit_todo_form(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(ids): Path<(String, String)>,
) -> Result<Response, AppError> {
    let (board_id, todo_id) = parse_ids(&ids)?;
    let (board, todo) = ServiceContext::from_state(state.as_ref())
        .todo()
        .require_owned(&user, &board_id, &todo_id)
        .await?;
    let page = TodoFormTemplate::new(
        &board,
        "Edit todo",
        paths::edit_todo(&board_id, &todo_id),
        TodoInput::from(&todo),
    );
    Ok(render(&page)?.into_response())
}

async fn edit_todo(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(ids): Path<(String, String)>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let (board_id, todo_id) = parse_ids(&ids)?;
    let services = ServiceContext::from_state(state.as_ref());
    let input = TodoInput::from(form);
    match services.todo().edit(&user, &board_id, &todo_id, &input).await {
        Ok(_) => Ok(back_to_board(&board_id).into_response()),
        Err(AppError::Validation(message)) => {
            let board = services.board().require_owned(&user, &board_id).await?;
            let page = TodoFormTemplate::new(
                &board,
                "Edit todo",
                paths::edit_todo(&board_id, &todo_id),
                input,
            )
            .with_error(message);
            render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &page)
        }
        Err(err) => Err(err),
    }
}

async fn delete_todo(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(ids): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    let (board_id, todo_id) = parse_ids(&ids)?;
    ServiceContext::from_state(state.as_ref())
        .todo()
        .delete(&user, &board_id, &todo_id)
        .await?;
    Ok(back_to_board(&board_id))
}

async fn complete_todo(
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(ids): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    let (board_id, todo_id) = parse_ids(&ids)?;
    ServiceContext::from_state(state.as_ref())
        .todo()
        .toggle(&user, &board_id, &todo_id)
        .await?;
    Ok(back_to_board(&board_id))
}
