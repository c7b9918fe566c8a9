use askama::Template;
use axum::{
    http::{StatusCode, header},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};

use crate::{
    auth::{Flash, cookies, session::SESSION_COOKIE},
    error::AppError,
    routes::paths,
};

/// Renders `template` into an HTML body.
pub fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// Same as [`render`], with a non-200 status.
pub fn render_with_status(
    status: StatusCode,
    template: &impl Template,
) -> Result<Response, AppError> {
    Ok((status, render(template)?).into_response())
}

/// 303 to `location`, leaving `flash` for the next page.
pub fn flash_redirect(flash: Flash, location: &str) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, flash.set_cookie())]),
        Redirect::to(location),
    )
        .into_response()
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    logged_in: bool,
    title: &'a str,
    message: &'a str,
}

fn error_page(status: StatusCode, title: &str, message: &str) -> Response {
    let page = ErrorTemplate {
        logged_in: false,
        title,
        message,
    };
    match page.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render error page");
            (status, message.to_string()).into_response()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::DuplicateEmail => flash_redirect(Flash::DuplicateEmail, paths::LOGIN),
            AppError::UnknownUser => flash_redirect(Flash::UnknownUser, paths::LOGIN),
            AppError::InvalidCredentials => {
                flash_redirect(Flash::InvalidCredentials, paths::LOGIN)
            }
            // A stale or orphaned session cookie goes with the redirect.
            AppError::Unauthorized => (
                AppendHeaders([(header::SET_COOKIE, cookies::expire(SESSION_COOKIE, false))]),
                Redirect::to(paths::LOGIN),
            )
                .into_response(),
            AppError::Forbidden => Redirect::to(paths::DASHBOARDS).into_response(),
            AppError::Validation(message) => {
                error_page(StatusCode::UNPROCESSABLE_ENTITY, "Invalid input", &message)
            }
            AppError::NotFound(message) => {
                tracing::debug!(%message, "resource not found");
                error_page(StatusCode::NOT_FOUND, "Not found", "Nothing lives here.")
            }
            AppError::Internal(message) => {
                tracing::error!(%message, "request failed");
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "The server hit an unexpected error.",
                )
            }
        }
    }
}
