use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::{HeaderMap, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    auth::{Flash, Principal},
    error::AppError,
    response::{flash_redirect, render},
    routes::paths,
    services::ServiceContext,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    logged_in: bool,
    flash: String,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    logged_in: bool,
    flash: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(paths::REGISTER, get(register_form).post(register))
        .route(paths::LOGIN, get(login_form).post(login))
        .route(paths::LOGOUT, get(logout))
        .with_state(state)
}

/// Renders an auth form, consuming any pending flash notice.
fn auth_page(flash: Option<Flash>, page: &impl Template) -> Result<Response, AppError> {
    let body = render(page)?;
    Ok(match flash {
        Some(_) => (
            AppendHeaders([(header::SET_COOKIE, Flash::clear_cookie())]),
            body,
        )
            .into_response(),
        None => body.into_response(),
    })
}

fn logged_in_redirect(set_cookie: String) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, set_cookie)]),
        Redirect::to(paths::DASHBOARDS),
    )
        .into_response()
}

async fn register_form(principal: Principal, headers: HeaderMap) -> Result<Response, AppError> {
    let flash = Flash::read(&headers);
    auth_page(
        flash,
        &RegisterTemplate {
            logged_in: principal.is_authenticated(),
            flash: flash.map(Flash::message).unwrap_or_default().to_string(),
        },
    )
}

async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let services = ServiceContext::from_state(state.as_ref());
    let auth = services.auth(state.hasher.as_ref(), &state.sessions);
    match auth.register(&form.email, &form.password, &form.name).await {
        Ok(session) => Ok(logged_in_redirect(session.set_cookie)),
        Err(AppError::Validation(_)) => Ok(flash_redirect(Flash::MissingFields, paths::REGISTER)),
        Err(err) => Err(err),
    }
}

async fn login_form(principal: Principal, headers: HeaderMap) -> Result<Response, AppError> {
    let flash = Flash::read(&headers);
    auth_page(
        flash,
        &LoginTemplate {
            logged_in: principal.is_authenticated(),
            flash: flash.map(Flash::message).unwrap_or_default().to_string(),
        },
    )
}

async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let services = ServiceContext::from_state(state.as_ref());
    let auth = services.auth(state.hasher.as_ref(), &state.sessions);
    let session = auth.login(&form.email, &form.password).await?;
    Ok(logged_in_redirect(session.set_cookie))
}

/// Always clears the cookie. Anonymous callers land on the login page,
/// like any other authenticated route.
async fn logout(State(state): State<Arc<AppState>>, principal: Principal) -> Response {
    let services = ServiceContext::from_state(state.as_ref());
    let set_cookie = services
        .auth(state.hasher.as_ref(), &state.sessions)
        .logout(&principal);
    let location = if principal.is_authenticated() {
        paths::HOME
    } else {
        paths::LOGIN
    };
    (
        AppendHeaders([(header::SET_COOKIE, set_cookie)]),
        Redirect::to(location),
    )
        .into_response()
}
