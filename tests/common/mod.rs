#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    body::{self, Body},
    http::{Request, Response, StatusCode, header},
};
use tower::ServiceExt; // for `oneshot`
use uuid::Uuid;

use taskboard::{
    db::dao::{DaoContext, TodoFilter},
    db::entities::{board, todo},
    state::AppState,
    test_helpers::{test_router, test_state},
};

/// A browser stand-in: replays the cookies the app sets.
pub struct Client {
    pub state: Arc<AppState>,
    app: Router,
    cookies: HashMap<String, String>,
}

impl Client {
    pub async fn new() -> Self {
        let state = test_state().await.expect("test state should build");
        Self::with_state(state)
    }

    /// A second browser against the same database.
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self {
            app: test_router(Arc::clone(&state)),
            state,
            cookies: HashMap::new(),
        }
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Response<Body> {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(form).unwrap()))
            .unwrap();
        self.send(request).await
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    /// Installs a validly signed session for `user_id`, whether or not that
    /// account exists.
    pub fn sign_in_as(&mut self, user_id: &Uuid, name: &str) {
        let set_cookie = self
            .state
            .sessions
            .start(user_id, name)
            .expect("session should start");
        let pair = set_cookie.split(';').next().unwrap_or_default();
        let (cookie, token) = pair.split_once('=').expect("cookie pair");
        self.set_cookie(cookie, token);
    }

    pub async fn register(&mut self, email: &str, password: &str, name: &str) -> Response<Body> {
        self.post(
            "/register",
            &[("email", email), ("password", password), ("name", name)],
        )
        .await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Response<Body> {
        self.post("/login", &[("email", email), ("password", password)])
            .await
    }

    pub async fn user_id(&self, email: &str) -> Uuid {
        DaoContext::new(&self.state.db)
            .user()
            .find_by_email(email)
            .await
            .unwrap()
            .expect("user should exist")
            .id
    }

    pub async fn boards_of(&self, email: &str) -> Vec<board::Model> {
        let user_id = self.user_id(email).await;
        DaoContext::new(&self.state.db)
            .board()
            .list_by_user(&user_id)
            .await
            .unwrap()
    }

    pub async fn todos_on(&self, board_id: &Uuid) -> Vec<todo::Model> {
        DaoContext::new(&self.state.db)
            .todo()
            .list_by_board(board_id, TodoFilter::default())
            .await
            .unwrap()
    }

    /// Registers `email` and creates one board, returning its id.
    pub async fn user_with_board(&mut self, email: &str, board_name: &str) -> Uuid {
        assert_redirect(&self.register(email, "pw", "User").await, "/dashboards");
        assert_redirect(
            &self.post("/add_dashboard", &[("name", board_name)]).await,
            "/dashboards",
        );
        self.boards_of(email)
            .await
            .into_iter()
            .find(|b| b.name == board_name)
            .expect("board should exist")
            .id
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self.app.clone().oneshot(request).await.unwrap();
        for value in response.headers().get_all(header::SET_COOKIE) {
            let value = value.to_str().unwrap();
            let pair = value.split(';').next().unwrap_or_default();
            let Some((name, content)) = pair.split_once('=') else {
                continue;
            };
            if content.is_empty() || value.contains("Max-Age=0") {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), content.to_string());
            }
        }
        response
    }
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Text of the `<section id="...">` with the given id.
pub fn section<'a>(html: &'a str, id: &str) -> &'a str {
    let start = html
        .find(&format!("<section id=\"{id}\""))
        .expect("section should be rendered");
    let rest = &html[start..];
    let end = rest.find("</section>").expect("section should close");
    &rest[..end]
}
