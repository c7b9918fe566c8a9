use axum::http::HeaderMap;
use uuid::Uuid;

use super::{
    CurrentUser, Principal, cookies,
    jwt::{JwtKeys, decode_token, encode_token, make_session_claims},
};
use crate::{config::SessionConfig, error::AppError};

pub const SESSION_COOKIE: &str = "taskboard_session";

/// Issues and reads the signed session cookie.
#[derive(Clone)]
pub struct SessionManager {
    keys: JwtKeys,
    ttl_secs: u64,
    secure_cookie: bool,
}

impl SessionManager {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            keys: JwtKeys::from_secret(cfg.secret.as_bytes()),
            ttl_secs: cfg.ttl_secs,
            secure_cookie: cfg.secure_cookie,
        }
    }

    /// `Set-Cookie` value that logs `user_id` in.
    pub fn start(&self, user_id: &Uuid, name: &str) -> Result<String, AppError> {
        let ttl = usize::try_from(self.ttl_secs).unwrap_or(usize::MAX);
        let claims = make_session_claims(user_id, name, ttl);
        let token = encode_token(&self.keys, &claims)?;
        Ok(cookies::build(
            SESSION_COOKIE,
            &token,
            self.ttl_secs,
            self.secure_cookie,
        ))
    }

    /// `Set-Cookie` value that logs the browser out.
    pub fn end(&self) -> String {
        cookies::expire(SESSION_COOKIE, self.secure_cookie)
    }

    /// Who the cookie claims to be. The request extractors confirm the
    /// account against the database before trusting it.
    pub fn principal(&self, headers: &HeaderMap) -> Principal {
        let Some(token) = cookies::read(headers, SESSION_COOKIE) else {
            return Principal::Anonymous;
        };
        let Some(claims) = decode_token(&self.keys, token) else {
            return Principal::Anonymous;
        };
        match claims.sub.parse::<Uuid>() {
            Ok(id) => Principal::User(CurrentUser {
                id,
                name: claims.name,
            }),
            Err(_) => Principal::Anonymous,
        }
    }
}
