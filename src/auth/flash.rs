use axum::http::HeaderMap;

use super::cookies;

pub const FLASH_COOKIE: &str = "taskboard_flash";
const FLASH_MAX_AGE_SECS: u64 = 60;

/// One-shot notice carried across a redirect to the login or register form.
/// Only the code travels in the cookie; the text is looked up on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    DuplicateEmail,
    UnknownUser,
    InvalidCredentials,
    MissingFields,
}

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Flash::DuplicateEmail => "duplicate_email",
            Flash::UnknownUser => "unknown_user",
            Flash::InvalidCredentials => "invalid_credentials",
            Flash::MissingFields => "missing_fields",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "duplicate_email" => Some(Flash::DuplicateEmail),
            "unknown_user" => Some(Flash::UnknownUser),
            "invalid_credentials" => Some(Flash::InvalidCredentials),
            "missing_fields" => Some(Flash::MissingFields),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::DuplicateEmail => "You've already signed up with that email",
            Flash::UnknownUser => "User with this email doesn't exist.",
            Flash::InvalidCredentials => "Invalid Password.",
            Flash::MissingFields => "Email and password are required.",
        }
    }

    /// `Set-Cookie` value that stores this notice.
    pub fn set_cookie(self) -> String {
        cookies::build(FLASH_COOKIE, self.code(), FLASH_MAX_AGE_SECS, false)
    }

    /// Reads the pending notice, if any. Unknown codes are ignored.
    pub fn read(headers: &HeaderMap) -> Option<Self> {
        cookies::read(headers, FLASH_COOKIE).and_then(Self::from_code)
    }

    /// `Set-Cookie` value that consumes the notice.
    pub fn clear_cookie() -> String {
        cookies::expire(FLASH_COOKIE, false)
    }
}
