use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{error::AppError, services::ServiceContext, state::AppState};

/// The logged-in user, as stored when the request was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
}

/// Who is making the request. Resolved once per request from the session
/// cookie and the user table; never stored anywhere global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(CurrentUser),
}

impl Principal {
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            Principal::User(user) => Some(user),
            Principal::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// A signed cookie only names a user; the account must still exist.
    async fn resolve(parts: &Parts, state: &AppState) -> Result<Self, AppError> {
        let Principal::User(claimed) = state.sessions.principal(&parts.headers) else {
            return Ok(Principal::Anonymous);
        };

        match ServiceContext::from_state(state)
            .user()
            .find_by_id(&claimed.id)
            .await?
        {
            Some(user) => Ok(Principal::User(CurrentUser {
                id: user.id,
                name: user.name,
            })),
            None => {
                tracing::debug!(user_id = %claimed.id, "session names an unknown user");
                Ok(Principal::Anonymous)
            }
        }
    }
}

impl FromRequestParts<Arc<AppState>> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Principal::resolve(parts, state).await
    }
}

/// Extracting a `CurrentUser` is the authentication gate: anonymous
/// requests are rejected with `AppError::Unauthorized`.
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match Principal::resolve(parts, state).await? {
            Principal::User(user) => Ok(user),
            Principal::Anonymous => Err(AppError::Unauthorized),
        }
    }
}
