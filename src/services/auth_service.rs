use tracing::{info, warn};

use crate::{
    auth::{CurrentUser, PasswordHasher, Principal, SessionManager},
    error::AppError,
    services::user_service::UserService,
};

/// A freshly established login: who it is for and the cookie that carries it.
#[derive(Debug)]
pub struct LoginSession {
    pub user: CurrentUser,
    pub set_cookie: String,
}

pub struct AuthService<'a> {
    users: UserService,
    hasher: &'a dyn PasswordHasher,
    sessions: &'a SessionManager,
}

impl<'a> AuthService<'a> {
    pub fn new(
        users: UserService,
        hasher: &'a dyn PasswordHasher,
        sessions: &'a SessionManager,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<LoginSession, AppError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }
        if self.users.find_by_email(email).await?.is_some() {
            info!("registration rejected: email already in use");
            return Err(AppError::DuplicateEmail);
        }

        let hash = self.hasher.hash(password)?;
        let user = self.users.create_user(email, &hash, name.trim()).await?;
        info!(user_id = %user.id, "registered user");

        self.establish(CurrentUser {
            id: user.id,
            name: user.name,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, AppError> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_by_email(email).await? else {
            info!("login rejected: unknown email");
            return Err(AppError::UnknownUser);
        };
        if !self.hasher.verify(&user.password_hash, password)? {
            warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        info!(user_id = %user.id, "user logged in");
        self.establish(CurrentUser {
            id: user.id,
            name: user.name,
        })
    }

    /// `Set-Cookie` value ending whatever session the browser holds.
    pub fn logout(&self, principal: &Principal) -> String {
        if let Some(user) = principal.user() {
            info!(user_id = %user.id, "user logged out");
        }
        self.sessions.end()
    }

    fn establish(&self, user: CurrentUser) -> Result<LoginSession, AppError> {
        let set_cookie = self.sessions.start(&user.id, &user.name)?;
        Ok(LoginSession { user, set_cookie })
    }
}

/// Emails are stored and looked up in this form.
fn normalize_email(email: &str) -> &str {
    email.trim()
}
