use crate::db::dao::DaoLayerError;

/// Everything a request handler can fail with. How each variant reaches
/// the browser lives in `response.rs`.
#[derive(Debug)]
pub enum AppError {
    DuplicateEmail,
    UnknownUser,
    InvalidCredentials,
    NotFound(String),
    /// No logged-in session.
    Unauthorized,
    /// The resource exists but its ownership chain ends at another user.
    Forbidden,
    Validation(String),
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::DuplicateEmail => "User already exists",
            Self::UnknownUser => "Unknown user",
            Self::InvalidCredentials => "Invalid credentials",
            Self::Unauthorized => "Login required",
            Self::Forbidden => "Not allowed",
            Self::NotFound(message) | Self::Validation(message) | Self::Internal(message) => {
                message.as_str()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { .. } => AppError::not_found(err.to_string()),
            DaoLayerError::InvalidPagination { .. } | DaoLayerError::Db(_) => {
                AppError::internal(err.to_string())
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::internal(format!("template rendering failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;
    use uuid::Uuid;

    use super::AppError;
    use crate::db::dao::DaoLayerError;

    #[test]
    fn dao_not_found_maps_to_not_found() {
        let id = Uuid::new_v4();
        let err = AppError::from(DaoLayerError::NotFound { entity: "board", id });

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.message(), format!("board not found (id={id})"));
    }

    #[test]
    fn dao_database_errors_are_internal() {
        let err = AppError::from(DaoLayerError::Db(DbErr::Custom("disk full".into())));
        assert!(matches!(err, AppError::Internal(message) if message.contains("disk full")));
    }
}
