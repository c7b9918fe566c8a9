use sea_orm::SqlErr;
use uuid::Uuid;

use crate::{
    db::dao::{DaoLayerError, UserDao},
    db::entities::user,
    error::AppError,
};

#[derive(Clone)]
pub struct UserService {
    user_dao: UserDao,
}

impl UserService {
    pub fn new(user_dao: UserDao) -> Self {
        Self { user_dao }
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<user::Model>, AppError> {
        match self.user_dao.find_user(id).await {
            Ok(model) => Ok(Some(model)),
            Err(DaoLayerError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AppError> {
        Ok(self.user_dao.find_by_email(email).await?)
    }

    /// A unique-index violation on `email` surfaces as `DuplicateEmail`, so
    /// two racing registrations still end with exactly one account.
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<user::Model, AppError> {
        match self.user_dao.create_user(email, password_hash, name).await {
            Ok(model) => Ok(model),
            Err(DaoLayerError::Db(err))
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                Err(AppError::DuplicateEmail)
            }
            Err(err) => Err(err.into()),
        }
    }
}
