use sea_orm::DatabaseConnection;

use crate::{
    auth::{PasswordHasher, SessionManager},
    db::dao::DaoContext,
    services::{
        auth_service::AuthService, board_service::BoardService, todo_service::TodoService,
        user_service::UserService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.daos.user())
    }

    pub fn auth<'a>(
        &self,
        hasher: &'a dyn PasswordHasher,
        sessions: &'a SessionManager,
    ) -> AuthService<'a> {
        AuthService::new(self.user(), hasher, sessions)
    }

    pub fn board(&self) -> BoardService {
        BoardService::new(self.daos.board(), self.daos.todo())
    }

    pub fn todo(&self) -> TodoService {
        TodoService::new(self.board(), self.daos.todo())
    }
}
