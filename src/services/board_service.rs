use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    db::dao::{BoardDao, TodoDao, TodoFilter},
    db::entities::board,
    error::AppError,
    services::todo_service::{TodoBuckets, partition},
};

/// A board together with its todos split for display.
#[derive(Debug)]
pub struct BoardView {
    pub board: board::Model,
    pub todos: TodoBuckets,
}

#[derive(Clone)]
pub struct BoardService {
    board_dao: BoardDao,
    todo_dao: TodoDao,
}

impl BoardService {
    pub fn new(board_dao: BoardDao, todo_dao: TodoDao) -> Self {
        Self {
            board_dao,
            todo_dao,
        }
    }

    pub async fn list_for(&self, user: &CurrentUser) -> Result<Vec<board::Model>, AppError> {
        Ok(self.board_dao.list_by_user(&user.id).await?)
    }

    pub async fn create(&self, user: &CurrentUser, name: &str) -> Result<board::Model, AppError> {
        let name = required_name(name)?;
        Ok(self.board_dao.create_board(&user.id, name).await?)
    }

    /// Resolves `board_id` and checks that it belongs to `user`.
    pub async fn require_owned(
        &self,
        user: &CurrentUser,
        board_id: &Uuid,
    ) -> Result<board::Model, AppError> {
        let board = self.board_dao.find_board(board_id).await?;
        if board.user_id != user.id {
            warn!(user_id = %user.id, %board_id, "board access denied");
            return Err(AppError::Forbidden);
        }
        Ok(board)
    }

    pub async fn rename(
        &self,
        user: &CurrentUser,
        board_id: &Uuid,
        name: &str,
    ) -> Result<board::Model, AppError> {
        self.require_owned(user, board_id).await?;
        let name = required_name(name)?;
        Ok(self.board_dao.update_name(board_id, name).await?)
    }

    pub async fn delete(&self, user: &CurrentUser, board_id: &Uuid) -> Result<(), AppError> {
        self.require_owned(user, board_id).await?;
        self.board_dao.delete_board(board_id).await?;
        Ok(())
    }

    pub async fn view(&self, user: &CurrentUser, board_id: &Uuid) -> Result<BoardView, AppError> {
        let board = self.require_owned(user, board_id).await?;
        let todos = self
            .todo_dao
            .list_by_board(&board.id, TodoFilter::default())
            .await?;
        Ok(BoardView {
            board,
            todos: partition(todos),
        })
    }
}

fn required_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Board name is required"));
    }
    Ok(name)
}
