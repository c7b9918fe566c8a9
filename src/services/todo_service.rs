use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    db::dao::{TodoDao, TodoFields},
    db::entities::{board, todo},
    error::AppError,
    services::board_service::BoardService,
};

pub const NAME_REQUIRED: &str = "Todo name is required";

/// Raw todo form input, before trimming and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoInput {
    pub name: String,
    pub description: String,
    pub important: bool,
}

impl TodoInput {
    /// Name must be non-empty after trimming; a blank description is stored
    /// as NULL.
    pub fn validate(&self) -> Result<TodoFields, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::validation(NAME_REQUIRED));
        }
        let description = self.description.trim();
        Ok(TodoFields {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            important: self.important,
        })
    }
}

impl From<&todo::Model> for TodoInput {
    fn from(model: &todo::Model) -> Self {
        Self {
            name: model.name.clone(),
            description: model.description.clone().unwrap_or_default(),
            important: model.important,
        }
    }
}

/// Disjoint display buckets. Completion wins over importance.
#[derive(Debug, Default)]
pub struct TodoBuckets {
    pub important: Vec<todo::Model>,
    pub other: Vec<todo::Model>,
    pub completed: Vec<todo::Model>,
}

/// Splits `todos` into buckets, keeping their relative order.
pub fn partition(todos: Vec<todo::Model>) -> TodoBuckets {
    let mut buckets = TodoBuckets::default();
    for todo in todos {
        match (todo.completed, todo.important) {
            (true, _) => buckets.completed.push(todo),
            (false, true) => buckets.important.push(todo),
            (false, false) => buckets.other.push(todo),
        }
    }
    buckets
}

#[derive(Clone)]
pub struct TodoService {
    boards: BoardService,
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(boards: BoardService, todo_dao: TodoDao) -> Self {
        Self { boards, todo_dao }
    }

    pub async fn create(
        &self,
        user: &CurrentUser,
        board_id: &Uuid,
        input: &TodoInput,
    ) -> Result<todo::Model, AppError> {
        let board = self.boards.require_owned(user, board_id).await?;
        let fields = input.validate()?;
        Ok(self.todo_dao.create_todo(&board.id, fields).await?)
    }

    /// Resolves the board and the todo, checking both belong to `user` and
    /// to each other.
    pub async fn require_owned(
        &self,
        user: &CurrentUser,
        board_id: &Uuid,
        todo_id: &Uuid,
    ) -> Result<(board::Model, todo::Model), AppError> {
        let board = self.boards.require_owned(user, board_id).await?;
        let todo = self.todo_dao.find_todo(todo_id).await?;
        if todo.board_id != board.id {
            warn!(user_id = %user.id, %board_id, %todo_id, "todo is not on this board");
            return Err(AppError::Forbidden);
        }
        Ok((board, todo))
    }

    pub async fn edit(
        &self,
        user: &CurrentUser,
        board_id: &Uuid,
        todo_id: &Uuid,
        input: &TodoInput,
    ) -> Result<todo::Model, AppError> {
        let (_, todo) = self.require_owned(user, board_id, todo_id).await?;
        let fields = input.validate()?;
        Ok(self.todo_dao.update_todo(&todo.id, fields).await?)
    }

    pub async fn toggle(
        &self,
        user: &CurrentUser,
        board_id: &Uuid,
        todo_id: &Uuid,
    ) -> Result<todo::Model, AppError> {
        let (_, todo) = self.require_owned(user, board_id, todo_id).await?;
        Ok(self.todo_dao.toggle_completed(&todo.id).await?)
    }

    pub async fn delete(
        &self,
        user: &CurrentUser,
        board_id: &Uuid,
        todo_id: &Uuid,
    ) -> Result<(), AppError> {
        let (_, todo) = self.require_owned(user, board_id, todo_id).await?;
        self.todo_dao.delete_todo(&todo.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use super::{NAME_REQUIRED, TodoInput, partition};
    use crate::{
        auth::CurrentUser,
        db::entities::{board, todo},
        error::AppError,
        services::ServiceContext,
    };

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn todo_model(board_id: Uuid, name: &str, important: bool, completed: bool) -> todo::Model {
        todo::Model {
            id: Uuid::new_v4(),
            created_at: ts(),
            updated_at: ts(),
            board_id,
            name: name.to_string(),
            description: None,
            important,
            completed,
        }
    }

    fn names(todos: &[todo::Model]) -> Vec<&str> {
        todos.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn partition_is_total_disjoint_and_ordered() {
        let board = Uuid::new_v4();
        let todos = vec![
            todo_model(board, "a", true, false),
            todo_model(board, "b", false, false),
            todo_model(board, "c", true, true),
            todo_model(board, "d", true, false),
            todo_model(board, "e", false, true),
        ];

        let buckets = partition(todos);
        assert_eq!(names(&buckets.important), ["a", "d"]);
        assert_eq!(names(&buckets.other), ["b"]);
        assert_eq!(names(&buckets.completed), ["c", "e"]);
    }

    #[test]
    fn validate_trims_and_drops_blank_description() {
        let fields = TodoInput {
            name: "  Buy milk ".to_string(),
            description: "   ".to_string(),
            important: true,
        }
        .validate()
        .expect("input should be valid");

        assert_eq!(fields.name, "Buy milk");
        assert_eq!(fields.description, None);
        assert!(fields.important);
    }

    #[test]
    fn validate_rejects_blank_name() {
        let err = TodoInput {
            name: " \t".to_string(),
            ..TodoInput::default()
        }
        .validate()
        .expect_err("blank name should fail");

        assert!(matches!(err, AppError::Validation(message) if message == NAME_REQUIRED));
    }

    #[tokio::test]
    async fn todo_from_another_board_is_forbidden() {
        let owner = Uuid::new_v4();
        let board_id = Uuid::new_v4();
        let stray = todo_model(Uuid::new_v4(), "elsewhere", false, false);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[board::Model {
                id: board_id,
                created_at: ts(),
                updated_at: ts(),
                user_id: owner,
                name: "Home".to_string(),
            }]])
            .append_query_results([[stray.clone()]])
            .into_connection();
        let user = CurrentUser {
            id: owner,
            name: "Ann".to_string(),
        };

        let err = ServiceContext::new(&db)
            .todo()
            .toggle(&user, &board_id, &stray.id)
            .await
            .expect_err("cross-board toggle should fail");
        assert!(matches!(err, AppError::Forbidden));
    }
}
