use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todo;
    const ENTITY_NAME: &'static str = "todo";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// The user-editable columns of a todo. `completed` only changes by toggling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub name: String,
    pub description: Option<String>,
    pub important: bool,
}

/// `None` leaves a flag unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub important: Option<bool>,
    pub completed: Option<bool>,
}

impl TodoDao {
    pub async fn create_todo(&self, board_id: &Uuid, fields: TodoFields) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            board_id: Set(*board_id),
            name: Set(fields.name),
            description: Set(fields.description),
            important: Set(fields.important),
            completed: Set(false),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Todos of a board in creation order, narrowed by `filter`.
    pub async fn list_by_board(
        &self,
        board_id: &Uuid,
        filter: TodoFilter,
    ) -> DaoResult<Vec<todo::Model>> {
        let board_id = *board_id;
        self.find_all(Some((todo::Column::CreatedAt, Order::Asc)), move |query| {
            let mut query = query.filter(todo::Column::BoardId.eq(board_id));
            if let Some(important) = filter.important {
                query = query.filter(todo::Column::Important.eq(important));
            }
            if let Some(completed) = filter.completed {
                query = query.filter(todo::Column::Completed.eq(completed));
            }
            query
        })
        .await
    }

    pub async fn find_todo(&self, id: &Uuid) -> DaoResult<todo::Model> {
        self.find_by_id(*id).await
    }

    pub async fn update_todo(&self, id: &Uuid, fields: TodoFields) -> DaoResult<todo::Model> {
        self.update(*id, move |active| {
            active.name = Set(fields.name);
            active.description = Set(fields.description);
            active.important = Set(fields.important);
        })
        .await
    }

    pub async fn delete_todo(&self, id: &Uuid) -> DaoResult<Uuid> {
        self.delete(*id).await
    }

    /// Flips `completed` in a single UPDATE so concurrent toggles never
    /// overwrite each other, then reads the row back.
    pub async fn toggle_completed(&self, id: &Uuid) -> DaoResult<todo::Model> {
        let result = Todo::update_many()
            .col_expr(
                todo::Column::Completed,
                Expr::col(todo::Column::Completed).not(),
            )
            .col_expr(
                todo::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().fixed_offset()),
            )
            .filter(todo::Column::Id.eq(*id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(*id));
        }

        self.find_by_id(*id).await
    }
}
