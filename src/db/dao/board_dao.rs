use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::{Board, Todo};
use crate::db::entities::{board, todo};

#[derive(Clone)]
pub struct BoardDao {
    db: DatabaseConnection,
}

impl DaoBase for BoardDao {
    type Entity = Board;
    const ENTITY_NAME: &'static str = "board";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl BoardDao {
    pub async fn create_board(&self, user_id: &Uuid, name: &str) -> DaoResult<board::Model> {
        let model = board::ActiveModel {
            user_id: Set(*user_id),
            name: Set(name.to_string()),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Boards owned by `user_id`, oldest first.
    pub async fn list_by_user(&self, user_id: &Uuid) -> DaoResult<Vec<board::Model>> {
        let user_id = *user_id;
        self.find_all(Some((board::Column::CreatedAt, Order::Asc)), move |query| {
            query.filter(board::Column::UserId.eq(user_id))
        })
        .await
    }

    pub async fn find_board(&self, id: &Uuid) -> DaoResult<board::Model> {
        self.find_by_id(*id).await
    }

    pub async fn update_name(&self, id: &Uuid, name: &str) -> DaoResult<board::Model> {
        let name = name.to_string();
        self.update(*id, move |active| {
            active.name = Set(name);
        })
        .await
    }

    /// Removes the board together with its todos.
    pub async fn delete_board(&self, id: &Uuid) -> DaoResult<Uuid> {
        let txn = self.db.begin().await?;

        Todo::delete_many()
            .filter(todo::Column::BoardId.eq(*id))
            .exec(&txn)
            .await?;
        let result = Board::delete_by_id(*id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(Self::not_found(*id));
        }

        txn.commit().await?;
        Ok(*id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use crate::db::entities::board;

    use super::BoardDao;
    use crate::db::dao::{DaoBase, DaoLayerError};

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn board_model(id: Uuid, user_id: Uuid, name: &str) -> board::Model {
        let now = ts();
        board::Model {
            id,
            created_at: now,
            updated_at: now,
            user_id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn list_by_user_returns_rows_in_query_order() {
        let user_id = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                board_model(first, user_id, "Home"),
                board_model(second, user_id, "Work"),
            ]])
            .into_connection();
        let dao = BoardDao::new(&db);

        let boards = dao.list_by_user(&user_id).await.expect("query should succeed");
        let names: Vec<_> = boards.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Home", "Work"]);
    }

    #[tokio::test]
    async fn update_name_reports_missing_board() {
        let missing = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<board::Model>::new()])
            .into_connection();
        let dao = BoardDao::new(&db);

        let err = dao
            .update_name(&missing, "Renamed")
            .await
            .expect_err("update should fail");
        assert!(matches!(
            err,
            DaoLayerError::NotFound { entity: "board", id } if id == missing
        ));
    }

    #[tokio::test]
    async fn delete_board_reports_missing_board() {
        let missing = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let dao = BoardDao::new(&db);

        let err = dao.delete_board(&missing).await.expect_err("delete should fail");
        assert!(matches!(err, DaoLayerError::NotFound { id, .. } if id == missing));
    }

    #[tokio::test]
    async fn find_board_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("boom".to_string())])
            .into_connection();
        let dao = BoardDao::new(&db);

        let err = dao
            .find_board(&Uuid::new_v4())
            .await
            .expect_err("lookup should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }
}
