use sea_orm::DatabaseConnection;

use super::{BoardDao, DaoBase, TodoDao, UserDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn board(&self) -> BoardDao {
        DaoBase::new(&self.db)
    }

    pub fn todo(&self) -> TodoDao {
        DaoBase::new(&self.db)
    }
}
