pub mod base;
pub mod base_traits;
pub mod board_dao;
mod context;
pub mod error;
pub mod todo_dao;
pub mod user_dao;

pub use base::{DaoBase, PaginatedResponse};
pub use base_traits::{HasCreatedAtColumn, HasIdActiveModel, HasIdColumn, TimestampedActiveModel};
pub use board_dao::BoardDao;
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use todo_dao::{TodoDao, TodoFields, TodoFilter};
pub use user_dao::UserDao;
