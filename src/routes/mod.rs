mod entry;
pub mod paths;
pub mod views;

pub use entry::router;
