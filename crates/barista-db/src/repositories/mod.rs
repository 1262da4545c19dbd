//! Repository implementations over the `SQLite` store.
//!
//! These implementations encapsulate all SQL queries. Every call goes
//! through `Store::execute`, so each one is a single transaction against a
//! single collection.

mod row_mappers;
mod sqlite_bean_repository;
mod sqlite_shot_repository;

pub use sqlite_bean_repository::SqliteBeanRepository;
pub use sqlite_shot_repository::SqliteShotRepository;
