//! `SQLite` persistence for barista.
//!
//! [`Store`] owns the connection pool, schema versioning and the
//! single-transaction execution contract. [`StoreHandle`] opens it lazily and
//! shares it. The repositories implement the `barista-core` ports on top of
//! it, and [`RepoFactory`] wires them together.
#![deny(unsafe_code)]

mod error;
pub mod factory;
pub mod migrations;
pub mod repositories;
pub mod store;

pub use error::{OperationError, map_sqlx_error};
pub use factory::RepoFactory;
pub use migrations::{CURRENT_SCHEMA_VERSION, MIGRATIONS, Migration};
pub use store::{Collection, Store, StoreHandle, TxMode};

#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::{SqliteBeanRepository, SqliteShotRepository};
