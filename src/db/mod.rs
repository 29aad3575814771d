//! Database module
//!
//! SQLite-backed document store for the catalog collections.

pub mod connection;
pub mod migrations;
pub mod store;

pub use connection::{Database, DbError, DbResult};
pub use store::Collection;
