//! Storage for the travel tracker.
//!
//! This crate provides the persistence gateway behind the tracker: the user
//! roster, the read-only country catalog, and per-user visited marks. It
//! supports an in-memory store (tests and throwaway runs), SQLite (the
//! default single-host setup) and PostgreSQL.

pub mod catalog;
mod error;
mod memory;
mod postgres;
mod retry;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use postgres::*;
pub use retry::*;
pub use sqlite::*;
pub use traits::*;
