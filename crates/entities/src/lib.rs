//! Core entity definitions for the travel tracker.
//!
//! This crate defines the data types shared by the store and the server:
//! users of the family roster, the read-only country catalog, and the
//! visited marks linking the two.

mod country;
mod user;
mod visit;

pub use country::*;
pub use user::*;
pub use visit::*;
