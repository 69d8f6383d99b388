//! SQLite storage module for play-by-play and schedule data
//!
//! Both stores are pre-built, read-only SQLite files. This module only
//! opens, queries and closes them; it never creates or alters schema.

pub mod sql;
pub mod store;

#[cfg(test)]
pub mod fixtures;

pub use store::{Row, Store, StoreError};
