//! Database layer - session and repository
//!
//! # Design Principles
//!
//! - One shared pool, cloned into handlers via axum state - no globals
//! - One SQL statement per operation - no transactions
//! - Values always bound as parameters - no string-built predicates

pub mod pool;
pub mod repos;

pub use pool::{open, ConnectionError};
pub use repos::*;
