//! Request models with validation at the edge
//!
//! Bodies are deserialized strictly (unknown fields rejected) and
//! checked before any SQL runs. Invalid input returns ValidationError, not panic.

pub mod user;
pub mod validation;

pub use user::{NewUser, UserField, UserFilter, UserPatch};
pub use validation::ValidationError;
