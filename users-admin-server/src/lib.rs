//! users-admin-server: HTTP CRUD service over the `users` table
//!
//! Six routes, each one SQL statement against PostgreSQL:
//! - `GET /users`, `GET /users/{userid}`
//! - `POST /create-user`
//! - `PUT /users/{userid}`, `DELETE /users/{userid}`
//! - `POST /users/search`
//!
//! The binary lives in `users-admin-cli`; this crate owns config,
//! the database session, and the axum router.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{AppConfig, ConfigError, DbConfig};
pub use http::{build_router, run_server, ApiError, ServerConfig};
