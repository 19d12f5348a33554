//! Shared helpers for database-backed tests
//!
//! Each test gets its own schema holding a fresh `users` table, so tests
//! can run in parallel against one database without seeing each other's rows.

use std::str::FromStr;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tower::ServiceExt;

use users_admin_server::{build_router, ServerConfig};

const USERS_DDL: &str = include_str!("../../sql/users.sql");

pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let base = PgConnectOptions::from_str(&url).expect("invalid DATABASE_URL");

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(base.clone())
            .await
            .expect("admin connection failed");

        let schema = format!("users_admin_test_{}", uuid::Uuid::new_v4().simple());
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .expect("create schema failed");

        let pool = PgPoolOptions::new()
            .connect_with(base.options([("search_path", schema.as_str())]))
            .await
            .expect("pool creation failed");

        sqlx::query(USERS_DDL)
            .execute(&pool)
            .await
            .expect("users table creation failed");

        Self { pool, admin, schema }
    }

    pub fn app(&self) -> Router {
        build_router(self.pool.clone(), &ServerConfig::default())
    }

    pub async fn cleanup(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("drop schema failed");
    }
}

/// Send one request through the router and decode the JSON response.
pub async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
