//! `GET /health`: liveness plus the state of the shared pool

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub pool: PoolStatus,
}

/// Connection counts as the pool reports them; never opens a connection.
#[derive(Debug, Serialize)]
pub struct PoolStatus {
    pub connections: u32,
    pub idle: usize,
    pub closed: bool,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let pool = &state.pool;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        pool: PoolStatus {
            connections: pool.size(),
            idle: pool.num_idle(),
            closed: pool.is_closed(),
        },
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
