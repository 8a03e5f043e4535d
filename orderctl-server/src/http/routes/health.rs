//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::ping;
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

impl HealthResponse {
    fn new(database_up: bool) -> Self {
        Self {
            status: if database_up { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            database: if database_up { "connected" } else { "unreachable" },
        }
    }
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = match ping(state.pool()).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check ping failed: {}", e);
            false
        }
    };

    Json(HealthResponse::new(database_up))
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_database_state() {
        let up = HealthResponse::new(true);
        assert_eq!(up.status, "ok");
        assert_eq!(up.database, "connected");

        let down = HealthResponse::new(false);
        assert_eq!(down.status, "degraded");
        assert_eq!(down.database, "unreachable");
    }
}
