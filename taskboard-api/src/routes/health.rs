/// Health check endpoint
///
/// Reports whether the server is up and the task store answers.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

/// Health check handler
///
/// Always answers 200; a store that fails its probe turns the status into
/// `degraded`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match state.store.health_check().await {
        Ok(()) => ("healthy", "connected"),
        Err(err) => {
            tracing::warn!(error = %err, "Task store health check failed");
            ("degraded", "disconnected")
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
