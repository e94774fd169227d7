use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::report::{PublicResolver, ResolveOutcome};

pub struct ViewerState {
    pub resolver: PublicResolver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpiredResponse {
    error: String,
    expired_at: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Resolve a shared snapshot id for the public viewer.
///
/// Expired links get 410 Gone rather than 404: the link once worked, and the
/// visitor should be told so.
pub async fn view_report(
    State(state): State<Arc<ViewerState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.resolver.resolve(&id).await {
        Ok(ResolveOutcome::Found(report)) => (StatusCode::OK, Json(report)).into_response(),
        Ok(ResolveOutcome::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "This link does not exist".to_string(),
            }),
        )
            .into_response(),
        Ok(ResolveOutcome::Expired { expired_at }) => (
            StatusCode::GONE,
            Json(ExpiredResponse {
                error: "This link has expired".to_string(),
                expired_at: expired_at.to_rfc3339(),
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(snapshot_id = %id, error = %err, "failed to resolve snapshot");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    #[derive(Serialize)]
    struct HealthResponse {
        status: String,
    }

    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
