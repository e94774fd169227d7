use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::{MonthRange, RawMonthlyMetric, ReportData, ReportSummary};
use crate::report::{aggregator, narrative, LinkPublisher, PublishPayload, ReportCatalog};

pub struct AppState {
    pub catalog: Arc<ReportCatalog>,
    pub publisher: LinkPublisher,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: ReportSummary,
    pub narrative: String,
    /// Raw monthly series for chart rendering, when the definition has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Vec<RawMonthlyMetric>>,
}

/// Live preview for the report editor: aggregate a catalog definition over an
/// optional month range and compose its narrative.
pub async fn definition_summary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let definition = state.catalog.get(&id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Unknown report definition: {id}"),
            }),
        )
    })?;

    let range = match (query.start, query.end) {
        (Some(start), Some(end)) => Some(MonthRange { start, end }),
        (None, None) => None,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Both start and end must be supplied for a range".to_string(),
                }),
            ))
        }
    };

    let summary = aggregator::resolve(definition, range.as_ref());
    let narrative = narrative::compose(&summary);
    let raw_data = match &definition.data {
        ReportData::Rows(rows) => Some(rows.clone()),
        ReportData::Summary(_) => None,
    };

    Ok(Json(SummaryResponse {
        summary,
        narrative,
        raw_data,
    }))
}

/// Publish an immutable shareable snapshot of the supplied report payload.
pub async fn generate_link(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PublishPayload>,
) -> Result<(StatusCode, Json<crate::report::PublishedLink>), (StatusCode, Json<ErrorResponse>)> {
    if payload.title.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Report title cannot be empty".to_string(),
            }),
        ));
    }

    match state.publisher.publish(payload).await {
        Ok(link) => Ok((StatusCode::CREATED, Json(link))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to publish report: {e}"),
            }),
        )),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
