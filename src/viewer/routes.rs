use axum::{routing::get, Router};
use std::sync::Arc;

use crate::report::PublicResolver;

use super::handlers::{health_check, view_report, ViewerState};

pub fn create_viewer_router(resolver: PublicResolver) -> Router {
    let state = Arc::new(ViewerState { resolver });

    Router::new()
        .route("/", get(health_check))
        .route("/reports/view/{id}", get(view_report))
        .with_state(state)
}
