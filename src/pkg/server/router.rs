use axum::Router;
use axum::routing::{get, patch, post};

use super::handlers::probes::{healthz, livez};
use super::handlers::{department, tor};
use super::state::AppState;
use crate::prelude::Result;

pub fn build_routes() -> Result<Router> {
    let state = AppState::new()?;
    Ok(routes().with_state(state))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tor/{account_id}/transferee", post(tor::ingest_transferee))
        .route("/tor/{account_id}/copy", post(tor::copy))
        .route("/tor/{account_id}/grading", post(tor::grade))
        .route("/tor/{account_id}/sync", post(tor::sync))
        .route("/tor/{account_id}/complete", post(tor::complete))
        .route("/tor/{account_id}/statistics", get(tor::statistics))
        .route("/tor/{account_id}/tracker", get(tor::tracker))
        .route("/tor/entries/{id}/evaluation", patch(tor::set_evaluation))
        .route("/department/{account_id}", get(department::view))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
}
