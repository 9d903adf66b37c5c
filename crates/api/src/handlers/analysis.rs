//! Handler forwarding website analysis requests to the analysis engine.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use leadrelay_core::requests::AnalysisRequest;
use leadrelay_core::validation::ValidationPolicy;
use leadrelay_core::Payload;

use crate::error::{AppError, AppResult};
use crate::handlers::json_payload;
use crate::response::ok_with_message;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /analyze
// ---------------------------------------------------------------------------

/// Analyze a website.
///
/// Body: `{ url, company_name, industry?, project_id? }`.
pub async fn analyze_url(
    State(state): State<AppState>,
    body: Result<Json<Payload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_payload(body)?;
    let request = AnalysisRequest::from_payload(&payload, ValidationPolicy::CollectAll)?;

    let result = state
        .engine
        .analyze(&request)
        .await
        .map_err(|e| AppError::upstream("Failed to analyze website", e))?;

    if !result.database_saved {
        tracing::warn!(url = %request.url, "Analysis finished but was not saved to the database");
    }

    Ok(ok_with_message(result, "Analysis completed"))
}
