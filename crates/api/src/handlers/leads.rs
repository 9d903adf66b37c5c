//! Lead lookup handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use leadrelay_core::requests::parse_lead_id;
use leadrelay_db::repositories::LeadRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::query_params;
use crate::response::ok;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

/// Query parameters for `GET /leads`.
#[derive(Debug, Deserialize)]
pub struct LeadListParams {
    pub company: Option<String>,
    pub limit: Option<usize>,
}

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

// ---------------------------------------------------------------------------
// GET /leads
// ---------------------------------------------------------------------------

/// Search leads by company name, or list the most recent ones.
pub async fn list_leads(
    State(state): State<AppState>,
    params: Result<Query<LeadListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let params = query_params(params)?;
    let limit = clamp_limit(params.limit);

    let leads = match params.company.as_deref().map(str::trim) {
        Some(company) if !company.is_empty() => {
            LeadRepo::search_by_company(&state.db, company, limit).await
        }
        _ => LeadRepo::list_recent(&state.db, limit).await,
    }
    .map_err(|e| AppError::upstream("Failed to load leads", e))?;

    Ok(ok(leads))
}

// ---------------------------------------------------------------------------
// GET /leads/{id}
// ---------------------------------------------------------------------------

/// Get a single lead by ID.
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_lead_id(&id)?;

    let lead = LeadRepo::find_by_id(&state.db, id)
        .await
        .map_err(|e| AppError::upstream("Failed to load lead", e))?
        .ok_or_else(|| AppError::NotFound(format!("Lead {id} not found")))?;

    Ok(ok(lead))
}
