//! Handler recording Calendly bookings on leads.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use leadrelay_core::requests::CalendlyStatusUpdate;
use leadrelay_core::validation::ValidationPolicy;
use leadrelay_core::Payload;
use leadrelay_db::repositories::LeadRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::json_payload;
use crate::response::ok_with_message;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /leads/calendly-status
// ---------------------------------------------------------------------------

/// Mark a lead as having booked a Calendly event.
///
/// Body: `{ leadId, eventId, scheduledAt? }`.
pub async fn update_calendly_status(
    State(state): State<AppState>,
    body: Result<Json<Payload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_payload(body)?;
    let update = CalendlyStatusUpdate::from_payload(&payload, ValidationPolicy::CollectAll)?;

    tracing::info!(
        lead_id = %update.lead_id,
        event_id = %update.event_id,
        "Updating Calendly status",
    );

    let leads = LeadRepo::update_calendly_status(&state.db, &update)
        .await
        .map_err(|e| AppError::upstream("Failed to update Calendly status", e))?;

    if leads.is_empty() {
        return Err(AppError::NotFound(format!("Lead {} not found", update.lead_id)));
    }

    tracing::info!(lead_id = %update.lead_id, "Calendly status updated");

    Ok(ok_with_message(leads, "Calendly status updated successfully"))
}
