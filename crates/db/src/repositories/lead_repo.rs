//! Repository for the `leads` table.

use leadrelay_core::requests::CalendlyStatusUpdate;
use serde_json::json;
use uuid::Uuid;

use crate::client::SupabaseClient;
use crate::error::DbError;
use crate::models::lead::Lead;

const TABLE: &str = "leads";

/// Column list for `leads` queries.
const COLUMNS: &str = "\
    id,company_name,url,industry,grade,overall_score,lead_priority,\
    calendly_scheduled,calendly_event_id,calendly_scheduled_at,created_at,updated_at";

/// Provides lookups and the Calendly status update for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Find a lead by ID.
    pub async fn find_by_id(client: &SupabaseClient, id: Uuid) -> Result<Option<Lead>, DbError> {
        client
            .from(TABLE)
            .select(COLUMNS)
            .eq("id", id)
            .maybe_single()
            .await
    }

    /// Case-insensitive substring search on `company_name`, newest first.
    pub async fn search_by_company(
        client: &SupabaseClient,
        company: &str,
        limit: usize,
    ) -> Result<Vec<Lead>, DbError> {
        let pattern = format!("%{}%", escape_like(company.trim()));
        client
            .from(TABLE)
            .select(COLUMNS)
            .ilike("company_name", &pattern)
            .order("created_at", false)
            .limit(limit)
            .fetch()
            .await
    }

    /// Most recently created leads.
    pub async fn list_recent(client: &SupabaseClient, limit: usize) -> Result<Vec<Lead>, DbError> {
        client
            .from(TABLE)
            .select(COLUMNS)
            .order("created_at", false)
            .limit(limit)
            .fetch()
            .await
    }

    /// Mark a lead as having booked a Calendly event.
    ///
    /// Returns the updated rows; empty when no lead has that id.
    pub async fn update_calendly_status(
        client: &SupabaseClient,
        update: &CalendlyStatusUpdate,
    ) -> Result<Vec<Lead>, DbError> {
        let mut values = json!({
            "calendly_scheduled": true,
            "calendly_event_id": update.event_id,
            "updated_at": chrono::Utc::now().to_rfc3339(),
        });
        if let Some(scheduled_at) = update.scheduled_at {
            values["calendly_scheduled_at"] = json!(scheduled_at.to_rfc3339());
        }

        let rows = client
            .from(TABLE)
            .select(COLUMNS)
            .eq("id", update.lead_id)
            .update(values)
            .await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(DbError::from))
            .collect()
    }
}

/// Escape PostgREST `ilike` wildcards in user input.
fn escape_like(input: &str) -> String {
    input.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
