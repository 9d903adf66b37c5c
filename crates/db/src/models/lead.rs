//! Lead row model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A row from the `leads` table. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub url: Option<String>,
    pub industry: Option<String>,
    pub grade: Option<String>,
    pub overall_score: Option<f64>,
    /// Stored as text or number depending on the analyzer version.
    pub lead_priority: Option<Value>,
    pub calendly_scheduled: Option<bool>,
    pub calendly_event_id: Option<String>,
    pub calendly_scheduled_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
