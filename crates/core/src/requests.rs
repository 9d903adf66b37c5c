//! Typed requests extracted from validated payloads.
//!
//! Each request type owns its rule set. `from_payload` validates first and
//! only then converts, so callers never see a half-built request.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::validation::formats::parse_iso8601;
use crate::validation::{validate, FieldFormat, RuleSet, ValidationPolicy, ValidationResult, Violation};
use crate::Payload;

static CALENDLY_STATUS_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .required_with("leadId", FieldFormat::Uuid)
        .required_with("eventId", FieldFormat::Text)
        .optional_with("scheduledAt", FieldFormat::Iso8601)
});

static ANALYSIS_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new()
        .required_with("url", FieldFormat::Url)
        .required_with("company_name", FieldFormat::Text)
        .optional_with("industry", FieldFormat::Text)
        .optional_with("project_id", FieldFormat::Uuid)
});

static LEAD_ID_RULES: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::new().required_with("id", FieldFormat::Uuid));

/// Record that a lead booked a Calendly event.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendlyStatusUpdate {
    pub lead_id: Uuid,
    pub event_id: String,
    pub scheduled_at: Option<DateTime<FixedOffset>>,
}

impl CalendlyStatusUpdate {
    pub fn rules() -> &'static RuleSet {
        &CALENDLY_STATUS_RULES
    }

    pub fn from_payload(payload: &Payload, policy: ValidationPolicy) -> Result<Self, ValidationResult> {
        validate(payload, Self::rules(), policy).into_result()?;

        Ok(Self {
            lead_id: uuid_field(payload, "leadId")?,
            event_id: required_text(payload, "eventId")?,
            scheduled_at: text_field(payload, "scheduledAt").and_then(|s| parse_iso8601(&s)),
        })
    }
}

/// Website analysis request sent to the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub company_name: String,
    pub industry: Option<String>,
    pub project_id: Option<Uuid>,
}

impl AnalysisRequest {
    pub fn rules() -> &'static RuleSet {
        &ANALYSIS_RULES
    }

    pub fn from_payload(payload: &Payload, policy: ValidationPolicy) -> Result<Self, ValidationResult> {
        validate(payload, Self::rules(), policy).into_result()?;

        let project_id = match text_field(payload, "project_id") {
            Some(_) => Some(uuid_field(payload, "project_id")?),
            None => None,
        };

        Ok(Self {
            url: required_text(payload, "url")?,
            company_name: required_text(payload, "company_name")?,
            industry: text_field(payload, "industry"),
            project_id,
        })
    }
}

/// Validate a lead id taken from a path segment or CLI argument.
pub fn parse_lead_id(raw: &str) -> Result<Uuid, ValidationResult> {
    let mut payload = Payload::new();
    payload.insert("id".into(), Value::String(raw.to_string()));
    validate(&payload, &LEAD_ID_RULES, ValidationPolicy::FailFast).into_result()?;
    uuid_field(&payload, "id")
}

/// Read a field as text. Numbers and booleans are rendered; `null`, empty
/// strings and structured values read as absent.
fn text_field(payload: &Payload, field: &str) -> Option<String> {
    match payload.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required_text(payload: &Payload, field: &str) -> Result<String, ValidationResult> {
    text_field(payload, field).ok_or_else(|| ValidationResult {
        violations: vec![Violation::MissingField {
            field: field.to_string(),
        }],
    })
}

fn uuid_field(payload: &Payload, field: &str) -> Result<Uuid, ValidationResult> {
    text_field(payload, field)
        .and_then(|s| Uuid::parse_str(&s).ok())
        .ok_or_else(|| ValidationResult {
            violations: vec![Violation::InvalidFormat {
                field: field.to_string(),
                expected: FieldFormat::Uuid,
            }],
        })
}
