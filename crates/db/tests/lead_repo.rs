//! Integration tests for `LeadRepo` against a stubbed PostgREST endpoint.

use assert_matches::assert_matches;
use leadrelay_core::requests::CalendlyStatusUpdate;
use leadrelay_db::repositories::LeadRepo;
use leadrelay_db::{DbError, SupabaseClient, SupabaseConfig};
use leadrelay_forward::ForwardError;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LEAD_ID: &str = "3f2b8c1e-9d4a-4f6b-8e2a-1c5d7e9f0a12";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn client(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(&SupabaseConfig {
        url: server.uri(),
        service_key: "service-key".into(),
    })
    .unwrap()
}

fn lead_row() -> serde_json::Value {
    json!({
        "id": LEAD_ID,
        "company_name": "Acme Plumbing",
        "url": "https://acme.test",
        "grade": "B",
        "overall_score": 71.5,
        "calendly_scheduled": true,
        "calendly_event_id": "evt_1",
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn find_by_id_decodes_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/leads"))
        .and(query_param("id", format!("eq.{LEAD_ID}")))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lead_row()])))
        .expect(1)
        .mount(&server)
        .await;

    let lead = LeadRepo::find_by_id(&client(&server), Uuid::parse_str(LEAD_ID).unwrap())
        .await
        .unwrap()
        .expect("lead should exist");
    assert_eq!(lead.grade.as_deref(), Some("B"));
    assert_eq!(lead.overall_score, Some(71.5));
}

#[tokio::test]
async fn search_by_company_uses_escaped_ilike() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/leads"))
        .and(query_param("company_name", "ilike.%acme\\_co%"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lead_row()])))
        .expect(1)
        .mount(&server)
        .await;

    let leads = LeadRepo::search_by_company(&client(&server), " acme_co ", 10)
        .await
        .unwrap();
    assert_eq!(leads.len(), 1);
}

#[tokio::test]
async fn update_calendly_status_sends_expected_columns() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/leads"))
        .and(query_param("id", format!("eq.{LEAD_ID}")))
        .and(body_partial_json(json!({
            "calendly_scheduled": true,
            "calendly_event_id": "evt_1",
            "calendly_scheduled_at": "2024-05-01T14:30:00+00:00",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lead_row()])))
        .expect(1)
        .mount(&server)
        .await;

    let update = CalendlyStatusUpdate {
        lead_id: Uuid::parse_str(LEAD_ID).unwrap(),
        event_id: "evt_1".into(),
        scheduled_at: chrono::DateTime::parse_from_rfc3339("2024-05-01T14:30:00Z").ok(),
    };
    let rows = LeadRepo::update_calendly_status(&client(&server), &update)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].calendly_event_id.as_deref(), Some("evt_1"));
}

#[tokio::test]
async fn update_calendly_status_surfaces_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid API key"})),
        )
        .mount(&server)
        .await;

    let update = CalendlyStatusUpdate {
        lead_id: Uuid::parse_str(LEAD_ID).unwrap(),
        event_id: "evt_1".into(),
        scheduled_at: None,
    };
    let err = LeadRepo::update_calendly_status(&client(&server), &update)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Forward(ForwardError::Remote { status: 401, .. }));
}
