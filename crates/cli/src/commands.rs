//! Subcommand implementations.
//!
//! Each command answers with an [`Envelope`]. Validation and collaborator
//! failures become `success: false` envelopes; only problems that leave
//! nothing to report (bad configuration, unreachable relay target) are
//! returned as errors.

use leadrelay_core::envelope::Envelope;
use leadrelay_core::requests::{AnalysisRequest, CalendlyStatusUpdate};
use leadrelay_core::validation::formats::is_http_url;
use leadrelay_core::validation::{ValidationPolicy, ValidationResult};
use leadrelay_core::Payload;
use leadrelay_db::repositories::LeadRepo;
use leadrelay_db::SupabaseClient;
use leadrelay_engine::AnalysisEngineClient;
use leadrelay_forward::{relay, Forwarder, Method, RelayError};
use serde::Serialize;
use serde_json::Value;

use crate::args::RequiredField;

pub async fn calendly_status(
    db: &SupabaseClient,
    lead_id: String,
    event_id: String,
    scheduled_at: Option<String>,
) -> anyhow::Result<Envelope> {
    let mut payload = Payload::new();
    payload.insert("leadId".into(), Value::String(lead_id));
    payload.insert("eventId".into(), Value::String(event_id));
    if let Some(scheduled_at) = scheduled_at {
        payload.insert("scheduledAt".into(), Value::String(scheduled_at));
    }

    let update = match CalendlyStatusUpdate::from_payload(&payload, ValidationPolicy::FailFast) {
        Ok(update) => update,
        Err(invalid) => return Ok(rejected(&invalid)),
    };

    Ok(match LeadRepo::update_calendly_status(db, &update).await {
        Ok(leads) if leads.is_empty() => {
            Envelope::failure(format!("Lead {} not found", update.lead_id), None)
        }
        Ok(leads) => success(leads, "Calendly status updated successfully")?,
        Err(e) => Envelope::failure("Failed to update Calendly status", Some(e.to_string())),
    })
}

pub async fn analyze(
    engine: &AnalysisEngineClient,
    url: String,
    company_name: String,
    industry: Option<String>,
    project_id: Option<String>,
) -> anyhow::Result<Envelope> {
    let mut payload = Payload::new();
    payload.insert("url".into(), Value::String(url));
    payload.insert("company_name".into(), Value::String(company_name));
    if let Some(industry) = industry {
        payload.insert("industry".into(), Value::String(industry));
    }
    if let Some(project_id) = project_id {
        payload.insert("project_id".into(), Value::String(project_id));
    }

    let request = match AnalysisRequest::from_payload(&payload, ValidationPolicy::FailFast) {
        Ok(request) => request,
        Err(invalid) => return Ok(rejected(&invalid)),
    };

    Ok(match engine.analyze(&request).await {
        Ok(result) => success(result, "Analysis completed")?,
        Err(e) => Envelope::failure("Failed to analyze website", Some(e.to_string())),
    })
}

pub async fn find_lead(db: &SupabaseClient, company: &str, limit: usize) -> anyhow::Result<Envelope> {
    if company.trim().is_empty() {
        return Ok(Envelope::failure("company is required", None));
    }

    Ok(match LeadRepo::search_by_company(db, company, limit.clamp(1, 100)).await {
        Ok(leads) => {
            tracing::info!(company, found = leads.len(), "Lead search finished");
            success(leads, "Lead search completed")?
        }
        Err(e) => Envelope::failure("Failed to load leads", Some(e.to_string())),
    })
}

pub async fn rpc(db: &SupabaseClient, function: &str, args: Value) -> anyhow::Result<Envelope> {
    Ok(match db.rpc(function, args).await {
        Ok(data) => Envelope::ok(data),
        Err(e) => Envelope::failure(format!("Function {function} failed"), Some(e.to_string())),
    })
}

/// Validate `body` against the `--require` rules and relay it to `endpoint`.
pub async fn forward(
    endpoint: &str,
    method: Method,
    body: Payload,
    required: &[RequiredField],
) -> anyhow::Result<Envelope> {
    if !is_http_url(endpoint) {
        anyhow::bail!("endpoint must be an absolute http(s) URL, got '{endpoint}'");
    }

    // The endpoint is absolute, so the forwarder needs no base URL.
    let forwarder = Forwarder::new("");
    let rules = crate::args::rule_set(required);

    match relay(&forwarder, &body, &rules, ValidationPolicy::FailFast, method, endpoint).await {
        Ok(envelope) => Ok(envelope),
        Err(RelayError::Validation(invalid)) => Ok(rejected(&invalid)),
        Err(RelayError::Forward(e)) if e.is_transport() => {
            tracing::warn!(endpoint, error = %e, "Relay target unreachable");
            Err(anyhow::Error::new(e).context(format!("{endpoint} is unreachable; safe to retry")))
        }
        Err(RelayError::Forward(e)) => Err(e.into()),
    }
}

fn rejected(invalid: &ValidationResult) -> Envelope {
    let error = invalid
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| invalid.to_string());
    Envelope::failure(error, None)
}

fn success<T: Serialize>(data: T, message: &str) -> anyhow::Result<Envelope> {
    Ok(Envelope::ok(serde_json::to_value(data)?).with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::parse_required_field;
    use leadrelay_db::SupabaseConfig;
    use leadrelay_engine::EngineConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LEAD_ID: &str = "3f2b8c1e-9d4a-4f6b-8e2a-1c5d7e9f0a12";

    fn db_client(server: &MockServer) -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: server.uri(),
            service_key: "service-key".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn calendly_status_rejects_bad_lead_id_without_calling_db() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let envelope = calendly_status(&db_client(&server), "nope".into(), "e1".into(), None)
            .await
            .unwrap();

        assert!(!envelope.success);
        assert_eq!(
            envelope.error.as_deref(),
            Some("Invalid leadId format. Must be a valid UUID.")
        );
    }

    #[tokio::test]
    async fn calendly_status_updates_lead() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/leads"))
            .and(query_param("id", format!("eq.{LEAD_ID}")))
            .and(body_partial_json(json!({"calendly_event_id": "e1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": LEAD_ID}])))
            .expect(1)
            .mount(&server)
            .await;

        let envelope = calendly_status(&db_client(&server), LEAD_ID.into(), "e1".into(), None)
            .await
            .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap()[0]["id"], LEAD_ID);
        assert_eq!(
            envelope.message.as_deref(),
            Some("Calendly status updated successfully")
        );
    }

    #[tokio::test]
    async fn analyze_reports_engine_failure_as_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/analyze-url"))
            .respond_with(ResponseTemplate::new(500).set_body_string("engine down"))
            .expect(1)
            .mount(&server)
            .await;
        let engine = AnalysisEngineClient::new(&EngineConfig {
            base_url: server.uri(),
        });

        let envelope = analyze(&engine, "https://acme.test".into(), "Acme".into(), None, None)
            .await
            .unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("Failed to analyze website"));
        assert!(envelope.message.unwrap().contains("engine down"));
    }

    #[tokio::test]
    async fn rpc_wraps_function_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/lead_stats"))
            .and(body_json(json!({"days": 7})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let envelope = rpc(&db_client(&server), "lead_stats", json!({"days": 7}))
            .await
            .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data, Some(json!({"total": 3})));
    }

    #[tokio::test]
    async fn forward_relays_valid_body_and_normalizes_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_json(json!({"leadId": LEAD_ID})))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"queued": true})))
            .expect(1)
            .mount(&server)
            .await;

        let body = crate::args::parse_payload(&json!({"leadId": LEAD_ID}).to_string()).unwrap();
        let envelope = forward(
            &format!("{}/hook", server.uri()),
            Method::POST,
            body,
            &[parse_required_field("leadId:uuid").unwrap()],
        )
        .await
        .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data, Some(json!({"queued": true})));
    }

    #[tokio::test]
    async fn forward_skips_call_when_required_field_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let envelope = forward(
            &format!("{}/hook", server.uri()),
            Method::POST,
            Payload::new(),
            &[parse_required_field("eventId").unwrap()],
        )
        .await
        .unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("eventId is required"));
    }

    #[tokio::test]
    async fn forward_reports_unreachable_endpoint_as_retryable() {
        // Bind an ephemeral port and release it so nothing is listening there.
        // (A dropped pooled `MockServer` keeps listening and would answer 404.)
        let uri = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        let err = forward(&format!("{uri}/hook"), Method::POST, Payload::new(), &[])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("safe to retry"), "{err:#}");
        assert!(err
            .downcast_ref::<leadrelay_forward::ForwardError>()
            .is_some_and(|e| e.is_transport()));
    }

    #[tokio::test]
    async fn forward_rejects_relative_endpoint() {
        let result = forward("/hook", Method::POST, Payload::new(), &[]).await;
        assert!(result.is_err());
    }
}
