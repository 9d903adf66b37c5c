use leadrelay_core::envelope::{normalize, Envelope};
use leadrelay_core::validation::{validate, RuleSet, ValidationPolicy, ValidationResult};
use leadrelay_core::Payload;
use reqwest::Method;
use serde_json::Value;

use crate::client::Forwarder;
use crate::error::ForwardError;
use crate::request::OutboundRequest;

/// Failures of the relay pipeline that do not produce an envelope.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationResult),

    #[error(transparent)]
    Forward(#[from] ForwardError),
}

/// Validate `payload`, forward it as the JSON body, normalize the answer.
///
/// No outbound call is made when validation fails. A collaborator that
/// answers with an error status yields a `success: false` envelope; only
/// transport failures are returned as errors.
pub async fn relay(
    forwarder: &Forwarder,
    payload: &Payload,
    rules: &RuleSet,
    policy: ValidationPolicy,
    method: Method,
    endpoint: &str,
) -> Result<Envelope, RelayError> {
    validate(payload, rules, policy).into_result()?;

    let request = OutboundRequest::new(method, endpoint).json(Value::Object(payload.clone()));
    let raw = forwarder.forward(request).await?;
    let status = raw.status;
    let envelope = normalize(raw);

    if envelope.success {
        tracing::info!(status, endpoint, "Relayed payload");
    } else {
        tracing::warn!(
            status,
            endpoint,
            message = envelope.message.as_deref().unwrap_or(""),
            "Relay target rejected payload"
        );
    }

    Ok(envelope)
}
