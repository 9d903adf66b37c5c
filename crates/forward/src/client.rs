use leadrelay_core::envelope::RawResponse;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::{check_status, ForwardError};
use crate::request::OutboundRequest;

/// HTTP forwarder bound to one collaborator base URL.
///
/// Cloning is cheap and shares the underlying connection pool. No retries
/// are attempted and no timeout beyond the client's own is applied.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
}

impl Forwarder {
    /// Create a forwarder with a fresh [`reqwest::Client`].
    ///
    /// * `base_url` - e.g. `https://project.supabase.co/rest/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a forwarder reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers: HeaderMap::new(),
        }
    }

    /// Attach a header sent with every request.
    pub fn with_default_header(mut self, name: &str, value: &str) -> Result<Self, ForwardError> {
        let (name, value) = encode_header(name, value)?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an endpoint against the base URL.
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        let path = endpoint.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue one outbound call and return the response whatever its status.
    ///
    /// Only failures to complete the exchange are errors here; use
    /// [`check_status`] or [`Forwarder::request`] to reject non-2xx answers.
    pub async fn forward(&self, request: OutboundRequest) -> Result<RawResponse, ForwardError> {
        let url = self.url_for(&request.endpoint);

        let mut headers = self.default_headers.clone();
        for (name, value) in &request.headers {
            let (name, value) = encode_header(name, value)?;
            headers.insert(name, value);
        }

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, %url, "Forwarding request");

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, %url, error = %e, "Outbound request failed");
            ForwardError::Transport(e)
        })?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        if (200..300).contains(&status) {
            tracing::debug!(status, %url, "Collaborator responded");
        } else {
            tracing::warn!(status, %url, "Collaborator responded with an error status");
        }

        Ok(RawResponse::from_text(status, &text))
    }

    /// Forward and require a 2xx answer, returning the parsed body.
    pub async fn request(&self, request: OutboundRequest) -> Result<Value, ForwardError> {
        let raw = self.forward(request).await?;
        Ok(check_status(raw)?.body)
    }
}

fn encode_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ForwardError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ForwardError::InvalidHeader(name.to_string()))?;
    let header_value =
        HeaderValue::from_str(value).map_err(|_| ForwardError::InvalidHeader(name.to_string()))?;
    Ok((header_name, header_value))
}
