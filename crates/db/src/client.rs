use leadrelay_forward::{Forwarder, OutboundRequest};
use serde_json::Value;

use crate::config::SupabaseConfig;
use crate::error::DbError;
use crate::query::TableQuery;

/// Client for the Supabase REST API.
///
/// Built once at process start and shared by cloning; clones reuse the
/// same connection pool.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    forwarder: Forwarder,
}

impl SupabaseClient {
    /// Build a client that authenticates every request with the service key.
    pub fn new(config: &SupabaseConfig) -> Result<Self, DbError> {
        let forwarder = Forwarder::new(config.rest_url())
            .with_default_header("apikey", &config.service_key)?
            .with_default_header("Authorization", &format!("Bearer {}", config.service_key))?;
        Ok(Self { forwarder })
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    /// Call a Postgres function exposed through `/rpc/{function}`.
    pub async fn rpc(&self, function: &str, args: Value) -> Result<Value, DbError> {
        tracing::debug!(function, "Calling database function");
        let body = self
            .forwarder
            .request(OutboundRequest::post(format!("/rpc/{function}"), args))
            .await?;
        Ok(body)
    }

    /// Succeeds when the REST root answers with a 2xx status.
    pub async fn health_check(&self) -> Result<(), DbError> {
        self.forwarder.request(OutboundRequest::get("/")).await?;
        Ok(())
    }

    pub(crate) fn forwarder(&self) -> &Forwarder {
        &self.forwarder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use leadrelay_forward::ForwardError;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(url: String) -> SupabaseConfig {
        SupabaseConfig {
            url,
            service_key: "service-key".into(),
        }
    }

    #[tokio::test]
    async fn rpc_posts_args_with_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/lead_stats"))
            .and(header("apikey", "service-key"))
            .and(header("authorization", "Bearer service-key"))
            .and(body_json(json!({"days": 7})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 12})))
            .expect(1)
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(server.uri())).unwrap();
        let result = client.rpc("lead_stats", json!({"days": 7})).await.unwrap();
        assert_eq!(result, json!({"total": 12}));
    }

    #[tokio::test]
    async fn rpc_failure_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "Could not find the function"})),
            )
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(server.uri())).unwrap();
        let err = client.rpc("missing_fn", json!({})).await.unwrap_err();
        assert_matches!(err, DbError::Forward(ForwardError::Remote { status: 404, .. }));
    }

    #[tokio::test]
    async fn health_check_hits_rest_root() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"swagger": "2.0"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(server.uri())).unwrap();
        assert!(client.health_check().await.is_ok());
    }
}
