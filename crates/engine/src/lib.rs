//! REST client for the website analysis engine.
//!
//! Wraps the engine's HTTP API (URL analysis, health) on top of
//! [`leadrelay_forward::Forwarder`].

use leadrelay_core::config;
use leadrelay_core::error::ConfigError;
use leadrelay_core::requests::AnalysisRequest;
use leadrelay_forward::{ForwardError, Forwarder, OutboundRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path of the analysis endpoint, relative to the engine base URL.
pub const ANALYZE_PATH: &str = "/api/analyze-url";

const DEFAULT_ENGINE_URL: &str = "http://localhost:3001";

/// Engine connection settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base HTTP URL, e.g. `http://localhost:3001`.
    pub base_url: String,
}

impl EngineConfig {
    /// Reads `ANALYSIS_ENGINE_URL` (default `http://localhost:3001`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = config::or_default("ANALYSIS_ENGINE_URL", DEFAULT_ENGINE_URL);
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "ANALYSIS_ENGINE_URL",
                reason: format!("expected an http(s) URL, got '{base_url}'"),
            });
        }
        Ok(Self { base_url })
    }
}

/// Outcome of one website analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub grade: String,
    pub overall_score: f64,
    pub database_id: Option<String>,
    pub lead_priority: Option<Value>,
    #[serde(default)]
    pub database_saved: bool,
    pub report: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    result: AnalysisResult,
}

/// Errors from the analysis engine layer.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Forward(#[from] ForwardError),

    #[error("Unexpected analysis response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for the analysis engine.
#[derive(Debug, Clone)]
pub struct AnalysisEngineClient {
    forwarder: Forwarder,
}

impl AnalysisEngineClient {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            forwarder: Forwarder::new(config.base_url.clone()),
        }
    }

    /// Submit a URL for analysis.
    ///
    /// Sends `POST /api/analyze-url` and returns the `result` member of the
    /// engine's answer.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, EngineError> {
        let body = serde_json::to_value(request)?;
        tracing::info!(url = %request.url, company = %request.company_name, "Requesting analysis");

        let response = self
            .forwarder
            .request(OutboundRequest::post(ANALYZE_PATH, body))
            .await?;
        let parsed: AnalyzeResponse = serde_json::from_value(response)?;

        tracing::info!(
            grade = %parsed.result.grade,
            score = parsed.result.overall_score,
            saved = parsed.result.database_saved,
            "Analysis completed"
        );
        Ok(parsed.result)
    }

    /// Succeeds when `GET /health` answers with a 2xx status.
    pub async fn health_check(&self) -> Result<(), EngineError> {
        self.forwarder.request(OutboundRequest::get("/health")).await?;
        Ok(())
    }
}
