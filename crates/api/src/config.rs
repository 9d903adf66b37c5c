use axum::http::HeaderValue;
use leadrelay_core::config;
use leadrelay_core::error::ConfigError;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Inbound request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = config::or_default("HOST", "0.0.0.0");
        let port = config::parsed_or("PORT", 3000u16)?;
        let cors_origins =
            config::split_list(&config::or_default("CORS_ORIGINS", "http://localhost:3000"));
        let request_timeout_secs = config::parsed_or("REQUEST_TIMEOUT_SECS", 30u64)?;

        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.parse::<HeaderValue>().is_err())
        {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: format!("'{bad}' is not a valid origin"),
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        })
    }
}
