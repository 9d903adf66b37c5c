use leadrelay_core::config;
use leadrelay_core::error::ConfigError;

/// Connection settings for the Supabase project.
///
/// | Env Var                                              | Required |
/// |------------------------------------------------------|----------|
/// | `SUPABASE_URL`                                       | yes      |
/// | `SUPABASE_SERVICE_KEY` (or `SUPABASE_SERVICE_ROLE_KEY`) | yes   |
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    /// Service-role key sent as `apikey` and bearer token.
    pub service_key: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = config::required("SUPABASE_URL")?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "SUPABASE_URL",
                reason: format!("expected an http(s) URL, got '{url}'"),
            });
        }
        let service_key =
            config::required_any(&["SUPABASE_SERVICE_KEY", "SUPABASE_SERVICE_ROLE_KEY"])?;
        Ok(Self { url, service_key })
    }

    /// Base URL of the PostgREST API.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}
