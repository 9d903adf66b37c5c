/// Errors raised while reading process configuration.
///
/// These are fatal at startup: binaries log them and exit instead of
/// surfacing them per request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}
