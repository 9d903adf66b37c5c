use leadrelay_core::envelope::RawResponse;

/// Errors from a single forwarded call.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    /// Safe for the caller to retry.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator answered with a non-2xx status code.
    #[error("Remote service error ({status}): {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A configured header name or value could not be encoded.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ForwardError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ForwardError::Transport(_))
    }
}

/// Pass a 2xx response through unchanged, turn anything else into
/// [`ForwardError::Remote`].
pub fn check_status(raw: RawResponse) -> Result<RawResponse, ForwardError> {
    if raw.is_success() {
        Ok(raw)
    } else {
        Err(ForwardError::Remote {
            status: raw.status,
            body: raw.body_text(),
        })
    }
}
