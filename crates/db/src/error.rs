use leadrelay_forward::ForwardError;

/// Errors from the database collaborator.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Forward(#[from] ForwardError),

    /// PostgREST would patch every row; refused before any call is made.
    #[error("Refusing to update {0} without a filter")]
    UnfilteredUpdate(String),

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}
