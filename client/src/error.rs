//! Client-side error taxonomy.

/// Errors surfaced to callers of the client. `Clone` so resource state can
/// keep the last error alongside stale data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The gateway answered 401.
    #[error("not authenticated")]
    Unauthenticated,

    /// Any other non-success status, with the gateway's message.
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// The request never got a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A success body did not match the expected schema.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl From<models::SchemaError> for ClientError {
    fn from(error: models::SchemaError) -> Self {
        Self::Decode(error.to_string())
    }
}
