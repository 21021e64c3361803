//! Response envelopes for the upstream API and the gateway's own replies.
//!
//! DESIGN
//! ======
//! The upstream wraps every payload as `{ code, status, message, data }` and
//! adds a top-level `token` on login. Only `data` (and `token` for login) is
//! load-bearing; the descriptive fields default when absent. Required fields
//! that are missing fail fast with a [`SchemaError`] instead of surfacing as
//! `undefined`-shaped values further down.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::user::User;

/// An upstream reply did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A required field was absent or null.
    #[error("upstream response missing `{0}`")]
    Missing(&'static str),
    /// A field was present but could not be decoded.
    #[error("upstream response malformed: {0}")]
    Malformed(String),
}

/// Generic upstream envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "deserialize_code")]
    pub code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode an envelope from an already-parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Missing`] when `data` is absent or null and
    /// [`SchemaError::Malformed`] when it does not match `T`.
    pub fn from_value(body: &Value) -> Result<Self, SchemaError> {
        match body.get("data") {
            None | Some(Value::Null) => return Err(SchemaError::Missing("data")),
            Some(_) => {}
        }
        serde_json::from_value(body.clone()).map_err(|e| SchemaError::Malformed(e.to_string()))
    }
}

/// Upstream `/login` reply. The token sits beside `data`, not inside it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginEnvelope {
    /// Extract the session token.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Missing`] when the token is absent or empty.
    pub fn from_value(body: &Value) -> Result<(Self, String), SchemaError> {
        let envelope: Self =
            serde_json::from_value(body.clone()).map_err(|e| SchemaError::Malformed(e.to_string()))?;
        let token = envelope.token.clone().filter(|t| !t.is_empty()).ok_or(SchemaError::Missing("token"))?;
        Ok((envelope, token))
    }
}

// =============================================================================
// GATEWAY REPLIES
// =============================================================================

/// Body of every gateway error and of message-only successes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// `POST /api/login` success body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginReply {
    pub message: String,
    pub token: String,
    pub user: User,
}

/// `GET /api/verify` success body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifyReply {
    pub data: User,
}

/// Best-effort `message` lookup for relaying upstream failures.
#[must_use]
pub fn message_of(body: &Value) -> Option<String> {
    body.get("message").and_then(Value::as_str).map(str::to_owned)
}

/// The upstream sends `code` as `"200"` on some endpoints and `200` on others.
fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
