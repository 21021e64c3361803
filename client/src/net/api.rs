//! Typed calls to the gateway's auth endpoints.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use models::requests::{LoginRequest, RegisterRequest};
use models::{LoginReply, MessageBody, User, VerifyReply};
use reqwest::Method;
use serde_json::Value;

use super::client::ApiClient;
use crate::error::ClientError;

pub const LOGIN_PATH: &str = "/api/login";
pub const LOGOUT_PATH: &str = "/api/logout";
pub const VERIFY_PATH: &str = "/api/verify";
pub const REGISTER_PATH: &str = "/api/register";

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

/// `POST /api/login`. The session cookie is stored by the client as a side effect.
///
/// # Errors
///
/// Any [`ClientError`] from the request.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginReply, ClientError> {
    let body = to_body(&LoginRequest { email: email.to_owned(), password: password.to_owned() })?;
    client.request(Method::POST, LOGIN_PATH, Some(body)).await
}

/// `GET /api/logout`.
///
/// # Errors
///
/// Any [`ClientError`] from the request.
pub async fn logout(client: &ApiClient) -> Result<MessageBody, ClientError> {
    client.request(Method::GET, LOGOUT_PATH, None).await
}

/// `GET /api/verify`.
///
/// # Errors
///
/// `Unauthenticated` when the session is missing or rejected.
pub async fn verify(client: &ApiClient) -> Result<User, ClientError> {
    let reply: VerifyReply = client.request(Method::GET, VERIFY_PATH, None).await?;
    Ok(reply.data)
}

/// `POST /api/register`. Returns the upstream body as-is.
///
/// # Errors
///
/// Any [`ClientError`] from the request.
pub async fn register(client: &ApiClient, fields: &RegisterRequest) -> Result<Value, ClientError> {
    client.send_ok(Method::POST, REGISTER_PATH, Some(to_body(fields)?)).await
}
