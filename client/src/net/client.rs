//! Session-aware API client.
//!
//! DESIGN
//! ======
//! Every request carries the stored session token, and every response's
//! `Set-Cookie` headers for the `token` cookie are applied back to the store:
//! an empty value or a zero/negative `Max-Age` clears it, anything else
//! replaces it. This mirrors what a browser's cookie jar would do for the
//! gateway's session cookie.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use cookie::Cookie;
use models::{Envelope, SESSION_COOKIE, SessionStore, message_of};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{ApiRequest, ApiResponse, ApiTransport};
use crate::error::ClientError;

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn ApiTransport>,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>, session: Arc<dyn SessionStore>) -> Self {
        Self { transport, session }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Send a request and apply any session cookie changes. Any status is Ok.
    ///
    /// # Errors
    ///
    /// Only transport failures.
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest { method, path: path.to_owned(), body, token: self.session.get() };
        let response = self.transport.execute(request).await?;
        for raw in &response.set_cookies {
            self.apply_set_cookie(raw);
        }
        Ok(response)
    }

    /// Send a request and require a success status.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` on 401, `Http` on other non-2xx, plus transport failures.
    pub async fn send_ok(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        let response = self.send(method, path, body).await?;
        check_status(response)
    }

    /// Send a request and decode the success body as `T`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send_ok`], plus `Decode` when the body does not match.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        let body = self.send_ok(method, path, body).await?;
        serde_json::from_value(body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `GET path` and decode the envelope's `data` as `T`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send_ok`], plus `Decode` for a missing or mismatched `data`.
    pub async fn fetch_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let body = self.send_ok(Method::GET, path, None).await?;
        Ok(Envelope::<T>::from_value(&body)?.data)
    }

    fn apply_set_cookie(&self, raw: &str) {
        let Ok(cookie) = Cookie::parse(raw) else {
            tracing::debug!("ignoring unparseable set-cookie header");
            return;
        };
        if cookie.name() != SESSION_COOKIE {
            return;
        }
        let expired = cookie.max_age().is_some_and(|age| age.is_zero() || age.is_negative());
        if cookie.value().is_empty() || expired {
            self.session.clear();
        } else {
            self.session.set(cookie.value());
        }
    }
}

fn check_status(response: ApiResponse) -> Result<Value, ClientError> {
    if response.is_success() {
        return Ok(response.body);
    }
    if response.status == 401 {
        return Err(ClientError::Unauthenticated);
    }
    let message = message_of(&response.body).unwrap_or_else(|| format!("request failed: {}", response.status));
    Err(ClientError::Http { status: response.status, message })
}
