//! Generic fetch/mutate/refetch holder.

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use std::sync::{PoisonError, RwLock};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::net::client::ApiClient;

/// What a view renders from.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub error: Option<ClientError>,
    pub loading: bool,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self { data: None, error: None, loading: true }
    }
}

/// Holds one remote resource fetched from `path` (an enveloped `data` body).
pub struct ResourceHook<T> {
    client: ApiClient,
    path: String,
    state: RwLock<ResourceState<T>>,
}

impl<T> ResourceHook<T>
where
    T: DeserializeOwned + Clone + Send + Sync,
{
    #[must_use]
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self { client, path: path.into(), state: RwLock::new(ResourceState::default()) }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<T> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn data(&self) -> Option<T> {
        self.state().data
    }

    fn update(&self, f: impl FnOnce(&mut ResourceState<T>)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    /// Re-read the resource. On failure the previous data is kept and the
    /// error recorded.
    ///
    /// # Errors
    ///
    /// The fetch error, also stored in the state.
    pub async fn refetch(&self) -> Result<(), ClientError> {
        self.update(|s| s.loading = true);
        match self.client.fetch_data::<T>(&self.path).await {
            Ok(data) => {
                self.update(|s| {
                    s.data = Some(data);
                    s.error = None;
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %self.path, error = %e, "resource fetch failed");
                self.update(|s| {
                    s.error = Some(e.clone());
                    s.loading = false;
                });
                Err(e)
            }
        }
    }

    /// Send one mutation and refetch on success. On failure the error is
    /// recorded and the data left as it was.
    ///
    /// # Errors
    ///
    /// The mutation's error. A failed refetch after a successful mutation is
    /// only recorded in the state.
    pub async fn mutate(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        match self.client.send_ok(method, path, body).await {
            Ok(reply) => {
                let _ = self.refetch().await;
                Ok(reply)
            }
            Err(e) => {
                tracing::warn!(%path, error = %e, "mutation failed");
                self.update(|s| s.error = Some(e.clone()));
                Err(e)
            }
        }
    }
}

/// Serialize a request body for a mutation.
pub(crate) fn body_of<B: serde::Serialize>(body: &B) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}
