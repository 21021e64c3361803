//! User management hook for the back office, plus profile edits.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use models::requests::{UpdateProfileRequest, UpdateRoleRequest};
use models::{Role, User};
use reqwest::Method;
use serde_json::Value;

use super::resource::{ResourceHook, ResourceState, body_of};
use crate::error::ClientError;
use crate::net::client::ApiClient;

pub const USERS_PATH: &str = "/api/users";

pub struct UsersHook {
    inner: ResourceHook<Vec<User>>,
}

impl UsersHook {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { inner: ResourceHook::new(client, USERS_PATH) }
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<Vec<User>> {
        self.inner.state()
    }

    /// # Errors
    ///
    /// The fetch error, also kept in the state.
    pub async fn refetch(&self) -> Result<(), ClientError> {
        self.inner.refetch().await
    }

    /// # Errors
    ///
    /// The gateway's error.
    pub async fn update_role(&self, user_id: &str, role: Role) -> Result<Value, ClientError> {
        let body = body_of(&UpdateRoleRequest { role })?;
        self.inner.mutate(Method::POST, &format!("/api/update-user-role/{user_id}"), Some(body)).await
    }

    /// Edit the signed-in user's own profile. Only set fields are sent.
    ///
    /// # Errors
    ///
    /// The gateway's error.
    pub async fn update_profile(&self, fields: &UpdateProfileRequest) -> Result<Value, ClientError> {
        self.inner.mutate(Method::POST, "/api/update-profile", Some(body_of(fields)?)).await
    }
}
