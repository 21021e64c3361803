//! Cart hook.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use models::requests::{AddCartRequest, UpdateCartRequest};
use models::resources::{CartItem, cart_total};
use reqwest::Method;
use serde_json::Value;

use super::resource::{ResourceHook, ResourceState, body_of};
use crate::error::ClientError;
use crate::net::client::ApiClient;

pub const CARTS_PATH: &str = "/api/carts";

pub struct CartHook {
    inner: ResourceHook<Vec<CartItem>>,
}

impl CartHook {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { inner: ResourceHook::new(client, CARTS_PATH) }
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<Vec<CartItem>> {
        self.inner.state()
    }

    /// Price of everything in the cart, 0 before the first fetch.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.inner.data().map_or(0, |items| cart_total(&items))
    }

    /// # Errors
    ///
    /// The fetch error, also kept in the state.
    pub async fn refetch(&self) -> Result<(), ClientError> {
        self.inner.refetch().await
    }

    /// # Errors
    ///
    /// The gateway's error; the cart is left as it was.
    pub async fn add_item(&self, activity_id: &str) -> Result<Value, ClientError> {
        let body = body_of(&AddCartRequest { activity_id: activity_id.to_owned() })?;
        self.inner.mutate(Method::POST, "/api/add-cart", Some(body)).await
    }

    /// Concurrent calls are not sequenced; the last refetch to land wins.
    ///
    /// # Errors
    ///
    /// The gateway's error; the cart is left as it was.
    pub async fn update_item_quantity(&self, cart_id: &str, quantity: u32) -> Result<Value, ClientError> {
        let body = body_of(&UpdateCartRequest { quantity })?;
        self.inner.mutate(Method::POST, &format!("/api/cart-update/{cart_id}"), Some(body)).await
    }

    /// # Errors
    ///
    /// The gateway's error; the cart is left as it was.
    pub async fn delete_item(&self, cart_id: &str) -> Result<Value, ClientError> {
        self.inner.mutate(Method::DELETE, &format!("/api/delete-cart/{cart_id}"), None).await
    }
}
