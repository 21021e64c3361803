//! Catalog hooks: banners, categories, activities and promos.
//!
//! The four catalog resources share one endpoint shape on the gateway:
//! `/api/<plural>` to list, `/api/<plural>/{id}` for detail and
//! `create-<noun>`, `update-<noun>/{id}`, `delete-<noun>/{id}` for admin
//! mutations. [`CatalogResource`] names those pieces per type.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use models::resources::{Activity, Banner, Category, Promo};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::resource::{ResourceHook, ResourceState};
use crate::error::ClientError;
use crate::net::client::ApiClient;

pub trait CatalogResource: DeserializeOwned + Clone + Send + Sync {
    /// Plural path segment, e.g. `banners`.
    const PLURAL: &'static str;
    /// Singular noun used in mutation paths, e.g. `banner`.
    const NOUN: &'static str;
}

impl CatalogResource for Banner {
    const PLURAL: &'static str = "banners";
    const NOUN: &'static str = "banner";
}

impl CatalogResource for Category {
    const PLURAL: &'static str = "categories";
    const NOUN: &'static str = "category";
}

impl CatalogResource for Activity {
    const PLURAL: &'static str = "activities";
    const NOUN: &'static str = "activity";
}

impl CatalogResource for Promo {
    const PLURAL: &'static str = "promos";
    const NOUN: &'static str = "promo";
}

/// List of one catalog resource with admin mutations.
pub struct CatalogHook<T: CatalogResource> {
    inner: ResourceHook<Vec<T>>,
}

impl<T: CatalogResource> CatalogHook<T> {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { inner: ResourceHook::new(client, format!("/api/{}", T::PLURAL)) }
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<Vec<T>> {
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
    /// The gateway's error; the list is left as it was.
    pub async fn create(&self, fields: Value) -> Result<Value, ClientError> {
        self.inner.mutate(Method::POST, &format!("/api/create-{}", T::NOUN), Some(fields)).await
    }

    /// # Errors
    ///
    /// The gateway's error; the list is left as it was.
    pub async fn update(&self, id: &str, fields: Value) -> Result<Value, ClientError> {
        self.inner.mutate(Method::POST, &format!("/api/update-{}/{id}", T::NOUN), Some(fields)).await
    }

    /// # Errors
    ///
    /// The gateway's error; the list is left as it was.
    pub async fn delete(&self, id: &str) -> Result<Value, ClientError> {
        self.inner.mutate(Method::DELETE, &format!("/api/delete-{}/{id}", T::NOUN), None).await
    }
}

/// Single catalog record by id.
#[must_use]
pub fn detail<T: CatalogResource>(client: ApiClient, id: &str) -> ResourceHook<T> {
    ResourceHook::new(client, format!("/api/{}/{id}", T::PLURAL))
}

/// Activities in one category.
#[must_use]
pub fn activities_by_category(client: ApiClient, category_id: &str) -> ResourceHook<Vec<Activity>> {
    ResourceHook::new(client, format!("/api/activities-by-category/{category_id}"))
}
