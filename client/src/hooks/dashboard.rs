//! Back-office statistics hook.

use models::resources::DashboardStats;

use super::resource::{ResourceHook, ResourceState};
use crate::error::ClientError;
use crate::net::client::ApiClient;

pub const DASHBOARD_STATS_PATH: &str = "/api/dashboard-stats";

pub struct DashboardHook {
    inner: ResourceHook<DashboardStats>,
}

impl DashboardHook {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { inner: ResourceHook::new(client, DASHBOARD_STATS_PATH) }
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<DashboardStats> {
        self.inner.state()
    }

    /// # Errors
    ///
    /// The fetch error, also kept in the state.
    pub async fn refetch(&self) -> Result<(), ClientError> {
        self.inner.refetch().await
    }
}
