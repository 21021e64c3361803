//! Back-office headline statistics.
//!
//! The upstream has no aggregate endpoint, so the six list endpoints are
//! fetched concurrently and counted here. Lists are decoded loosely
//! (`Vec<Value>`) except transactions, whose status and amount feed the
//! revenue figures.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;

use models::resources::{DashboardStats, Transaction};
use models::{SessionStore, User};
use serde_json::Value;

use super::auth::{self, AuthError};
use super::upstream::{UpstreamApi, UpstreamError, fetch_data};

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("admin role required")]
    Forbidden,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Verify that the session belongs to an admin.
///
/// # Errors
///
/// `Unauthenticated` without a valid session, `Forbidden` for non-admins.
pub async fn require_admin(api: &dyn UpstreamApi, session: &dyn SessionStore) -> Result<(User, String), DashboardError> {
    let user = auth::verify(api, session).await.map_err(|_: AuthError| DashboardError::Unauthenticated)?;
    if !user.is_admin() {
        return Err(DashboardError::Forbidden);
    }
    let token = session.get().ok_or(DashboardError::Unauthenticated)?;
    Ok((user, token))
}

/// Gather counts for the admin dashboard.
///
/// # Errors
///
/// Any access failure from [`require_admin`] or the first upstream failure
/// among the list fetches.
pub async fn stats(api: &dyn UpstreamApi, session: &dyn SessionStore) -> Result<DashboardStats, DashboardError> {
    let (_, token) = require_admin(api, session).await?;
    let token = token.as_str();

    let (users, banners, categories, activities, promos, transactions) = futures::try_join!(
        fetch_data::<Vec<Value>>(api, "all-user", token),
        fetch_data::<Vec<Value>>(api, "banners", token),
        fetch_data::<Vec<Value>>(api, "categories", token),
        fetch_data::<Vec<Value>>(api, "activities", token),
        fetch_data::<Vec<Value>>(api, "promos", token),
        fetch_data::<Vec<Transaction>>(api, "all-transactions", token),
    )?;

    let mut stats = DashboardStats {
        users: users.len(),
        banners: banners.len(),
        categories: categories.len(),
        activities: activities.len(),
        promos: promos.len(),
        ..DashboardStats::default()
    };
    stats.tally_transactions(&transactions);
    Ok(stats)
}
