//! Native client for the Roamly gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` speaks HTTP to the gateway's `/api/*` surface and keeps the session
//! cookie in a [`models::SessionStore`]. `state::auth` is the auth context a
//! front end consults for the current user; `hooks` are per-view resource
//! holders (cart, catalog, transactions, users) that fetch, mutate, and
//! refetch.

pub mod error;
pub mod hooks;
pub mod net;
pub mod state;

pub use error::ClientError;
pub use net::client::ApiClient;
pub use state::auth::{AuthContext, AuthState};
