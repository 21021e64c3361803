//! Networking for the gateway's HTTP surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves bytes (real HTTP or a test double), `client` adds the
//! session cookie on the way out and applies `Set-Cookie` on the way back,
//! and `api` holds the typed auth endpoints.

pub mod api;
pub mod client;
pub mod transport;
