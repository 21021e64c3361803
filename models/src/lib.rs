//! Shared wire model and access policy for the gateway and its clients.
//!
//! This crate owns the upstream API's JSON schemas (users, envelopes, catalog
//! resources, carts, transactions), the session-store capability, and the pure
//! route-access decision. Both `roamly` (the gateway) and `client` depend on
//! it so the two sides agree on field names and on who may see which page.

pub mod access;
pub mod envelope;
pub mod requests;
pub mod resources;
pub mod session;
pub mod user;

pub use access::{AccessState, Decision, RouteClass, classify_access, classify_path, home_for, login_redirect, matches_prefix};
pub use envelope::{Envelope, LoginEnvelope, LoginReply, MessageBody, SchemaError, VerifyReply, message_of};
pub use session::{MemorySessionStore, SESSION_COOKIE, SESSION_MAX_AGE_SECS, SessionStore};
pub use user::{Role, User};
