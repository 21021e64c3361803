//! Client-side state containers.

pub mod auth;
