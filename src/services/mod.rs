//! Business logic behind the HTTP routes.

pub mod auth;
pub mod dashboard;
pub mod upstream;
