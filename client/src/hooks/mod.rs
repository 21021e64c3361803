//! Resource hooks: per-view holders of fetched data.
//!
//! DESIGN
//! ======
//! Each hook owns its own [`resource::ResourceState`] and talks to the
//! gateway directly. Mutations send one request and refetch on success.
//! There is no cache shared between hooks, no de-duplication of concurrent
//! requests and no retry; two overlapping mutations on the same hook both go
//! out and whichever refetch lands last wins.

pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod resource;
pub mod transactions;
pub mod users;

pub use cart::CartHook;
pub use catalog::{CatalogHook, CatalogResource};
pub use dashboard::DashboardHook;
pub use resource::{ResourceHook, ResourceState};
pub use transactions::{PaymentMethodsHook, TransactionsHook};
pub use users::UsersHook;
