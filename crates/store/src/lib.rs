//! Resource store: persistent keyed-record storage for the storefront.
//!
//! The store guarantees per-document atomicity only; there are no
//! multi-document transactions. Callers that need cross-document
//! consistency must design for it (the order workflow's two-phase
//! create-then-patch update is the canonical example).

mod error;
mod memory;
mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use store::{OrderStore, ProductStore, ResourceStore, UserStore};
