//! `catalog-core` — shared catalog primitives.
//!
//! Identifiers and the closed error set used by every other crate. No IO lives here.

pub mod error;
pub mod id;

pub use error::{CatalogError, CatalogResult};
pub use id::ProductId;
