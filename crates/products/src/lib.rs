//! Products domain module.
//!
//! The product record and the inputs used to create and update it, with the
//! presence/type checks a record must pass before it is stored. No IO here.

pub mod product;

pub use product::{NewProduct, Product, ProductPatch, parse_price};
