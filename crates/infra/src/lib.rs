//! Infrastructure layer: product persistence and image file storage.

pub mod image_store;
pub mod repository;

pub use image_store::{ImageStore, StoredImage};
pub use repository::{InMemoryProductRepository, PostgresProductRepository, ProductRepository};
