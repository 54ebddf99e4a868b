//! Product persistence.
//!
//! `ProductRepository` is the seam between the HTTP layer and the store. Two
//! adapters exist: an in-memory one for dev/tests and a Postgres one.

use async_trait::async_trait;

use catalog_core::{CatalogResult, ProductId};
use catalog_products::{NewProduct, Product, ProductPatch};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;

/// Storage contract for product records.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Assign an id, store every field, return the stored record.
    async fn create(&self, new: NewProduct) -> CatalogResult<Product>;

    /// All records in insertion order.
    async fn list(&self) -> CatalogResult<Vec<Product>>;

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Merge the provided fields into the record. `CatalogError::NotFound` if absent.
    async fn update_by_id(&self, id: ProductId, patch: ProductPatch) -> CatalogResult<Product>;

    /// Remove and return the record. `CatalogError::NotFound` if absent.
    async fn delete_by_id(&self, id: ProductId) -> CatalogResult<Product>;
}

#[async_trait]
impl<R> ProductRepository for std::sync::Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn create(&self, new: NewProduct) -> CatalogResult<Product> {
        (**self).create(new).await
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        (**self).list().await
    }

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        (**self).find_by_id(id).await
    }

    async fn update_by_id(&self, id: ProductId, patch: ProductPatch) -> CatalogResult<Product> {
        (**self).update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        (**self).delete_by_id(id).await
    }
}
