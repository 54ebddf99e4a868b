use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use catalog_core::{CatalogError, CatalogResult, ProductId};
use catalog_products::{NewProduct, Product, ProductPatch};

use super::ProductRepository;

/// In-memory product store for tests/dev. Keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, Vec<Product>>> {
        self.inner
            .read()
            .map_err(|_| CatalogError::unavailable("in-memory product store poisoned"))
    }

    fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, Vec<Product>>> {
        self.inner
            .write()
            .map_err(|_| CatalogError::unavailable("in-memory product store poisoned"))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, new: NewProduct) -> CatalogResult<Product> {
        new.validate()?;
        let product = Product::from_new(ProductId::new(), new);
        self.write()?.push(product.clone());
        Ok(product)
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        Ok(self.read()?.iter().find(|p| p.id == id).cloned())
    }

    async fn update_by_id(&self, id: ProductId, patch: ProductPatch) -> CatalogResult<Product> {
        patch.validate()?;
        let mut products = self.write()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(CatalogError::not_found)?;
        product.apply_patch(patch);
        Ok(product.clone())
    }

    async fn delete_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        let mut products = self.write()?;
        let idx = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(CatalogError::not_found)?;
        Ok(products.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            description: format!("{name} description"),
            image: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_lists_in_insertion_order() {
        let repo = InMemoryProductRepository::new();
        let a = repo.create(new_product("A", 1.0)).await.unwrap();
        let b = repo.create(new_product("B", 2.0)).await.unwrap();
        let c = repo.create(new_product("C", 3.0)).await.unwrap();

        assert_ne!(a.id, b.id);
        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(repo.find_by_id(c.id).await.unwrap(), Some(c));
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let repo = InMemoryProductRepository::new();
        let err = repo.create(new_product(" ", 1.0)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(new_product("Pen", 1.5)).await.unwrap();

        let updated = repo
            .update_by_id(
                created.id,
                ProductPatch {
                    price: Some(2.5),
                    image: Some("/uploads/1-pen.png".to_string()),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Pen");
        assert_eq!(updated.price, 2.5);
        assert_eq!(updated.image.as_deref(), Some("/uploads/1-pen.png"));
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found_and_creates_nothing() {
        let repo = InMemoryProductRepository::new();
        let err = repo
            .update_by_id(ProductId::new(), ProductPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::NotFound);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_returns_removed_record() {
        let repo = InMemoryProductRepository::new();
        let keep = repo.create(new_product("Keep", 1.0)).await.unwrap();
        let gone = repo.create(new_product("Gone", 2.0)).await.unwrap();

        let removed = repo.delete_by_id(gone.id).await.unwrap();
        assert_eq!(removed, gone);
        assert_eq!(repo.list().await.unwrap(), vec![keep]);

        let err = repo.delete_by_id(gone.id).await.unwrap_err();
        assert_eq!(err, CatalogError::NotFound);
    }
}
