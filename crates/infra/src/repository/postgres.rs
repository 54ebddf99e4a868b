//! Postgres-backed product repository.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | CatalogError |
//! |------------|----------------------|--------------|
//! | Database (not-null violation) | `23502` | `Validation` |
//! | Database (check constraint violation) | `23514` | `Validation` |
//! | Database (other) | Any other | `Unavailable` |
//! | PoolClosed, Io, Tls, other | N/A | `Unavailable` |

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::instrument;

use catalog_core::{CatalogError, CatalogResult, ProductId};
use catalog_products::{NewProduct, Product, ProductPatch};

use super::ProductRepository;

/// Product records stored in the `products` table.
///
/// `created_at` is only used to keep list results in insertion order.
pub struct PostgresProductRepository {
    pool: Arc<PgPool>,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect using a `postgres://` URL.
    pub async fn connect(database_url: &str) -> CatalogResult<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> CatalogResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL CHECK (length(btrim(name)) > 0),
                price DOUBLE PRECISION NOT NULL,
                description TEXT NOT NULL CHECK (length(btrim(description)) > 0),
                image TEXT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self, new), fields(operation = "create_product"))]
    async fn create(&self, new: NewProduct) -> CatalogResult<Product> {
        new.validate()?;
        let id = ProductId::new();

        let row = sqlx::query(
            r#"
            INSERT INTO products (id, name, price, description, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, price, description, image
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.name)
        .bind(new.price)
        .bind(&new.description)
        .bind(new.image.as_deref())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;

        row_to_product(&row)
    }

    #[instrument(skip(self), fields(operation = "list_products"))]
    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price, description, image
            FROM products
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_products", e))?;

        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self), fields(operation = "find_product"))]
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, description, image
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_product", e))?;

        row.as_ref().map(row_to_product).transpose()
    }

    #[instrument(skip(self, patch), fields(operation = "update_product"))]
    async fn update_by_id(&self, id: ProductId, patch: ProductPatch) -> CatalogResult<Product> {
        patch.validate()?;

        // NULL parameters leave the column untouched.
        let row = sqlx::query(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                image = COALESCE($5, image)
            WHERE id = $1
            RETURNING id, name, price, description, image
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.name.as_deref())
        .bind(patch.price)
        .bind(patch.description.as_deref())
        .bind(patch.image.as_deref())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?;

        match row {
            Some(row) => row_to_product(&row),
            None => Err(CatalogError::not_found()),
        }
    }

    #[instrument(skip(self), fields(operation = "delete_product"))]
    async fn delete_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        let row = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            RETURNING id, name, price, description, image
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_product", e))?;

        match row {
            Some(row) => row_to_product(&row),
            None => Err(CatalogError::not_found()),
        }
    }
}

fn row_to_product(row: &PgRow) -> CatalogResult<Product> {
    let decode = |e: sqlx::Error| CatalogError::unavailable(format!("failed to decode product row: {e}"));

    Ok(Product {
        id: ProductId::from_uuid(row.try_get::<uuid::Uuid, _>("id").map_err(decode)?),
        name: row.try_get("name").map_err(decode)?,
        price: row.try_get("price").map_err(decode)?,
        description: row.try_get("description").map_err(decode)?,
        image: row.try_get("image").map_err(decode)?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> CatalogError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23502") | Some("23514") => CatalogError::Validation(msg),
                _ => CatalogError::Unavailable(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            CatalogError::unavailable(format!("connection pool closed in {}", operation))
        }
        other => CatalogError::unavailable(format!("{} failed: {}", operation, other)),
    }
}
