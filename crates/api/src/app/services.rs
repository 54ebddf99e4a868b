use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use catalog_infra::{
    ImageStore, InMemoryProductRepository, PostgresProductRepository, ProductRepository,
};

use crate::app::UPLOAD_PREFIX;
use crate::config::AppConfig;

/// Long-lived handles shared by every request.
#[derive(Clone)]
pub struct AppServices {
    pub repository: Arc<dyn ProductRepository>,
    pub images: ImageStore,
}

impl AppServices {
    pub fn new(repository: Arc<dyn ProductRepository>, images: ImageStore) -> Self {
        Self { repository, images }
    }

    /// In-memory repository over the given upload directory (dev/test).
    pub fn in_memory(upload_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::new()),
            ImageStore::new(upload_dir, UPLOAD_PREFIX),
        )
    }
}

/// Construct services from configuration: upload directory first, then the store.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let images = ImageStore::new(&config.upload_dir, UPLOAD_PREFIX);
    images
        .ensure_dir()
        .await
        .with_context(|| format!("failed to create upload dir {}", config.upload_dir.display()))?;

    let repository: Arc<dyn ProductRepository> = if config.use_persistent_stores {
        let repo = PostgresProductRepository::connect(&config.database_url)
            .await
            .context("failed to connect to Postgres")?;
        repo.ensure_schema()
            .await
            .context("failed to prepare products table")?;
        tracing::info!("using Postgres product store");
        Arc::new(repo)
    } else {
        tracing::warn!("USE_PERSISTENT_STORES not enabled; products are kept in memory");
        Arc::new(InMemoryProductRepository::new())
    };

    Ok(AppServices::new(repository, images))
}
