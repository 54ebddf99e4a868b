//! Multipart intake for product forms.
//!
//! At most one file is accepted, under the `image` field. It is written to the
//! image store while the form is read, before any record is touched, so a later
//! failure can leave an orphaned file behind.

use axum::extract::Multipart;
use axum::extract::multipart::{MultipartError, MultipartRejection};

use catalog_core::{CatalogError, CatalogResult};
use catalog_infra::{ImageStore, StoredImage};

pub const IMAGE_FIELD: &str = "image";

/// Raw product form values; typing and presence checks happen in `catalog-products`.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image: Option<StoredImage>,
}

impl ProductForm {
    pub fn image_path(&self) -> Option<String> {
        self.image.as_ref().map(|i| i.public_path.clone())
    }
}

/// Read every field of the form, storing the `image` file if one was sent.
pub async fn read_product_form(
    multipart: Result<Multipart, MultipartRejection>,
    images: &ImageStore,
) -> CatalogResult<ProductForm> {
    let mut multipart = multipart
        .map_err(|e| CatalogError::validation(format!("expected a multipart form: {}", e.body_text())))?;
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            IMAGE_FIELD => {
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty, unnamed part when no file was picked.
                let Some(file_name) = file_name.filter(|n| !n.is_empty()) else {
                    continue;
                };
                if form.image.is_some() {
                    tracing::debug!(file = %file_name, "ignoring additional image part");
                    continue;
                }

                let stored = images
                    .save(&file_name, &bytes)
                    .await
                    .map_err(|e| CatalogError::unavailable(format!("failed to store upload: {e}")))?;
                form.image = Some(stored);
            }
            "name" => form.name = Some(field.text().await.map_err(multipart_error)?),
            "price" => form.price = Some(field.text().await.map_err(multipart_error)?),
            "description" => form.description = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> CatalogError {
    CatalogError::validation(format!("malformed multipart body: {e}"))
}
