use std::sync::Arc;

use axum::{
    extract::{
        multipart::MultipartRejection, DefaultBodyLimit, Extension, Host, Multipart, Path,
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{post, put},
    Json, Router,
};

use catalog_core::{CatalogError, ProductId};
use catalog_products::{NewProduct, ProductPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors, upload};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", put(update_product).delete(delete_product))
        // Uploads are stored as-is, whatever their size.
        .layer(DefaultBodyLimit::disable())
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> axum::response::Response {
    let form = match upload::read_product_form(multipart, &services.images).await {
        Ok(f) => f,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let image = form.image_path();
    let new = match NewProduct::from_parts(form.name, form.price, form.description, image) {
        Ok(n) => n,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    match services.repository.create(new).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "product created");
            (StatusCode::OK, Json(dto::product_to_json(product))).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Host(host): Host,
    headers: HeaderMap,
) -> axum::response::Response {
    let origin = dto::request_origin(&headers, &host);

    match services.repository.list().await {
        Ok(products) => {
            let items = products
                .into_iter()
                .map(|p| dto::product_to_json_absolute(p, &origin))
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Host(host): Host,
    headers: HeaderMap,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let form = match upload::read_product_form(multipart, &services.images).await {
        Ok(f) => f,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let new_image = form.image_path();
    let patch = match ProductPatch::from_parts(form.name, form.price, form.description, new_image) {
        Ok(p) => p,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let existing = match services.repository.find_by_id(id).await {
        Ok(Some(p)) => p,
        Ok(None) => return errors::catalog_error_to_response(CatalogError::not_found()),
        Err(e) => return errors::catalog_error_to_response(e),
    };

    // The old file goes as soon as a replacement is accepted; the record update
    // does not wait for it.
    if patch.image.is_some() {
        if let Some(old) = existing.image {
            services.images.remove_in_background(old);
        }
    }

    match services.repository.update_by_id(id, patch).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "product updated");
            let origin = dto::request_origin(&headers, &host);
            (StatusCode::OK, Json(dto::product_to_json_absolute(product, &origin))).into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let existing = match services.repository.find_by_id(id).await {
        Ok(Some(p)) => p,
        Ok(None) => return errors::catalog_error_to_response(CatalogError::not_found()),
        Err(e) => return errors::catalog_error_to_response(e),
    };

    if let Some(image) = existing.image {
        services.images.remove_in_background(image);
    }

    match services.repository.delete_by_id(id).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "product deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "message": "Product deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => errors::catalog_error_to_response(e),
    }
}
