use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::CatalogError;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Map the closed catalog error set onto HTTP.
///
/// Validation and store failures are both 500; only unknown ids are 404.
pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", PRODUCT_NOT_FOUND),
        CatalogError::Validation(msg) => {
            tracing::error!("request failed validation: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "validation_error", msg)
        }
        CatalogError::Unavailable(msg) => {
            tracing::error!("product store unavailable: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
