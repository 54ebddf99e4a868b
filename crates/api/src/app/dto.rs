use axum::http::HeaderMap;

use catalog_products::Product;

// -------------------------
// Request origin
// -------------------------

/// `<scheme>://<host>` of the incoming request, used to qualify image paths.
///
/// The scheme comes from `X-Forwarded-Proto` when a proxy sets it, otherwise `http`.
pub fn request_origin(headers: &HeaderMap, host: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    format!("{scheme}://{host}")
}

pub fn absolute_url(origin: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Product as stored: `image` stays a relative path.
pub fn product_to_json(p: Product) -> serde_json::Value {
    serde_json::json!({
        "id": p.id.to_string(),
        "name": p.name,
        "price": p.price,
        "description": p.description,
        "image": p.image,
    })
}

/// Product with `image` rewritten to a fully qualified URL for cross-origin clients.
pub fn product_to_json_absolute(mut p: Product, origin: &str) -> serde_json::Value {
    p.image = p.image.map(|path| absolute_url(origin, &path));
    product_to_json(p)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use catalog_core::ProductId;

    use super::*;

    fn product(image: Option<&str>) -> Product {
        Product {
            id: ProductId::new(),
            name: "Pen".to_string(),
            price: 1.5,
            description: "Blue ink".to_string(),
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn origin_defaults_to_http() {
        assert_eq!(request_origin(&HeaderMap::new(), "shop.local:5000"), "http://shop.local:5000");
    }

    #[test]
    fn origin_honors_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        assert_eq!(request_origin(&headers, "shop.example"), "https://shop.example");
    }

    #[test]
    fn absolute_url_joins_with_single_slash() {
        assert_eq!(absolute_url("http://h", "/uploads/1-a.png"), "http://h/uploads/1-a.png");
        assert_eq!(absolute_url("http://h", "uploads/1-a.png"), "http://h/uploads/1-a.png");
    }

    #[test]
    fn relative_mapping_keeps_stored_path() {
        let json = product_to_json(product(Some("/uploads/1-pen.png")));
        assert_eq!(json["image"], "/uploads/1-pen.png");
    }

    #[test]
    fn absolute_mapping_qualifies_image_and_keeps_null() {
        let json = product_to_json_absolute(product(Some("/uploads/1-pen.png")), "http://h:1");
        assert_eq!(json["image"], "http://h:1/uploads/1-pen.png");
        assert_eq!(json["name"], "Pen");
        assert_eq!(json["price"], 1.5);

        let json = product_to_json_absolute(product(None), "http://h:1");
        assert!(json["image"].is_null());
    }
}
