use serde::{Deserialize, Serialize};

use catalog_core::{CatalogError, CatalogResult, ProductId};

/// A stored product record.
///
/// `image` holds the relative public path of the uploaded file (for example
/// `/uploads/1700000000000000-pen.png`) or `None` when no file was uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: Option<String>,
}

impl Product {
    /// Build the record for a freshly assigned id.
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            price: new.price,
            description: new.description,
            image: new.image,
        }
    }

    /// Merge the provided fields of `patch` into this record.
    ///
    /// Fields left as `None` keep their current value; the id never changes.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: Option<String>,
}

impl NewProduct {
    /// Assemble create input from optional form values.
    ///
    /// Every required field must be present; `price` must parse as a finite number.
    pub fn from_parts(
        name: Option<String>,
        price: Option<String>,
        description: Option<String>,
        image: Option<String>,
    ) -> CatalogResult<Self> {
        let name = name.ok_or_else(|| CatalogError::validation("name is required"))?;
        let price = price.ok_or_else(|| CatalogError::validation("price is required"))?;
        let description =
            description.ok_or_else(|| CatalogError::validation("description is required"))?;

        let new = Self {
            name,
            price: parse_price(&price)?,
            description,
            image,
        };
        new.validate()?;
        Ok(new)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        ensure_text("name", &self.name)?;
        ensure_finite(self.price)?;
        ensure_text("description", &self.description)?;
        Ok(())
    }
}

/// Partial update: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ProductPatch {
    /// Assemble an update from optional form values.
    pub fn from_parts(
        name: Option<String>,
        price: Option<String>,
        description: Option<String>,
        image: Option<String>,
    ) -> CatalogResult<Self> {
        let patch = Self {
            name,
            price: price.as_deref().map(parse_price).transpose()?,
            description,
            image,
        };
        patch.validate()?;
        Ok(patch)
    }

    /// Provided fields obey the same rules as on create.
    pub fn validate(&self) -> CatalogResult<()> {
        if let Some(name) = &self.name {
            ensure_text("name", name)?;
        }
        if let Some(price) = self.price {
            ensure_finite(price)?;
        }
        if let Some(description) = &self.description {
            ensure_text("description", description)?;
        }
        Ok(())
    }
}

/// Parse a price submitted as form text.
pub fn parse_price(raw: &str) -> CatalogResult<f64> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CatalogError::validation(format!("price must be a number, got {raw:?}")))?;
    ensure_finite(price)?;
    Ok(price)
}

fn ensure_text(field: &str, value: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn ensure_finite(price: f64) -> CatalogResult<()> {
    if !price.is_finite() {
        return Err(CatalogError::validation("price must be a finite number"));
    }
    Ok(())
}
