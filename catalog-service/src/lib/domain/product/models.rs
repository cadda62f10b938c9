use std::fmt;

use serde_json::Value;

use crate::domain::product::errors::ProductError;

/// Product record as kept in the `products` collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

/// A product together with the key it is stored under.
///
/// The key normally equals `product.id`, but records reached through the
/// string-id scan may be stored under a different representation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProduct {
    pub key: ProductId,
    pub product: Product,
}

/// Opaque product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Target type of a whitelisted update field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Price,
    Flag,
}

/// Keys naming the record identity; never client-overridable.
const IDENTITY_KEYS: [&str; 2] = ["id", "_id"];

/// The only keys an update payload may change.
const UPDATABLE_FIELDS: [(&str, FieldKind); 4] = [
    ("name", FieldKind::Text),
    ("category", FieldKind::Text),
    ("price", FieldKind::Price),
    ("inStock", FieldKind::Flag),
];

/// Validated partial update for a product.
///
/// `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub in_stock: Option<bool>,
}

impl ProductChanges {
    /// Sanitize and coerce a raw JSON update payload.
    ///
    /// Identity keys are dropped, unknown keys ignored. Text and price fields
    /// apply only when present and non-null; `inStock` applies whenever the
    /// key is present, coerced by truthiness (so `null` sets it to false).
    ///
    /// # Errors
    /// * `InvalidPayload` - Payload is not an object, or price is not a
    ///   finite non-negative number
    pub fn from_payload(payload: Value) -> Result<Self, ProductError> {
        let Value::Object(mut fields) = payload else {
            return Err(ProductError::InvalidPayload(
                "expected a JSON object".to_string(),
            ));
        };

        for key in IDENTITY_KEYS {
            fields.remove(key);
        }

        let mut changes = Self::default();

        for (key, kind) in UPDATABLE_FIELDS {
            let Some(value) = fields.get(key) else {
                continue;
            };

            match kind {
                FieldKind::Text if !value.is_null() => {
                    let text = coerce_text(value);
                    if key == "name" {
                        changes.name = Some(text);
                    } else {
                        changes.category = Some(text);
                    }
                }
                FieldKind::Price if !value.is_null() => {
                    changes.price = Some(coerce_price(value)?);
                }
                FieldKind::Flag => {
                    changes.in_stock = Some(is_truthy(value));
                }
                _ => {}
            }
        }

        Ok(changes)
    }

    /// Apply the changes to a record in place.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(category) = &self.category {
            product.category = Some(category.clone());
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = Some(in_stock);
        }
    }

    /// Build a fresh record with the same id, merging `base` with the changes.
    pub fn merged(&self, base: &Product) -> Product {
        Product {
            id: base.id.clone(),
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            price: self.price.unwrap_or(base.price),
            category: self.category.clone().or_else(|| base.category.clone()),
            in_stock: self.in_stock.or(base.in_stock),
        }
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_price(value: &Value) -> Result<f64, ProductError> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ProductError::InvalidPayload(format!("price is not a number: {}", value)))?;

    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::InvalidPayload(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }

    Ok(price)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
