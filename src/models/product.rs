use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::Category;
use crate::error::{AppError, AppResult};

/// Column limits of the `products` table.
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 250;
pub const PRICE_SCALE: u32 = 2;
/// `NUMERIC(14, 2)` leaves twelve integer digits.
const PRICE_LIMIT: i64 = 1_000_000_000_000;

/// Core product entity, serialized as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Exact decimal, always carried as a JSON string.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Product {
    pub fn from_payload(id: i32, payload: ProductPayload) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            available: payload.available,
            category: payload.category,
        }
    }
}

// ── Request payload ───────────────────────────────────────────────────────────

/// Every mutable product field, as accepted by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl ProductPayload {
    /// Typed decode of a request body. `name`, `price`, `available` and
    /// `category` are required; `description` may be absent or null.
    /// Any `id` in the body is ignored.
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let fields = body.as_object().ok_or_else(|| {
            AppError::Validation(
                "Invalid product: body of request contained bad or no data".to_string(),
            )
        })?;

        let name = match required(fields, "name")? {
            Value::String(s) if !s.trim().is_empty() => s.clone(),
            Value::String(_) => {
                return Err(AppError::Validation(
                    "Invalid product: name must not be empty".to_string(),
                ))
            }
            other => return Err(wrong_type("name", "string", other)),
        };
        check_length("name", &name, MAX_NAME_LEN)?;

        let description = match fields.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => return Err(wrong_type("description", "string", other)),
        };
        if let Some(description) = &description {
            check_length("description", description, MAX_DESCRIPTION_LEN)?;
        }

        let price = match required(fields, "price")? {
            Value::String(s) => parse_price(s)?,
            // serde_json prints the shortest round-trip form, so "19.99" stays "19.99"
            Value::Number(n) => parse_price(&n.to_string())?,
            other => return Err(wrong_type("price", "decimal string", other)),
        };

        let available = match required(fields, "available")? {
            Value::Bool(b) => *b,
            other => return Err(wrong_type("available", "boolean", other)),
        };

        let category = match required(fields, "category")? {
            Value::String(s) => {
                Category::from_name(s).map_err(|e| AppError::Validation(e.to_string()))?
            }
            other => return Err(wrong_type("category", "string", other)),
        };

        Ok(Self {
            name,
            description,
            price,
            available,
            category,
        })
    }
}

fn required<'a>(fields: &'a Map<String, Value>, key: &str) -> AppResult<&'a Value> {
    match fields.get(key) {
        Some(Value::Null) | None => Err(AppError::Validation(format!(
            "Invalid product: missing {}",
            key
        ))),
        Some(value) => Ok(value),
    }
}

fn wrong_type(key: &str, expected: &str, got: &Value) -> AppError {
    let found = match got {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    AppError::Validation(format!(
        "Invalid type for [{}]: expected {}, found {}",
        key, expected, found
    ))
}

fn check_length(key: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "Invalid attribute: {} must be at most {} characters",
            key, max
        )));
    }
    Ok(())
}

/// Parses a price that fits the column exactly, returned at the column's
/// scale so every store renders it the same way.
fn parse_price(raw: &str) -> AppResult<Decimal> {
    let mut price = Decimal::from_str(raw.trim()).map_err(|_| {
        AppError::Validation(format!(
            "Invalid attribute: price '{}' is not a decimal",
            raw
        ))
    })?;

    if price.scale() > PRICE_SCALE {
        return Err(AppError::Validation(format!(
            "Invalid attribute: price '{}' has more than {} decimal places",
            raw, PRICE_SCALE
        )));
    }
    if price.abs() >= Decimal::from(PRICE_LIMIT) {
        return Err(AppError::Validation(format!(
            "Invalid attribute: price '{}' is out of range",
            raw
        )));
    }

    price.rescale(PRICE_SCALE);
    Ok(price)
}

// ── Query parameters ──────────────────────────────────────────────────────────

/// Raw list query string. Empty values count as absent.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub available: Option<String>,
}

/// The single narrowing applied to a product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    Name(String),
    Category(Category),
    Available(bool),
}

impl ProductQuery {
    /// Picks one filter: name wins over category, category over availability.
    pub fn into_filter(self) -> AppResult<ProductFilter> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());

        if let Some(name) = present(self.name) {
            return Ok(ProductFilter::Name(name));
        }
        if let Some(category) = present(self.category) {
            let category =
                Category::from_name(&category).map_err(|e| AppError::Validation(e.to_string()))?;
            return Ok(ProductFilter::Category(category));
        }
        if let Some(available) = present(self.available) {
            return parse_flag(&available).map(ProductFilter::Available);
        }
        Ok(ProductFilter::All)
    }
}

fn parse_flag(raw: &str) -> AppResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "Invalid attribute: available '{}' is not a boolean",
            raw
        ))),
    }
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Name(name) => product.name == *name,
            ProductFilter::Category(category) => product.category == *category,
            ProductFilter::Available(available) => product.available == *available,
        }
    }
}
