use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Mock Product")]
    pub name: String,
    #[schema(example = 100.0)]
    pub price: f64,
    /// Age-restricted product
    pub is_18_plus: bool,
    /// Category identity
    #[schema(example = 1)]
    pub category: i32,
}

/// Body of `POST /products`.
///
/// `price` accepts a JSON number or a numeric string such as `"100"`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[serde(default)]
    #[validate(length(max = 255))]
    #[schema(example = "Mock Product")]
    pub name: String,

    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 100)]
    pub price: Option<Value>,

    /// Defaults to `false`
    #[serde(default)]
    pub is_18_plus: Option<bool>,

    #[serde(default, alias = "category_id")]
    #[schema(example = 1)]
    pub category: Option<i32>,
}

/// Body of `PATCH /products/{id}`; only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: Option<String>,

    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Value>,

    #[serde(default)]
    pub is_18_plus: Option<bool>,

    #[serde(default, alias = "category_id")]
    pub category: Option<i32>,
}

/// Query parameters for `GET /products`
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact name match, ignoring case
    pub name: Option<String>,
}

/// A validated product ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub is_18_plus: bool,
    pub category_id: i32,
}

/// Validated field changes for an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub is_18_plus: Option<bool>,
    pub category_id: Option<i32>,
}

/// Lower-cased form of a product name used for uniqueness and filtering.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Coerce a raw JSON price into a finite number.
pub fn parse_price(raw: &Value) -> ProductResult<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    value
        .filter(|v| v.is_finite())
        .ok_or(ProductError::InvalidPrice)
}
