use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[schema(example = 1)]
    pub id: i32,
    /// Unique, compared case-sensitively
    #[schema(example = "Drinks")]
    pub name: String,
}

/// Body of `POST /categories`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[serde(default)]
    #[validate(length(max = 255))]
    #[schema(example = "Drinks")]
    pub name: String,
}

impl CreateCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
