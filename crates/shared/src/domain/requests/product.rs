use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    pub category: Option<String>,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Trail Runner 2")]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 0, message = "Price must not be negative"))]
    #[schema(example = 1200000)]
    pub price: i64,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    #[schema(example = 25)]
    pub stock: i32,

    pub category: Option<String>,

    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    pub id: i32,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i32,

    pub category: Option<String>,

    pub image_url: Option<String>,
}
