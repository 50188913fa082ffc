use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ShippingInfoRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[validate(length(min = 1, message = "Mobile phone is required"))]
    pub mobile_phone: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[serde(default)]
    pub district: String,

    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,
}
