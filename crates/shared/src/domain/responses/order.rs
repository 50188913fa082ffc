use crate::model::{Order, OrderItem};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub total: i64,
    pub status: String,
    pub discount_amount: i64,
    pub shipping_cost: i64,
    pub voucher_code: Option<String>,
    pub invoice_id: Option<String>,
    pub invoice_url: Option<String>,
    pub created_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.order_id,
            user_id: value.user_id,
            total: value.total,
            status: value.status,
            discount_amount: value.discount_amount,
            shipping_cost: value.shipping_cost,
            voucher_code: value.voucher_code,
            invoice_id: value.invoice_id,
            invoice_url: value.invoice_url,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub product_id: i32,
    pub quantity: i32,
    pub price: i64,
    pub total_price: i64,
    /// Product name at display time, when the product still exists.
    pub name: Option<String>,
    pub image_url: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        OrderItemResponse {
            product_id: value.product_id,
            quantity: value.quantity,
            price: value.price,
            total_price: value.price * value.quantity as i64,
            name: None,
            image_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}
