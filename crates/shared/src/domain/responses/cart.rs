use crate::domain::{
    session::{CartLine, SessionData},
    voucher::{self, CartTotals, Voucher},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub product_id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub quantity: i32,
    pub image_url: String,
    pub stock: i32,
    pub total_price: i64,
}

impl CartItemResponse {
    fn from_line(product_id: i32, line: &CartLine) -> Self {
        CartItemResponse {
            product_id,
            name: line.name.clone(),
            description: line.description.clone(),
            price: line.price,
            quantity: line.quantity,
            image_url: line.image_url.clone(),
            stock: line.stock,
            total_price: line.price * line.quantity as i64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    #[serde(flatten)]
    pub totals: CartTotals,
    pub voucher: Option<Voucher>,
}

impl From<&SessionData> for CartResponse {
    fn from(session: &SessionData) -> Self {
        let items = session
            .cart
            .iter()
            .map(|(product_id, line)| CartItemResponse::from_line(*product_id, line))
            .collect();

        let totals = voucher::totals(session.subtotal(), session.voucher.as_ref());

        CartResponse {
            items,
            totals,
            voucher: session.voucher.clone(),
        }
    }
}
