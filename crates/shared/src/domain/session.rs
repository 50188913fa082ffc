use crate::domain::voucher::Voucher;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Authenticated user summary kept in the session after login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub id: i32,
    pub provider_user_id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub login_time: DateTime<Utc>,
}

impl UserSession {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// One product entry in the cart. Price, name and stock are snapshots taken
/// when the line was added; the stock snapshot is display-only and is re-read
/// from the catalog at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub quantity: i32,
    pub image_url: String,
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: String,
    pub address: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub zip_code: String,
}

/// The whole per-browser session document, persisted as one JSON value so
/// every cart mutation lands in the store immediately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    pub user: Option<UserSession>,
    #[serde(default)]
    pub cart: BTreeMap<i32, CartLine>,
    pub voucher: Option<Voucher>,
    pub shipping: Option<ShippingInfo>,
}

impl SessionData {
    pub fn subtotal(&self) -> i64 {
        self.cart
            .values()
            .map(|line| line.price * line.quantity as i64)
            .sum()
    }

    /// Drops the order-in-progress state after a completed purchase. The user
    /// summary stays untouched.
    pub fn clear_checkout_state(&mut self) {
        self.cart.clear();
        self.shipping = None;
        self.voucher = None;
    }
}
