use crate::domain::responses::order::OrderResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What the checkout sequencer hands back to the HTTP layer: either a hosted
/// invoice to redirect the buyer to, or a demo order created without a
/// configured gateway.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Invoice {
        order: OrderResponse,
        invoice_url: String,
    },
    PendingDemo {
        order: OrderResponse,
    },
}
