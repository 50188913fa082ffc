use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Hosted invoice as returned by the payment gateway.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: String,
    pub invoice_url: String,
}
