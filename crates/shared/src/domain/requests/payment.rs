use serde::Serialize;

/// Request body for creating a hosted invoice at the payment gateway.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceRequest {
    pub external_id: String,
    pub amount: i64,
    pub payer_email: String,
    pub description: String,
    pub success_redirect_url: String,
    pub failure_redirect_url: String,
}
