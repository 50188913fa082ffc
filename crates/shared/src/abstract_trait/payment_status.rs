use crate::{
    domain::{
        event::InvoiceCallback,
        responses::{ApiResponse, OrderResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynPaymentStatusService = Arc<dyn PaymentStatusServiceTrait + Send + Sync>;

#[async_trait]
pub trait PaymentStatusServiceTrait {
    /// Buyer came back from the gateway on the success URL.
    async fn redirect_success(
        &self,
        session_id: &str,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;

    /// Buyer came back from the gateway on the failure URL.
    async fn redirect_failed(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;

    /// Server-to-server invoice event. Idempotent; unknown statuses and
    /// unresolvable orders are ignored.
    async fn apply_webhook(&self, payload: &InvoiceCallback) -> Result<(), ServiceError>;
}
