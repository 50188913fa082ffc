use crate::{domain::responses::CheckoutOutcome, errors::ServiceError};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCheckoutService = Arc<dyn CheckoutServiceTrait + Send + Sync>;

#[async_trait]
pub trait CheckoutServiceTrait {
    /// Runs the whole commit sequence for the session's cart: totals, stock
    /// validation, order + items persistence, stock decrements, and the
    /// gateway invoice (or the pending-demo path).
    async fn checkout(&self, session_id: &str) -> Result<CheckoutOutcome, ServiceError>;

    /// Issues a fresh invoice against an existing own order that has not been
    /// paid yet.
    async fn retry_payment(
        &self,
        session_id: &str,
        order_id: i32,
    ) -> Result<CheckoutOutcome, ServiceError>;
}
