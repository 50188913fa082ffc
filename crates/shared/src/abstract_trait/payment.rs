use crate::{
    domain::{requests::CreateInvoiceRequest, responses::InvoiceResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynInvoiceGateway = Arc<dyn InvoiceGatewayTrait + Send + Sync>;

#[async_trait]
pub trait InvoiceGatewayTrait {
    async fn create_invoice(
        &self,
        req: &CreateInvoiceRequest,
    ) -> Result<InvoiceResponse, ServiceError>;
}
