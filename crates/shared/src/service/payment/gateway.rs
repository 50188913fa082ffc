use crate::{
    abstract_trait::{DynInvoiceGateway, InvoiceGatewayTrait},
    config::PaymentConfig,
    domain::{requests::CreateInvoiceRequest, responses::InvoiceResponse},
    errors::ServiceError,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tracing::{error, info, warn};

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// HTTP client for the hosted-invoice endpoint. The API key doubles as the
/// basic-auth username with an empty password.
pub struct InvoiceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl InvoiceClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build payment gateway HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl InvoiceGatewayTrait for InvoiceClient {
    async fn create_invoice(
        &self,
        req: &CreateInvoiceRequest,
    ) -> Result<InvoiceResponse, ServiceError> {
        let url = format!("{}/v2/invoices", self.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .json(req)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Invoice request failed for {}: {}", req.external_id, e);
                ServiceError::PaymentGateway(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "❌ Invoice request for {} rejected: {} {}",
                req.external_id, status, body
            );
            return Err(ServiceError::PaymentGateway(format!(
                "invoice request rejected with status {status}"
            )));
        }

        let invoice: InvoiceResponse = response.json().await.map_err(|e| {
            error!("❌ Failed to parse invoice response: {}", e);
            ServiceError::PaymentGateway(format!("invalid invoice response: {e}"))
        })?;

        info!(
            "✅ Invoice {} created for {}",
            invoice.id, req.external_id
        );
        Ok(invoice)
    }
}

/// Typed presence of the gateway integration: either a working client or an
/// explicit disabled state that routes checkouts to the pending-demo path.
#[derive(Clone)]
pub enum PaymentGateway {
    Disabled,
    Enabled(DynInvoiceGateway),
}

impl PaymentGateway {
    pub fn from_config(config: &PaymentConfig) -> Result<Self> {
        match &config.api_key {
            Some(api_key) => {
                let client = InvoiceClient::new(api_key, &config.base_url)?;
                Ok(PaymentGateway::Enabled(Arc::new(client)))
            }
            None => {
                warn!("⚠️ Payment gateway not configured; checkouts will be left pending (demo)");
                Ok(PaymentGateway::Disabled)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, PaymentGateway::Enabled(_))
    }
}
