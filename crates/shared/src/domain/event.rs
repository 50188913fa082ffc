use serde::Deserialize;

/// Invoice webhook payload. The provider has delivered the interesting fields
/// both at the top level and nested under `data` depending on event version,
/// so both shapes are accepted; the top-level value wins when both are set.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct InvoiceCallback {
    pub external_id: Option<String>,
    pub status: Option<String>,
    pub id: Option<String>,
    pub data: Option<InvoiceCallbackData>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct InvoiceCallbackData {
    pub external_id: Option<String>,
    pub status: Option<String>,
    pub id: Option<String>,
}

impl InvoiceCallback {
    pub fn external_id(&self) -> Option<&str> {
        self.external_id
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.external_id.as_deref()))
    }

    pub fn status(&self) -> Option<&str> {
        self.status
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.status.as_deref()))
    }

    pub fn invoice_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.id.as_deref()))
    }

    /// External ids are issued as `order-{order_id}`; anything else yields
    /// `None` and the caller falls back to the invoice-id lookup.
    pub fn order_id(&self) -> Option<i32> {
        self.external_id()?.split('-').nth(1)?.parse().ok()
    }
}
