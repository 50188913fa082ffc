use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Success,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Success => "success",
            OrderStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "success" => Some(OrderStatus::Success),
            "failed" => Some(OrderStatus::Failed),
            _ => None,
        }
    }

    /// Map the payment provider's status vocabulary onto the local state
    /// machine. Anything unrecognized is ignored by the reconciler.
    pub fn from_provider(status: &str) -> Option<Self> {
        match status.to_lowercase().as_str() {
            "paid" => Some(OrderStatus::Success),
            "pending" => Some(OrderStatus::Pending),
            "expired" | "failed" | "void" => Some(OrderStatus::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Success)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_vocabulary_maps_onto_local_states() {
        assert_eq!(OrderStatus::from_provider("PAID"), Some(OrderStatus::Success));
        assert_eq!(
            OrderStatus::from_provider("pending"),
            Some(OrderStatus::Pending)
        );
        assert_eq!(
            OrderStatus::from_provider("expired"),
            Some(OrderStatus::Failed)
        );
        assert_eq!(OrderStatus::from_provider("VOID"), Some(OrderStatus::Failed));
        assert_eq!(OrderStatus::from_provider("settling"), None);
    }

    #[test]
    fn only_success_is_terminal() {
        assert!(OrderStatus::Success.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Failed.is_terminal());
    }
}
