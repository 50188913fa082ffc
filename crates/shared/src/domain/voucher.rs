use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoucherKind {
    Percentage,
    FixedAmount,
    FreeShipping,
}

/// A discount code as resolved from the catalog. Immutable once looked up;
/// the session keeps a copy until it is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Voucher {
    pub code: String,
    pub kind: VoucherKind,
    pub value: i64,
    pub description: String,
}

/// Output of evaluating a voucher against a cart subtotal. The discount stays
/// fractional until totals are rounded for persistence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub discount: f64,
    pub shipping_cost: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartTotals {
    pub subtotal: i64,
    pub discount: i64,
    pub shipping_cost: i64,
    pub total: i64,
}

/// Resolve a voucher code against the built-in catalog.
pub fn lookup(code: &str) -> Option<Voucher> {
    let normalized = code.trim().to_uppercase();

    let (kind, value, description) = match normalized.as_str() {
        "ONGKIRGRATIS" => (VoucherKind::FreeShipping, 0, "Free shipping"),
        "DISKON10" => (VoucherKind::Percentage, 10, "10% discount"),
        "HEMAT50RB" => (VoucherKind::FixedAmount, 50000, "Rp 50.000 discount"),
        _ => return None,
    };

    Some(Voucher {
        code: normalized,
        kind,
        value,
        description: description.to_string(),
    })
}

/// Pure evaluation: subtotal plus an optional voucher yields a discount and a
/// shipping cost. A fixed-amount voucher is intentionally not clamped to the
/// subtotal, so the resulting total can go negative.
pub fn evaluate(subtotal: i64, voucher: Option<&Voucher>) -> Quote {
    let mut discount = 0.0;
    let mut shipping_cost = 0;

    if let Some(voucher) = voucher {
        match voucher.kind {
            VoucherKind::Percentage => {
                discount = subtotal as f64 * (voucher.value as f64 / 100.0);
            }
            VoucherKind::FixedAmount => {
                discount = voucher.value as f64;
            }
            VoucherKind::FreeShipping => {
                shipping_cost = 0;
            }
        }
    }

    Quote {
        discount,
        shipping_cost,
    }
}

/// Evaluate and round to whole currency units, the form persisted on orders.
pub fn totals(subtotal: i64, voucher: Option<&Voucher>) -> CartTotals {
    let quote = evaluate(subtotal, voucher);
    let total = subtotal as f64 - quote.discount + quote.shipping_cost as f64;

    CartTotals {
        subtotal,
        discount: quote.discount.round() as i64,
        shipping_cost: quote.shipping_cost,
        total: total.round() as i64,
    }
}
