use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{as_id, as_number, pass_through_record, Id};

pass_through_record!(Refund);

impl Refund {
    pub fn order_id(&self) -> Option<Id> {
        self.field("orderId").and_then(as_id)
    }

    pub fn amount(&self) -> Option<f64> {
        self.field("amount").and_then(as_number)
    }

    pub fn reason(&self) -> Option<&str> {
        self.field("reason").and_then(Value::as_str)
    }

    /// Passed through as sent by the backend.
    pub fn created_at(&self) -> Option<&str> {
        self.field("createdAt").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundCreate {
    pub order_id: Id,
    pub amount: f64,
    pub reason: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RefundCreate {
    pub fn new(order_id: Id, amount: f64, reason: impl Into<String>) -> Self {
        Self {
            order_id,
            amount,
            reason: reason.into(),
            extra: Map::new(),
        }
    }
}

/// Refunds issued by one cashier between two instants.
///
/// `from` and `to` are sent as given, percent-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CashierDateRange {
    pub cashier_id: Id,
    pub from: String,
    pub to: String,
}

impl CashierDateRange {
    pub fn new(cashier_id: Id, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            cashier_id,
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Sum of refund amounts; a missing amount counts as zero.
pub fn total_amount(refunds: &[Refund]) -> f64 {
    refunds.iter().map(|r| r.amount().unwrap_or(0.0)).sum()
}
