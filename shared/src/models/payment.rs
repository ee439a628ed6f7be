//! Payment Model
//!
//! Payment events are append-only: once recorded they are never mutated.
//! The only way a payment row disappears is the cascade when its owning
//! order is removed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Online,
    Card,
    /// Initial partial payment made at installment-order creation
    Advance,
}

/// Immutable payment event against an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub order_id: u64,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub method: PaymentMethod,
    pub notes: Option<String>,
}
