//! Request payloads consumed by the ledger core
//!
//! The request layer (HTTP, CLI, tests) builds these records; the ledger
//! never trusts client-submitted totals - amounts are recomputed
//! server-side from live catalog prices.

use crate::models::{PaymentMethod, PaymentType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One requested order line: which saree and how many
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub saree_id: u64,
    pub quantity: u32,
}

/// Place order request (both payment modes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_id: u64,
    pub lines: Vec<OrderLineRequest>,
    pub payment_type: PaymentType,
    /// Required semantics only for INSTALLMENT: must satisfy
    /// `0 <= advance <= total`. Ignored for FULL_PAYMENT.
    pub advance_amount: Option<Decimal>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

impl PlaceOrderRequest {
    pub fn full_payment(customer_id: u64, lines: Vec<OrderLineRequest>) -> Self {
        Self {
            customer_id,
            lines,
            payment_type: PaymentType::FullPayment,
            advance_amount: None,
            shipping_address: None,
            notes: None,
        }
    }

    pub fn installment(customer_id: u64, lines: Vec<OrderLineRequest>, advance: Decimal) -> Self {
        Self {
            customer_id,
            lines,
            payment_type: PaymentType::Installment,
            advance_amount: Some(advance),
            shipping_address: None,
            notes: None,
        }
    }
}

/// Record payment request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub order_id: u64,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub notes: Option<String>,
}

/// Partial order update: shipping address, notes and status only
///
/// The status arrives as a string from the request layer and is validated
/// against the enum; anything else on the order is off limits here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFieldUpdate {
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}
