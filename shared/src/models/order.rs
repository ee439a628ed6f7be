//! Order Model
//!
//! An order exclusively owns its line items (embedded) and its payment
//! events (stored separately, keyed by order id). Line items snapshot the
//! saree's price and description at order time so the historical total
//! stays stable through catalog churn.

use super::Saree;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states cannot be transitioned out of
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Unrecognized order status string
#[derive(Debug, Clone, Error)]
#[error("invalid order status: {0}")]
pub struct InvalidStatus(pub String);

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// Payment mode chosen at order creation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    FullPayment,
    Installment,
}

/// Order line item
///
/// `saree_id` is a weak reference: the live saree may be soft-deleted
/// after the order is placed. The snapshot fields keep the line
/// presentable and the order total stable regardless.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub saree_id: u64,
    /// Title snapshot at order time
    pub title: String,
    pub fabric: Option<String>,
    pub color: Option<String>,
    /// Selling price snapshot at order time, never re-read
    pub unit_price: Decimal,
    pub quantity: u32,
    pub total_price: Decimal,
}

impl OrderItem {
    /// Snapshot a line item from the live saree at order time
    pub fn snapshot(saree: &Saree, quantity: u32) -> Self {
        let unit_price = saree.selling_price;
        Self {
            saree_id: saree.id,
            title: saree.title.clone(),
            fabric: saree.fabric.clone(),
            color: saree.color.clone(),
            unit_price,
            quantity,
            total_price: unit_price * Decimal::from(quantity),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer_id: u64,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub pending_amount: Decimal,
    pub status: OrderStatus,
    pub payment_type: PaymentType,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Sum of line totals, computed server-side only
    pub fn total_from_items(items: &[OrderItem]) -> Decimal {
        items.iter().map(|item| item.total_price).sum()
    }

    /// Recompute the derived pending amount (`total - paid`)
    pub fn recompute_pending(&mut self) {
        self.pending_amount = self.total_amount - self.paid_amount;
    }

    pub fn is_fully_paid(&self) -> bool {
        self.pending_amount <= Decimal::ZERO
    }

    /// `paid + pending == total` must hold after every committed operation
    pub fn amounts_consistent(&self) -> bool {
        self.paid_amount + self.pending_amount == self.total_amount
            && self.paid_amount >= Decimal::ZERO
            && self.pending_amount >= Decimal::ZERO
    }
}
