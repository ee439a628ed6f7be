//! Read-only reporting queries
//!
//! Consumed by reporting collaborators; every query runs against the last
//! committed state and never blocks writers.

use crate::ledger::error::LedgerResult;
use crate::storage::ShopStorage;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::models::{Order, OrderStatus, Payment, PaymentType};

/// Reporting queries over the shop ledger
#[derive(Clone)]
pub struct ReportService {
    storage: ShopStorage,
}

impl ReportService {
    pub fn new(storage: ShopStorage) -> Self {
        Self { storage }
    }

    /// A customer's orders, newest first
    pub fn orders_by_customer(&self, customer_id: u64) -> LedgerResult<Vec<Order>> {
        let mut orders: Vec<_> = self
            .storage
            .list_orders()?
            .into_iter()
            .filter(|o| o.customer_id == customer_id)
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    pub fn orders_by_status(&self, status: OrderStatus) -> LedgerResult<Vec<Order>> {
        Ok(self
            .storage
            .list_orders()?
            .into_iter()
            .filter(|o| o.status == status)
            .collect())
    }

    /// Installment orders still carrying a balance (non-cancelled)
    pub fn pending_installment_orders(&self) -> LedgerResult<Vec<Order>> {
        Ok(self
            .storage
            .list_orders()?
            .into_iter()
            .filter(|o| {
                o.payment_type == PaymentType::Installment
                    && o.status != OrderStatus::Cancelled
                    && o.pending_amount > Decimal::ZERO
            })
            .collect())
    }

    /// Total owed across all open installment orders
    pub fn total_outstanding_amount(&self) -> LedgerResult<Decimal> {
        Ok(self
            .pending_installment_orders()?
            .iter()
            .map(|o| o.pending_amount)
            .sum())
    }

    /// Orders placed today (UTC)
    pub fn todays_orders(&self) -> LedgerResult<Vec<Order>> {
        let today = Utc::now().date_naive();
        Ok(self
            .storage
            .list_orders()?
            .into_iter()
            .filter(|o| o.order_date.date_naive() == today)
            .collect())
    }

    /// An order's payment events, most recent first
    pub fn payments_for_order(&self, order_id: u64) -> LedgerResult<Vec<Payment>> {
        let mut payments = self.storage.payments_for_order(order_id)?;
        payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(payments)
    }
}
