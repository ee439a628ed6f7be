//! RecordPayment action
//!
//! Appends an immutable payment event and propagates its effect to the
//! order and the customer ledger in the same unit of work.

use super::LifecycleAction;
use crate::ledger::error::{LedgerError, LedgerResult};
use crate::ledger::txn::LifecycleTxn;
use rust_decimal::Decimal;
use shared::models::{Order, OrderStatus};
use shared::request::RecordPaymentRequest;

/// RecordPayment action
#[derive(Debug, Clone)]
pub struct RecordPaymentAction {
    pub request: RecordPaymentRequest,
}

impl LifecycleAction for RecordPaymentAction {
    type Output = Order;

    fn execute(&self, ctx: &mut LifecycleTxn<'_>) -> LedgerResult<Order> {
        let req = &self.request;

        // 1. Guards, all before the first write
        let mut order = ctx.load_order(req.order_id)?;

        if req.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(req.amount));
        }
        if order.status.is_terminal() {
            return Err(LedgerError::OrderInTerminalState {
                order_id: order.id,
                status: order.status,
            });
        }
        // Overpayment is surfaced, never clamped: the caller decides
        if req.amount > order.pending_amount {
            return Err(LedgerError::OverpaymentDetected {
                amount: req.amount,
                pending: order.pending_amount,
            });
        }

        // 2. Append the payment event
        ctx.append_payment(order.id, req.amount, req.method, req.notes.clone())?;

        // 3. Move the order's balance; full settlement delivers the order
        order.paid_amount += req.amount;
        order.recompute_pending();
        if order.is_fully_paid() {
            order.status = OrderStatus::Delivered;
        }
        ctx.store_order(&order)?;

        // 4. The customer owes that much less, as of today
        ctx.adjust_outstanding(order.customer_id, -req.amount)?;
        ctx.touch_last_payment_date(order.customer_id)?;

        tracing::info!(
            order_id = order.id,
            amount = %req.amount,
            method = ?req.method,
            pending = %order.pending_amount,
            status = ?order.status,
            "payment recorded"
        );
        Ok(order)
    }
}
