//! PlaceOrder action
//!
//! Creates an order in either payment mode. Totals are computed
//! server-side from live catalog prices; stock is reserved line by line
//! inside the same unit of work, so a failing line aborts the whole order.

use super::LifecycleAction;
use crate::ledger::error::{LedgerError, LedgerResult};
use crate::ledger::txn::LifecycleTxn;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::models::{Order, OrderItem, OrderStatus, PaymentMethod, PaymentType};
use shared::request::PlaceOrderRequest;

/// PlaceOrder action
#[derive(Debug, Clone)]
pub struct PlaceOrderAction {
    pub request: PlaceOrderRequest,
}

impl LifecycleAction for PlaceOrderAction {
    type Output = Order;

    fn execute(&self, ctx: &mut LifecycleTxn<'_>) -> LedgerResult<Order> {
        let req = &self.request;

        // 1. Resolve the customer before touching anything
        let customer = ctx.load_customer(req.customer_id)?;

        if req.lines.is_empty() {
            return Err(LedgerError::Validation(
                "order must contain at least one line".to_string(),
            ));
        }
        for line in &req.lines {
            if line.quantity == 0 {
                return Err(LedgerError::Validation(format!(
                    "quantity for saree {} must be positive",
                    line.saree_id
                )));
            }
        }

        // 2. Reserve stock and snapshot each line at the live selling price
        let mut items = Vec::with_capacity(req.lines.len());
        for line in &req.lines {
            let saree = ctx.reserve_stock(line.saree_id, line.quantity)?;
            items.push(OrderItem::snapshot(&saree, line.quantity));
        }
        let total_amount = Order::total_from_items(&items);

        // 3. Split the total between paid and pending per payment mode
        let (paid_amount, advance) = match req.payment_type {
            PaymentType::FullPayment => (total_amount, None),
            PaymentType::Installment => {
                let advance = req.advance_amount.unwrap_or(Decimal::ZERO);
                if advance < Decimal::ZERO || advance > total_amount {
                    return Err(LedgerError::InvalidAdvanceAmount {
                        advance,
                        total: total_amount,
                    });
                }
                (advance, Some(advance))
            }
        };

        let mut order = Order {
            id: ctx.next_order_id()?,
            customer_id: customer.id,
            order_date: Utc::now(),
            total_amount,
            paid_amount,
            pending_amount: Decimal::ZERO,
            status: OrderStatus::Confirmed,
            payment_type: req.payment_type,
            shipping_address: req.shipping_address.clone(),
            notes: req.notes.clone(),
            items,
        };
        order.recompute_pending();

        // 4. Installment orders add their remainder to the customer's liability
        if order.pending_amount > Decimal::ZERO {
            ctx.adjust_outstanding(customer.id, order.pending_amount)?;
        }

        // 5. Keep the payment ledger in step with paid_amount
        match req.payment_type {
            PaymentType::FullPayment => {
                if total_amount > Decimal::ZERO {
                    ctx.append_payment(order.id, total_amount, PaymentMethod::Cash, None)?;
                }
            }
            PaymentType::Installment => {
                if let Some(advance) = advance
                    && advance > Decimal::ZERO
                {
                    ctx.append_payment(order.id, advance, PaymentMethod::Advance, None)?;
                }
            }
        }

        ctx.store_order(&order)?;

        tracing::info!(
            order_id = order.id,
            customer_id = customer.id,
            total = %order.total_amount,
            pending = %order.pending_amount,
            payment_type = ?order.payment_type,
            "order placed"
        );
        Ok(order)
    }
}
