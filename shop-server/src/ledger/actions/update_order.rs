//! UpdateOrder actions
//!
//! Two entry points mutate an existing order: a direct status overwrite
//! and a partial field update (shipping address / notes / status string).
//! Both lock terminal states: once an order is DELIVERED or CANCELLED its
//! status never changes again. Moving into CANCELLED releases the order's
//! liability and returns its stock, so the customer and catalog ledgers
//! stay consistent without deleting the record.

use super::LifecycleAction;
use crate::ledger::error::{LedgerError, LedgerResult};
use crate::ledger::txn::LifecycleTxn;
use rust_decimal::Decimal;
use shared::models::{Order, OrderStatus};
use shared::request::OrderFieldUpdate;

fn transition_status(
    ctx: &mut LifecycleTxn<'_>,
    order: &mut Order,
    new_status: OrderStatus,
) -> LedgerResult<()> {
    if order.status == new_status {
        return Ok(());
    }
    if order.status.is_terminal() {
        return Err(LedgerError::OrderInTerminalState {
            order_id: order.id,
            status: order.status,
        });
    }
    // DELIVERED locks the order, so a manual transition must not strand an
    // open balance behind the terminal-state guard
    if new_status == OrderStatus::Delivered && order.pending_amount > Decimal::ZERO {
        return Err(LedgerError::Conflict(format!(
            "order {} still has {} pending; record the payment instead of delivering",
            order.id, order.pending_amount
        )));
    }
    if new_status == OrderStatus::Cancelled {
        ctx.release_order_liability(order)?;
    }
    tracing::info!(
        order_id = order.id,
        from = order.status.as_str(),
        to = new_status.as_str(),
        "order status changed"
    );
    order.status = new_status;
    Ok(())
}

/// UpdateOrderStatus action
#[derive(Debug, Clone)]
pub struct UpdateOrderStatusAction {
    pub order_id: u64,
    pub status: OrderStatus,
}

impl LifecycleAction for UpdateOrderStatusAction {
    type Output = Order;

    fn execute(&self, ctx: &mut LifecycleTxn<'_>) -> LedgerResult<Order> {
        let mut order = ctx.load_order(self.order_id)?;
        transition_status(ctx, &mut order, self.status)?;
        ctx.store_order(&order)?;
        Ok(order)
    }
}

/// UpdateOrderFields action
///
/// Only shipping address, notes and status may move through this path;
/// the status arrives as a string and unrecognized values fail before
/// any write.
#[derive(Debug, Clone)]
pub struct UpdateOrderFieldsAction {
    pub order_id: u64,
    pub update: OrderFieldUpdate,
}

impl LifecycleAction for UpdateOrderFieldsAction {
    type Output = Order;

    fn execute(&self, ctx: &mut LifecycleTxn<'_>) -> LedgerResult<Order> {
        // Parse the status up front so a bad string aborts cleanly
        let new_status = self
            .update
            .status
            .as_deref()
            .map(|s| s.parse::<OrderStatus>())
            .transpose()?;

        let mut order = ctx.load_order(self.order_id)?;

        if let Some(status) = new_status {
            transition_status(ctx, &mut order, status)?;
        }
        if let Some(address) = &self.update.shipping_address {
            order.shipping_address = Some(address.clone());
        }
        if let Some(notes) = &self.update.notes {
            order.notes = Some(notes.clone());
        }

        ctx.store_order(&order)?;
        Ok(order)
    }
}
