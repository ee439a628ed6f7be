//! DeleteOrder action
//!
//! Removes an order entirely: the open liability is reversed, line-item
//! stock returns to the catalog, and the order's payment events cascade
//! away with it.

use super::LifecycleAction;
use crate::ledger::error::LedgerResult;
use crate::ledger::txn::LifecycleTxn;
use shared::models::OrderStatus;

/// DeleteOrder action
#[derive(Debug, Clone)]
pub struct DeleteOrderAction {
    pub order_id: u64,
}

impl LifecycleAction for DeleteOrderAction {
    type Output = ();

    fn execute(&self, ctx: &mut LifecycleTxn<'_>) -> LedgerResult<()> {
        let order = ctx.load_order(self.order_id)?;

        // A cancelled order already had its liability and stock released
        if order.status != OrderStatus::Cancelled {
            ctx.release_order_liability(&order)?;
        }
        ctx.remove_order_cascade(order.id)?;

        tracing::info!(
            order_id = order.id,
            customer_id = order.customer_id,
            released = %order.pending_amount,
            "order deleted"
        );
        Ok(())
    }
}
