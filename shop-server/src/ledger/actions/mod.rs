//! Lifecycle actions
//!
//! One file per lifecycle event. Each action runs inside a single
//! [`LifecycleTxn`] handed to it by the manager; it never commits itself.
//! Validation and not-found checks run before the first write so a failed
//! action leaves nothing behind.

mod delete_order;
mod place_order;
mod record_payment;
mod update_order;

pub use delete_order::DeleteOrderAction;
pub use place_order::PlaceOrderAction;
pub use record_payment::RecordPaymentAction;
pub use update_order::{UpdateOrderFieldsAction, UpdateOrderStatusAction};

use super::error::LedgerResult;
use super::txn::LifecycleTxn;

/// A lifecycle event over the ledger
pub trait LifecycleAction {
    type Output;

    fn execute(&self, ctx: &mut LifecycleTxn<'_>) -> LedgerResult<Self::Output>;
}
