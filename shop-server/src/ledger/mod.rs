//! Order/payment/inventory consistency ledger
//!
//! This module is the heart of the back office: every order lifecycle
//! event must move an order's paid/pending balance, the owning customer's
//! outstanding balance and the catalog's stock counters together or not
//! at all.
//!
//! # Operation Flow
//!
//! ```text
//! place_order / record_payment / delete_order / update_*
//!     |- 1. Begin write transaction (LifecycleTxn)
//!     |- 2. Run the action: guards first, then writes
//!     |- 3. Commit (bumps catalog version when stock moved)
//!     `- 4. Return the committed order snapshot
//! ```
//!
//! A failed action drops the transaction, which aborts it; readers never
//! see a half-applied lifecycle event.

pub mod actions;
pub mod error;
pub mod txn;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, LedgerError, LedgerResult};

use crate::storage::ShopStorage;
use actions::{
    DeleteOrderAction, LifecycleAction, PlaceOrderAction, RecordPaymentAction,
    UpdateOrderFieldsAction, UpdateOrderStatusAction,
};
use shared::models::{Order, OrderStatus};
use shared::request::{OrderFieldUpdate, PlaceOrderRequest, RecordPaymentRequest};
use std::path::Path;
use txn::LifecycleTxn;

/// Ledger manager: runs lifecycle actions against the shop storage
#[derive(Clone)]
pub struct LedgerManager {
    storage: ShopStorage,
}

impl LedgerManager {
    /// Open the ledger at the given database path
    pub fn open(db_path: impl AsRef<Path>) -> LedgerResult<Self> {
        Ok(Self {
            storage: ShopStorage::open(db_path)?,
        })
    }

    /// Create a ledger over existing storage
    pub fn with_storage(storage: ShopStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &ShopStorage {
        &self.storage
    }

    /// Run one action as one unit of work
    fn run<A: LifecycleAction>(&self, action: A) -> LedgerResult<A::Output> {
        let mut ctx = LifecycleTxn::begin(&self.storage)?;
        match action.execute(&mut ctx) {
            Ok(output) => {
                ctx.commit()?;
                Ok(output)
            }
            // Dropping the transaction aborts it; no partial state survives
            Err(err) => Err(err),
        }
    }

    // ========== Lifecycle Operations ==========

    /// Place an order (full payment or installment)
    pub fn place_order(&self, request: PlaceOrderRequest) -> LedgerResult<Order> {
        self.run(PlaceOrderAction { request })
    }

    /// Record a payment against an order
    pub fn record_payment(&self, request: RecordPaymentRequest) -> LedgerResult<Order> {
        self.run(RecordPaymentAction { request })
    }

    /// Delete an order, reversing its liability and restoring stock
    pub fn delete_order(&self, order_id: u64) -> LedgerResult<()> {
        self.run(DeleteOrderAction { order_id })
    }

    /// Overwrite an order's status (terminal states are locked)
    pub fn update_order_status(&self, order_id: u64, status: OrderStatus) -> LedgerResult<Order> {
        self.run(UpdateOrderStatusAction { order_id, status })
    }

    /// Partially update an order: shipping address, notes, status
    pub fn update_order_fields(
        &self,
        order_id: u64,
        update: OrderFieldUpdate,
    ) -> LedgerResult<Order> {
        self.run(UpdateOrderFieldsAction { order_id, update })
    }

    // ========== Reads ==========

    /// Committed snapshot of one order
    pub fn get_order(&self, order_id: u64) -> LedgerResult<Order> {
        self.storage
            .get_order(order_id)?
            .ok_or(LedgerError::OrderNotFound(order_id))
    }

    /// Committed snapshots of all orders
    pub fn list_orders(&self) -> LedgerResult<Vec<Order>> {
        Ok(self.storage.list_orders()?)
    }
}
