//! Lifecycle unit of work
//!
//! [`LifecycleTxn`] is the consistency coordinator: one instance wraps one
//! redb write transaction and carries every cross-entity helper a lifecycle
//! action needs. All writes of one lifecycle event go through the same
//! instance and commit or abort together; no intermediate state is visible
//! to concurrent readers.

use super::error::{LedgerError, LedgerResult};
use crate::storage::{ORDER_ID_KEY, PAYMENT_ID_KEY, ShopStorage};
use chrono::Utc;
use redb::WriteTransaction;
use rust_decimal::Decimal;
use shared::models::{Customer, Order, Payment, PaymentMethod, Saree};

/// One unit of work over the shop ledger
pub struct LifecycleTxn<'a> {
    storage: &'a ShopStorage,
    txn: WriteTransaction,
    /// Set when any stock counter moved; commit bumps the catalog version
    stock_moved: bool,
}

impl<'a> LifecycleTxn<'a> {
    pub fn begin(storage: &'a ShopStorage) -> LedgerResult<Self> {
        Ok(Self {
            txn: storage.begin_write()?,
            storage,
            stock_moved: false,
        })
    }

    /// Commit every write of this lifecycle event atomically
    pub fn commit(self) -> LedgerResult<()> {
        if self.stock_moved {
            self.storage.bump_catalog_version(&self.txn)?;
        }
        self.txn
            .commit()
            .map_err(crate::storage::StorageError::from)?;
        Ok(())
    }

    // ========== Id Allocation ==========

    pub fn next_order_id(&self) -> LedgerResult<u64> {
        Ok(self.storage.next_id(&self.txn, ORDER_ID_KEY)?)
    }

    pub fn next_payment_id(&self) -> LedgerResult<u64> {
        Ok(self.storage.next_id(&self.txn, PAYMENT_ID_KEY)?)
    }

    // ========== Orders ==========

    pub fn load_order(&self, order_id: u64) -> LedgerResult<Order> {
        self.storage
            .get_order_txn(&self.txn, order_id)?
            .ok_or(LedgerError::OrderNotFound(order_id))
    }

    pub fn store_order(&self, order: &Order) -> LedgerResult<()> {
        debug_assert!(order.amounts_consistent());
        Ok(self.storage.put_order(&self.txn, order)?)
    }

    /// Remove the order and cascade-remove its payment events
    pub fn remove_order_cascade(&self, order_id: u64) -> LedgerResult<()> {
        self.storage.remove_payments_for_order(&self.txn, order_id)?;
        self.storage.remove_order(&self.txn, order_id)?;
        Ok(())
    }

    // ========== Customers ==========

    pub fn load_customer(&self, customer_id: u64) -> LedgerResult<Customer> {
        self.storage
            .get_customer_txn(&self.txn, customer_id)?
            .ok_or(LedgerError::CustomerNotFound(customer_id))
    }

    pub fn store_customer(&self, customer: &Customer) -> LedgerResult<()> {
        Ok(self.storage.put_customer(&self.txn, customer)?)
    }

    /// Adjust the customer's materialized outstanding balance by `delta`
    ///
    /// The balance must never go negative; a caller asking for that has a
    /// bug, so the value is clamped to zero and the inconsistency logged.
    pub fn adjust_outstanding(&self, customer_id: u64, delta: Decimal) -> LedgerResult<Customer> {
        let mut customer = self.load_customer(customer_id)?;
        let adjusted = customer.total_outstanding + delta;
        if adjusted < Decimal::ZERO {
            tracing::warn!(
                customer_id,
                outstanding = %customer.total_outstanding,
                delta = %delta,
                "outstanding balance would go negative; clamping to zero"
            );
            customer.total_outstanding = Decimal::ZERO;
        } else {
            customer.total_outstanding = adjusted;
        }
        self.store_customer(&customer)?;
        Ok(customer)
    }

    /// Record that the customer paid something today
    pub fn touch_last_payment_date(&self, customer_id: u64) -> LedgerResult<()> {
        let mut customer = self.load_customer(customer_id)?;
        customer.last_payment_date = Some(Utc::now().date_naive());
        self.store_customer(&customer)
    }

    // ========== Catalog / Stock ==========

    pub fn load_saree(&self, saree_id: u64) -> LedgerResult<Saree> {
        self.storage
            .get_saree_txn(&self.txn, saree_id)?
            .ok_or(LedgerError::SareeNotFound(saree_id))
    }

    pub fn store_saree(&mut self, saree: &Saree) -> LedgerResult<()> {
        // Any catalog write invalidates cached reads
        self.stock_moved = true;
        Ok(self.storage.put_saree(&self.txn, saree)?)
    }

    /// Atomic check-and-decrement of a saree's stock counter
    ///
    /// Fails with `SareeNotFound` when the saree is absent or soft-deleted,
    /// and with `InsufficientStock` when fewer than `quantity` units remain.
    /// Returns the saree as it was before the decrement so callers can
    /// snapshot price and description.
    pub fn reserve_stock(&mut self, saree_id: u64, quantity: u32) -> LedgerResult<Saree> {
        let saree = self.load_saree(saree_id)?;
        if !saree.is_orderable() {
            return Err(LedgerError::SareeNotFound(saree_id));
        }
        if quantity > saree.stock_quantity {
            return Err(LedgerError::InsufficientStock {
                saree_id,
                requested: quantity,
                available: saree.stock_quantity,
            });
        }
        let mut updated = saree.clone();
        updated.stock_quantity -= quantity;
        self.store_saree(&updated)?;
        Ok(saree)
    }

    /// Return `quantity` units to stock
    ///
    /// Used on order deletion and cancellation. Sarees are only ever
    /// soft-deleted, so the counter is restored even on a delisted saree;
    /// a dangling reference is skipped silently (historic data).
    pub fn release_stock(&mut self, saree_id: u64, quantity: u32) -> LedgerResult<()> {
        match self.storage.get_saree_txn(&self.txn, saree_id)? {
            Some(mut saree) => {
                saree.stock_quantity += quantity;
                self.store_saree(&saree)
            }
            None => {
                tracing::debug!(saree_id, quantity, "stock release skipped: saree gone");
                Ok(())
            }
        }
    }

    // ========== Payments ==========

    /// Append an immutable payment event against an order
    pub fn append_payment(
        &self,
        order_id: u64,
        amount: Decimal,
        method: PaymentMethod,
        notes: Option<String>,
    ) -> LedgerResult<Payment> {
        let payment = Payment {
            id: self.next_payment_id()?,
            order_id,
            amount,
            payment_date: Utc::now(),
            method,
            notes,
        };
        self.storage.append_payment(&self.txn, &payment)?;
        Ok(payment)
    }

    // ========== Liability Release ==========

    /// Reverse an order's open liability and give its stock back
    ///
    /// Shared by deletion and cancellation: the customer's outstanding drops
    /// by the order's pending amount and every line item's quantity returns
    /// to stock. The order record itself is left to the caller.
    pub fn release_order_liability(&mut self, order: &Order) -> LedgerResult<()> {
        if order.pending_amount > Decimal::ZERO {
            self.adjust_outstanding(order.customer_id, -order.pending_amount)?;
        }
        for item in &order.items {
            self.release_stock(item.saree_id, item.quantity)?;
        }
        Ok(())
    }
}
