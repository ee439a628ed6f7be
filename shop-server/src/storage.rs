//! redb-based storage layer for the shop ledger
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `sarees` | `saree_id` | `Saree` | Catalog (soft-delete only) |
//! | `customers` | `customer_id` | `Customer` | Customer ledger |
//! | `orders` | `order_id` | `Order` | Orders with embedded line items |
//! | `payments` | `(order_id, payment_id)` | `Payment` | Append-only payment events |
//! | `counters` | name | `u64` | Id counters + catalog version |
//!
//! # Durability and isolation
//!
//! redb commits are durable as soon as `commit()` returns and use
//! copy-on-write with an atomic pointer swap, so the file is always in a
//! consistent state. Writers serialize globally: two lifecycle events
//! touching the same stock counter cannot interleave. Readers run against
//! the last committed root and never observe a half-applied event.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{Customer, Order, Payment, Saree};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Catalog: key = saree_id, value = JSON-serialized Saree
const SAREES_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("sarees");

/// Customers: key = customer_id, value = JSON-serialized Customer
const CUSTOMERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("customers");

/// Orders: key = order_id, value = JSON-serialized Order (items embedded)
const ORDERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("orders");

/// Payment events: key = (order_id, payment_id), value = JSON-serialized Payment
const PAYMENTS_TABLE: TableDefinition<(u64, u64), &[u8]> = TableDefinition::new("payments");

/// Counters: key = counter name, value = last allocated u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

/// Counter names
pub const SAREE_ID_KEY: &str = "saree_id";
pub const CUSTOMER_ID_KEY: &str = "customer_id";
pub const ORDER_ID_KEY: &str = "order_id";
pub const PAYMENT_ID_KEY: &str = "payment_id";
pub const CATALOG_VERSION_KEY: &str = "catalog_version";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Shop storage backed by redb
#[derive(Clone)]
pub struct ShopStorage {
    db: Arc<Database>,
}

impl ShopStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(SAREES_TABLE)?;
            let _ = write_txn.open_table(CUSTOMERS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(PAYMENTS_TABLE)?;
            let mut counters = write_txn.open_table(COUNTERS_TABLE)?;
            if counters.get(CATALOG_VERSION_KEY)?.is_none() {
                counters.insert(CATALOG_VERSION_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction (one per lifecycle event)
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Counters ==========

    /// Allocate the next id for a counter (within transaction)
    ///
    /// Allocation happens inside the unit of work, so an aborted operation
    /// never leaves a committed row behind; at worst the counter skips.
    pub fn next_id(&self, txn: &WriteTransaction, key: &str) -> StorageResult<u64> {
        let mut table = txn.open_table(COUNTERS_TABLE)?;
        let current = table.get(key)?.map(|guard| guard.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(key, next)?;
        Ok(next)
    }

    /// Bump the catalog version (within transaction)
    ///
    /// Every saree or stock mutation moves this; the catalog cache keys
    /// its snapshot by it.
    pub fn bump_catalog_version(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        self.next_id(txn, CATALOG_VERSION_KEY)
    }

    /// Current catalog version (read-only)
    pub fn catalog_version(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COUNTERS_TABLE)?;
        Ok(table
            .get(CATALOG_VERSION_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    // ========== Saree Operations ==========

    /// Store a saree (within transaction)
    pub fn put_saree(&self, txn: &WriteTransaction, saree: &Saree) -> StorageResult<()> {
        let mut table = txn.open_table(SAREES_TABLE)?;
        let value = serde_json::to_vec(saree)?;
        table.insert(saree.id, value.as_slice())?;
        Ok(())
    }

    /// Get a saree by id (read-only)
    pub fn get_saree(&self, id: u64) -> StorageResult<Option<Saree>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SAREES_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a saree by id (within transaction)
    pub fn get_saree_txn(&self, txn: &WriteTransaction, id: u64) -> StorageResult<Option<Saree>> {
        let table = txn.open_table(SAREES_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all sarees, soft-deleted included (read-only)
    pub fn list_sarees(&self) -> StorageResult<Vec<Saree>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SAREES_TABLE)?;

        let mut sarees = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            sarees.push(serde_json::from_slice(value.value())?);
        }
        Ok(sarees)
    }

    // ========== Customer Operations ==========

    /// Store a customer (within transaction)
    pub fn put_customer(&self, txn: &WriteTransaction, customer: &Customer) -> StorageResult<()> {
        let mut table = txn.open_table(CUSTOMERS_TABLE)?;
        let value = serde_json::to_vec(customer)?;
        table.insert(customer.id, value.as_slice())?;
        Ok(())
    }

    /// Get a customer by id (read-only)
    pub fn get_customer(&self, id: u64) -> StorageResult<Option<Customer>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CUSTOMERS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a customer by id (within transaction)
    pub fn get_customer_txn(
        &self,
        txn: &WriteTransaction,
        id: u64,
    ) -> StorageResult<Option<Customer>> {
        let table = txn.open_table(CUSTOMERS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all customers (within transaction)
    pub fn list_customers_txn(&self, txn: &WriteTransaction) -> StorageResult<Vec<Customer>> {
        let table = txn.open_table(CUSTOMERS_TABLE)?;

        let mut customers = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            customers.push(serde_json::from_slice(value.value())?);
        }
        Ok(customers)
    }

    /// Remove a customer (within transaction)
    pub fn remove_customer(&self, txn: &WriteTransaction, id: u64) -> StorageResult<()> {
        let mut table = txn.open_table(CUSTOMERS_TABLE)?;
        table.remove(id)?;
        Ok(())
    }

    /// Get all customers (read-only)
    pub fn list_customers(&self) -> StorageResult<Vec<Customer>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CUSTOMERS_TABLE)?;

        let mut customers = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            customers.push(serde_json::from_slice(value.value())?);
        }
        Ok(customers)
    }

    // ========== Order Operations ==========

    /// Store an order (within transaction)
    pub fn put_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id, value.as_slice())?;
        Ok(())
    }

    /// Get an order by id (read-only)
    pub fn get_order(&self, id: u64) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get an order by id (within transaction)
    pub fn get_order_txn(&self, txn: &WriteTransaction, id: u64) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Remove an order row (within transaction)
    ///
    /// Callers cascade the payment rows separately via
    /// [`remove_payments_for_order`].
    pub fn remove_order(&self, txn: &WriteTransaction, id: u64) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        table.remove(id)?;
        Ok(())
    }

    /// Get all orders (read-only)
    pub fn list_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    // ========== Payment Operations ==========

    /// Append a payment event (within transaction)
    pub fn append_payment(&self, txn: &WriteTransaction, payment: &Payment) -> StorageResult<()> {
        let mut table = txn.open_table(PAYMENTS_TABLE)?;
        let key = (payment.order_id, payment.id);
        let value = serde_json::to_vec(payment)?;
        table.insert(key, value.as_slice())?;
        Ok(())
    }

    /// Get all payment events for an order, oldest first (read-only)
    pub fn payments_for_order(&self, order_id: u64) -> StorageResult<Vec<Payment>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PAYMENTS_TABLE)?;

        let mut payments = Vec::new();
        let range_start = (order_id, 0u64);
        let range_end = (order_id, u64::MAX);
        for result in table.range(range_start..=range_end)? {
            let (_key, value) = result?;
            payments.push(serde_json::from_slice::<Payment>(value.value())?);
        }
        payments.sort_by_key(|p| p.id);
        Ok(payments)
    }

    /// Remove every payment event of an order (within transaction)
    pub fn remove_payments_for_order(
        &self,
        txn: &WriteTransaction,
        order_id: u64,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(PAYMENTS_TABLE)?;

        let range_start = (order_id, 0u64);
        let range_end = (order_id, u64::MAX);
        let keys: Vec<(u64, u64)> = table
            .range(range_start..=range_end)?
            .map(|result| result.map(|(key, _)| key.value()))
            .collect::<Result<_, _>>()?;
        for key in keys {
            table.remove(key)?;
        }
        Ok(())
    }
}
