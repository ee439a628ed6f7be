//! Saree shop back office - ledger core
//!
//! The consistency-critical heart of the shop: orders, installment
//! payments and catalog stock are kept mutually consistent through
//! single-transaction lifecycle events. HTTP routing, authentication and
//! image handling live in the embedding request layer, not here.
//!
//! # Modules
//!
//! - [`storage`]: redb tables and typed accessors
//! - [`ledger`]: lifecycle actions, the unit-of-work boundary, the manager
//! - [`catalog`]: saree CRUD with a version-keyed active-list cache
//! - [`customers`]: customer CRUD and outstanding-balance queries
//! - [`reports`]: read-only queries for reporting collaborators

pub mod catalog;
pub mod config;
pub mod customers;
pub mod ledger;
pub mod logging;
pub mod reports;
pub mod state;
pub mod storage;

// Re-exports
pub use catalog::CatalogService;
pub use config::Config;
pub use customers::CustomerService;
pub use ledger::{ErrorKind, LedgerError, LedgerManager, LedgerResult};
pub use logging::init_logging;
pub use reports::ReportService;
pub use state::AppState;
pub use storage::{ShopStorage, StorageError, StorageResult};
