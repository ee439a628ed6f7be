//! Application state
//!
//! Bundles every service over one shared storage handle, for the
//! embedding request layer to hold.

use crate::catalog::CatalogService;
use crate::config::Config;
use crate::customers::CustomerService;
use crate::ledger::{LedgerManager, LedgerResult};
use crate::reports::ReportService;
use crate::storage::ShopStorage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: ShopStorage,
    pub ledger: LedgerManager,
    pub catalog: CatalogService,
    pub customers: CustomerService,
    pub reports: ReportService,
}

impl AppState {
    /// Open the shop database per configuration and wire up the services
    pub fn open(config: &Config) -> LedgerResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let storage = ShopStorage::open(config.db_path())?;
        tracing::info!(path = %config.db_path().display(), "shop storage opened");
        Ok(Self::with_storage(storage))
    }

    /// In-memory state, for tests and demos
    pub fn open_in_memory() -> LedgerResult<Self> {
        Ok(Self::with_storage(ShopStorage::open_in_memory()?))
    }

    fn with_storage(storage: ShopStorage) -> Self {
        Self {
            ledger: LedgerManager::with_storage(storage.clone()),
            catalog: CatalogService::new(storage.clone()),
            customers: CustomerService::new(storage.clone()),
            reports: ReportService::new(storage.clone()),
            storage,
        }
    }
}
