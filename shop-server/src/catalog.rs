//! Catalog service
//!
//! Saree CRUD plus the cached "all active sarees" read. Sarees are only
//! ever soft-deleted so historic order lines stay resolvable.
//!
//! # Caching
//!
//! The active list is a read-through cache keyed by the storage-side
//! catalog version counter. Every saree or stock write (including the
//! stock moves inside order lifecycle events) bumps the counter in the
//! same transaction, so a version match guarantees the cached list is
//! current and no explicit invalidation hooks are needed.

use crate::ledger::error::{LedgerError, LedgerResult};
use crate::storage::{SAREE_ID_KEY, ShopStorage};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{Saree, SareeCreate, SareeUpdate};
use std::sync::Arc;
use validator::Validate;

/// Catalog service with a version-keyed active-list cache
#[derive(Clone)]
pub struct CatalogService {
    storage: ShopStorage,
    /// (catalog_version, active sarees at that version)
    active_cache: Arc<RwLock<Option<(u64, Arc<Vec<Saree>>)>>>,
}

impl CatalogService {
    pub fn new(storage: ShopStorage) -> Self {
        Self {
            storage,
            active_cache: Arc::new(RwLock::new(None)),
        }
    }

    // ========== CRUD ==========

    /// Add a new saree to the catalog
    pub fn add_saree(&self, payload: SareeCreate) -> LedgerResult<Saree> {
        payload
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        if payload.selling_price < Decimal::ZERO || payload.cost_price < Decimal::ZERO {
            return Err(LedgerError::Validation(
                "prices must be non-negative".to_string(),
            ));
        }
        if payload.selling_price <= payload.cost_price {
            return Err(LedgerError::Validation(
                "selling price must be greater than cost price".to_string(),
            ));
        }

        let txn = self.storage.begin_write()?;
        let saree = Saree {
            id: self.storage.next_id(&txn, SAREE_ID_KEY)?,
            title: payload.title,
            fabric: payload.fabric,
            color: payload.color,
            description: payload.description,
            selling_price: payload.selling_price,
            cost_price: payload.cost_price,
            stock_quantity: payload.stock_quantity.unwrap_or(0),
            deleted: false,
        };
        self.storage.put_saree(&txn, &saree)?;
        self.storage.bump_catalog_version(&txn)?;
        txn.commit().map_err(crate::storage::StorageError::from)?;

        tracing::info!(saree_id = saree.id, title = %saree.title, "saree added");
        Ok(saree)
    }

    /// Update an existing saree
    pub fn update_saree(&self, id: u64, payload: SareeUpdate) -> LedgerResult<Saree> {
        let txn = self.storage.begin_write()?;
        let mut saree = self
            .storage
            .get_saree_txn(&txn, id)?
            .ok_or(LedgerError::SareeNotFound(id))?;

        if let Some(title) = payload.title {
            saree.title = title;
        }
        if let Some(fabric) = payload.fabric {
            saree.fabric = Some(fabric);
        }
        if let Some(color) = payload.color {
            saree.color = Some(color);
        }
        if let Some(description) = payload.description {
            saree.description = Some(description);
        }
        if let Some(selling_price) = payload.selling_price {
            saree.selling_price = selling_price;
        }
        if let Some(cost_price) = payload.cost_price {
            saree.cost_price = cost_price;
        }
        if let Some(stock_quantity) = payload.stock_quantity {
            saree.stock_quantity = stock_quantity;
        }

        self.storage.put_saree(&txn, &saree)?;
        self.storage.bump_catalog_version(&txn)?;
        txn.commit().map_err(crate::storage::StorageError::from)?;
        Ok(saree)
    }

    /// Soft-delete a saree: unavailable for new orders, retained for history
    pub fn soft_delete_saree(&self, id: u64) -> LedgerResult<()> {
        let txn = self.storage.begin_write()?;
        let mut saree = self
            .storage
            .get_saree_txn(&txn, id)?
            .ok_or(LedgerError::SareeNotFound(id))?;
        saree.deleted = true;
        self.storage.put_saree(&txn, &saree)?;
        self.storage.bump_catalog_version(&txn)?;
        txn.commit().map_err(crate::storage::StorageError::from)?;

        tracing::info!(saree_id = id, "saree soft-deleted");
        Ok(())
    }

    /// Get a saree by id, soft-deleted included
    pub fn get_saree(&self, id: u64) -> LedgerResult<Saree> {
        self.storage
            .get_saree(id)?
            .ok_or(LedgerError::SareeNotFound(id))
    }

    // ========== Reads ==========

    /// All active (non-deleted) sarees, served from cache when current
    pub fn list_active(&self) -> LedgerResult<Arc<Vec<Saree>>> {
        let version = self.storage.catalog_version()?;

        if let Some((cached_version, sarees)) = self.active_cache.read().as_ref()
            && *cached_version == version
        {
            return Ok(Arc::clone(sarees));
        }

        tracing::debug!(version, "catalog cache miss; reloading active sarees");
        let sarees: Arc<Vec<Saree>> = Arc::new(
            self.storage
                .list_sarees()?
                .into_iter()
                .filter(|s| !s.deleted)
                .collect(),
        );
        *self.active_cache.write() = Some((version, Arc::clone(&sarees)));
        Ok(sarees)
    }

    /// Active sarees whose fabric contains the query (case-insensitive)
    pub fn search_by_fabric(&self, query: &str) -> LedgerResult<Vec<Saree>> {
        let needle = query.to_lowercase();
        Ok(self
            .list_active()?
            .iter()
            .filter(|s| {
                s.fabric
                    .as_deref()
                    .is_some_and(|f| f.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    /// Active sarees whose color contains the query (case-insensitive)
    pub fn search_by_color(&self, query: &str) -> LedgerResult<Vec<Saree>> {
        let needle = query.to_lowercase();
        Ok(self
            .list_active()?
            .iter()
            .filter(|s| {
                s.color
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    /// Active sarees with stock below the threshold (restock alerts)
    pub fn low_stock(&self, threshold: u32) -> LedgerResult<Vec<Saree>> {
        Ok(self
            .list_active()?
            .iter()
            .filter(|s| s.stock_quantity < threshold)
            .cloned()
            .collect())
    }

    /// Active sarees priced within the inclusive range
    pub fn price_between(&self, min: Decimal, max: Decimal) -> LedgerResult<Vec<Saree>> {
        Ok(self
            .list_active()?
            .iter()
            .filter(|s| s.selling_price >= min && s.selling_price <= max)
            .cloned()
            .collect())
    }
}
