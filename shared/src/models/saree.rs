//! Saree Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Saree entity
///
/// Sarees are never physically deleted. `deleted` marks them unavailable
/// for new orders while historic order line items stay resolvable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saree {
    pub id: u64,
    pub title: String,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub selling_price: Decimal,
    pub cost_price: Decimal,
    pub stock_quantity: u32,
    pub deleted: bool,
}

impl Saree {
    /// A saree is orderable when it is not soft-deleted
    pub fn is_orderable(&self) -> bool {
        !self.deleted
    }
}

/// Create saree payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SareeCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub selling_price: Decimal,
    pub cost_price: Decimal,
    pub stock_quantity: Option<u32>,
}

/// Update saree payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SareeUpdate {
    pub title: Option<String>,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub selling_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub stock_quantity: Option<u32>,
}
