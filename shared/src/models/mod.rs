//! Data models
//!
//! Shared between shop-server and the request layer.
//! All IDs are `u64`, allocated from per-entity counters in storage.
//! Monetary fields are `rust_decimal::Decimal`; never floats.

pub mod customer;
pub mod order;
pub mod payment;
pub mod saree;

// Re-exports
pub use customer::*;
pub use order::*;
pub use payment::*;
pub use saree::*;
