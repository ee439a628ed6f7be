//! Shared types for the saree shop back office
//!
//! Plain data records used across the ledger core and the embedding
//! request layer: entities, status enums, and request payloads.
//! No business logic lives here beyond derived-field helpers.

pub mod models;
pub mod request;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Customer, CustomerCreate, CustomerUpdate, Order, OrderItem, OrderStatus, Payment,
    PaymentMethod, PaymentType, Saree, SareeCreate, SareeUpdate,
};
pub use request::{OrderFieldUpdate, OrderLineRequest, PlaceOrderRequest, RecordPaymentRequest};
