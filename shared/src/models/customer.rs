//! Customer Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer entity
///
/// `total_outstanding` is a materialized aggregate: at every commit it
/// equals the sum of `pending_amount` across the customer's non-cancelled
/// installment orders. It is only ever moved inside the same unit of work
/// that moves the source order records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Favorite colors, fabrics, etc.
    pub preferences: Option<String>,
    pub total_outstanding: Decimal,
    pub last_payment_date: Option<NaiveDate>,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "phone number must not be empty"))]
    pub phone_number: String,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub preferences: Option<String>,
}

/// Update customer payload
///
/// Phone number and the outstanding balance are deliberately absent:
/// the former is an identity field, the latter moves only through order
/// lifecycle events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub preferences: Option<String>,
}
