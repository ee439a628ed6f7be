//! Ledger operation errors

use crate::storage::StorageError;
use rust_decimal::Decimal;
use shared::models::{InvalidStatus, OrderStatus};
use thiserror::Error;

/// Errors raised by lifecycle operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Customer not found: {0}")]
    CustomerNotFound(u64),

    #[error("Order not found: {0}")]
    OrderNotFound(u64),

    #[error("Saree not found: {0}")]
    SareeNotFound(u64),

    #[error("Insufficient stock for saree {saree_id}: requested {requested}, available {available}")]
    InsufficientStock {
        saree_id: u64,
        requested: u32,
        available: u32,
    },

    #[error("Invalid advance amount {advance}: must be between 0 and the order total {total}")]
    InvalidAdvanceAmount { advance: Decimal, total: Decimal },

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Overpayment detected: amount {amount} exceeds pending {pending}")]
    OverpaymentDetected { amount: Decimal, pending: Decimal },

    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),

    #[error("Order {order_id} is {status:?}: terminal orders cannot be modified")]
    OrderInTerminalState { order_id: u64, status: OrderStatus },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Stable error classification exposed to the request layer
///
/// NotFound and Validation abort before any write; Conflict aborts the
/// whole unit of work; Internal means the storage transaction itself
/// failed and the caller must take a fresh decision (blind retry of
/// `record_payment` would double-count).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Conflict,
    Internal,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::CustomerNotFound(_)
            | LedgerError::OrderNotFound(_)
            | LedgerError::SareeNotFound(_) => ErrorKind::NotFound,
            LedgerError::InvalidAdvanceAmount { .. }
            | LedgerError::InvalidAmount(_)
            | LedgerError::InvalidStatus(_)
            | LedgerError::OrderInTerminalState { .. }
            | LedgerError::Validation(_) => ErrorKind::Validation,
            LedgerError::InsufficientStock { .. }
            | LedgerError::OverpaymentDetected { .. }
            | LedgerError::Conflict(_) => ErrorKind::Conflict,
            LedgerError::Storage(_) | LedgerError::Io(_) => ErrorKind::Internal,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(LedgerError::OrderNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(
            LedgerError::InsufficientStock {
                saree_id: 1,
                requested: 5,
                available: 2
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            LedgerError::InvalidAmount(Decimal::ZERO).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            LedgerError::OverpaymentDetected {
                amount: Decimal::from(10),
                pending: Decimal::ZERO
            }
            .kind(),
            ErrorKind::Conflict
        );
    }
}
