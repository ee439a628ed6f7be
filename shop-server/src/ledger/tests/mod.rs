use super::*;
use crate::state::AppState;
use rust_decimal::Decimal;
use shared::models::{Customer, OrderStatus, PaymentMethod, PaymentType, Saree};
use shared::request::{OrderLineRequest, PlaceOrderRequest, RecordPaymentRequest};

mod test_boundary;

fn state() -> AppState {
    AppState::open_in_memory().unwrap()
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

fn seed_customer(state: &AppState, name: &str, phone: &str) -> Customer {
    state
        .customers
        .add_customer(shared::models::CustomerCreate {
            name: name.to_string(),
            phone_number: phone.to_string(),
            email: None,
            address: None,
            date_of_birth: None,
            preferences: None,
        })
        .unwrap()
}

fn seed_saree(state: &AppState, title: &str, price: i64, stock: u32) -> Saree {
    state
        .catalog
        .add_saree(shared::models::SareeCreate {
            title: title.to_string(),
            fabric: Some("Silk".to_string()),
            color: Some("Red".to_string()),
            description: None,
            selling_price: dec(price),
            cost_price: dec(price) / dec(2),
            stock_quantity: Some(stock),
        })
        .unwrap()
}

fn line(saree_id: u64, quantity: u32) -> OrderLineRequest {
    OrderLineRequest { saree_id, quantity }
}

fn pay(order_id: u64, amount: i64, method: PaymentMethod) -> RecordPaymentRequest {
    RecordPaymentRequest {
        order_id,
        amount: dec(amount),
        method,
        notes: None,
    }
}

/// The core invariant: a customer's materialized outstanding equals the
/// sum of pending amounts over their non-cancelled installment orders.
fn assert_outstanding_invariant(state: &AppState, customer_id: u64) {
    let customer = state.customers.get_customer(customer_id).unwrap();
    let expected: Decimal = state
        .ledger
        .list_orders()
        .unwrap()
        .iter()
        .filter(|o| {
            o.customer_id == customer_id
                && o.payment_type == PaymentType::Installment
                && o.status != OrderStatus::Cancelled
        })
        .map(|o| o.pending_amount)
        .sum();
    assert_eq!(
        customer.total_outstanding, expected,
        "outstanding balance out of sync for customer {}",
        customer_id
    );
}

/// Per-order invariants: amounts consistent, payment events sum to paid
fn assert_order_invariants(state: &AppState, order_id: u64) {
    let order = state.ledger.get_order(order_id).unwrap();
    assert!(
        order.amounts_consistent(),
        "paid + pending != total for order {}",
        order_id
    );
    let payments_total: Decimal = state
        .reports
        .payments_for_order(order_id)
        .unwrap()
        .iter()
        .map(|p| p.amount)
        .sum();
    assert_eq!(
        payments_total, order.paid_amount,
        "payment events out of sync for order {}",
        order_id
    );
}
