use super::*;
use shared::request::OrderFieldUpdate;

#[test]
fn test_insufficient_stock_leaves_no_partial_state() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let a = seed_saree(&state, "A", 100, 5);
    let b = seed_saree(&state, "B", 200, 1);

    // First line is reservable, second is not: the whole order must abort
    let err = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(a.id, 2), line(b.id, 3)],
            dec(0),
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InsufficientStock {
            requested: 3,
            available: 1,
            ..
        }
    ));

    // Nothing moved: stock, orders, outstanding all untouched
    assert_eq!(state.catalog.get_saree(a.id).unwrap().stock_quantity, 5);
    assert_eq!(state.catalog.get_saree(b.id).unwrap().stock_quantity, 1);
    assert!(state.ledger.list_orders().unwrap().is_empty());
    assert_eq!(
        state
            .customers
            .get_customer(customer.id)
            .unwrap()
            .total_outstanding,
        dec(0)
    );
}

#[test]
fn test_place_order_for_unknown_customer() {
    let state = state();
    let saree = seed_saree(&state, "A", 100, 5);

    let err = state
        .ledger
        .place_order(PlaceOrderRequest::full_payment(99, vec![line(saree.id, 1)]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::CustomerNotFound(99)));
    assert_eq!(state.catalog.get_saree(saree.id).unwrap().stock_quantity, 5);
}

#[test]
fn test_place_order_for_unknown_or_delisted_saree() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");

    let err = state
        .ledger
        .place_order(PlaceOrderRequest::full_payment(customer.id, vec![line(42, 1)]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::SareeNotFound(42)));

    // A soft-deleted saree is not orderable either
    let saree = seed_saree(&state, "A", 100, 5);
    state.catalog.soft_delete_saree(saree.id).unwrap();
    let err = state
        .ledger
        .place_order(PlaceOrderRequest::full_payment(
            customer.id,
            vec![line(saree.id, 1)],
        ))
        .unwrap_err();
    assert!(matches!(err, LedgerError::SareeNotFound(_)));
}

#[test]
fn test_empty_and_zero_quantity_lines_rejected() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "A", 100, 5);

    let err = state
        .ledger
        .place_order(PlaceOrderRequest::full_payment(customer.id, vec![]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let err = state
        .ledger
        .place_order(PlaceOrderRequest::full_payment(
            customer.id,
            vec![line(saree.id, 0)],
        ))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(state.catalog.get_saree(saree.id).unwrap().stock_quantity, 5);
}

#[test]
fn test_advance_out_of_bounds() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "A", 1000, 5);

    let err = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(saree.id, 1)],
            dec(1001),
        ))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAdvanceAmount { .. }));

    let err = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(saree.id, 1)],
            dec(-1),
        ))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAdvanceAmount { .. }));

    // The aborted attempts must not have burned stock
    assert_eq!(state.catalog.get_saree(saree.id).unwrap().stock_quantity, 5);
}

#[test]
fn test_payment_guards() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "A", 1000, 5);
    let order = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(saree.id, 1)],
            dec(300),
        ))
        .unwrap();

    assert!(matches!(
        state
            .ledger
            .record_payment(pay(99, 100, PaymentMethod::Cash))
            .unwrap_err(),
        LedgerError::OrderNotFound(99)
    ));
    assert!(matches!(
        state
            .ledger
            .record_payment(pay(order.id, 0, PaymentMethod::Cash))
            .unwrap_err(),
        LedgerError::InvalidAmount(_)
    ));
    assert!(matches!(
        state
            .ledger
            .record_payment(pay(order.id, -50, PaymentMethod::Cash))
            .unwrap_err(),
        LedgerError::InvalidAmount(_)
    ));
}

#[test]
fn test_overpayment_surfaced_without_side_effects() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "A", 1000, 5);
    let order = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(saree.id, 1)],
            dec(300),
        ))
        .unwrap();

    let err = state
        .ledger
        .record_payment(pay(order.id, 800, PaymentMethod::Cash))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::OverpaymentDetected { .. }
    ));

    // No clamping, no partial write: the order and ledger are untouched
    let reloaded = state.ledger.get_order(order.id).unwrap();
    assert_eq!(reloaded.paid_amount, dec(300));
    assert_eq!(reloaded.pending_amount, dec(700));
    assert_eq!(state.reports.payments_for_order(order.id).unwrap().len(), 1);
    assert_eq!(
        state
            .customers
            .get_customer(customer.id)
            .unwrap()
            .total_outstanding,
        dec(700)
    );

    // A full-payment order has nothing pending, so any payment overpays
    let full = state
        .ledger
        .place_order(PlaceOrderRequest::full_payment(
            customer.id,
            vec![line(saree.id, 1)],
        ))
        .unwrap();
    assert!(matches!(
        state
            .ledger
            .record_payment(pay(full.id, 1, PaymentMethod::Cash))
            .unwrap_err(),
        LedgerError::OverpaymentDetected { .. }
    ));
}

#[test]
fn test_terminal_states_are_locked() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "A", 500, 5);
    let order = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(saree.id, 1)],
            dec(0),
        ))
        .unwrap();

    // Settle fully: the recorder delivers the order
    state
        .ledger
        .record_payment(pay(order.id, 500, PaymentMethod::Cash))
        .unwrap();

    // Neither status path may reopen it
    assert!(matches!(
        state
            .ledger
            .update_order_status(order.id, OrderStatus::Confirmed)
            .unwrap_err(),
        LedgerError::OrderInTerminalState { .. }
    ));
    assert!(matches!(
        state
            .ledger
            .update_order_fields(
                order.id,
                OrderFieldUpdate {
                    status: Some("PENDING".to_string()),
                    ..Default::default()
                }
            )
            .unwrap_err(),
        LedgerError::OrderInTerminalState { .. }
    ));

    // Payments against a delivered order are refused outright
    assert!(matches!(
        state
            .ledger
            .record_payment(pay(order.id, 1, PaymentMethod::Cash))
            .unwrap_err(),
        LedgerError::OrderInTerminalState { .. }
    ));
}

#[test]
fn test_manual_delivery_requires_settlement() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "A", 1000, 5);
    let order = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(saree.id, 1)],
            dec(300),
        ))
        .unwrap();

    // DELIVERED would lock the order with 700 still owed; both paths refuse
    assert!(matches!(
        state
            .ledger
            .update_order_status(order.id, OrderStatus::Delivered)
            .unwrap_err(),
        LedgerError::Conflict(_)
    ));
    assert!(matches!(
        state
            .ledger
            .update_order_fields(
                order.id,
                OrderFieldUpdate {
                    status: Some("DELIVERED".to_string()),
                    ..Default::default()
                }
            )
            .unwrap_err(),
        LedgerError::Conflict(_)
    ));

    // The balance stays collectable; settling delivers as usual
    let updated = state
        .ledger
        .record_payment(pay(order.id, 700, PaymentMethod::Cash))
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Delivered);
    assert_outstanding_invariant(&state, customer.id);
}

#[test]
fn test_update_fields_validates_status_string() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "A", 500, 5);
    let order = state
        .ledger
        .place_order(PlaceOrderRequest::full_payment(
            customer.id,
            vec![line(saree.id, 1)],
        ))
        .unwrap();

    let err = state
        .ledger
        .update_order_fields(
            order.id,
            OrderFieldUpdate {
                status: Some("SHIPPED".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidStatus(_)));

    // Lowercase spellings of real statuses are accepted
    let updated = state
        .ledger
        .update_order_fields(
            order.id,
            OrderFieldUpdate {
                shipping_address: Some("12 Temple Street".to_string()),
                notes: Some("gift wrap".to_string()),
                status: Some("delivered".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Delivered);
    assert_eq!(updated.shipping_address.as_deref(), Some("12 Temple Street"));
    assert_eq!(updated.notes.as_deref(), Some("gift wrap"));
}

#[test]
fn test_cancellation_releases_liability_once() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "A", 1000, 5);
    let order = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(saree.id, 2)],
            dec(500),
        ))
        .unwrap();
    assert_eq!(state.catalog.get_saree(saree.id).unwrap().stock_quantity, 3);

    let cancelled = state
        .ledger
        .update_order_status(order.id, OrderStatus::Cancelled)
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // Liability reversed and stock returned, record retained
    assert_eq!(
        state
            .customers
            .get_customer(customer.id)
            .unwrap()
            .total_outstanding,
        dec(0)
    );
    assert_eq!(state.catalog.get_saree(saree.id).unwrap().stock_quantity, 5);
    assert_outstanding_invariant(&state, customer.id);

    // Deleting the cancelled order must not release anything twice
    state.ledger.delete_order(order.id).unwrap();
    assert_eq!(
        state
            .customers
            .get_customer(customer.id)
            .unwrap()
            .total_outstanding,
        dec(0)
    );
    assert_eq!(state.catalog.get_saree(saree.id).unwrap().stock_quantity, 5);
}

#[test]
fn test_delete_unknown_order() {
    let state = state();
    assert!(matches!(
        state.ledger.delete_order(7).unwrap_err(),
        LedgerError::OrderNotFound(7)
    ));
}

#[test]
fn test_historic_items_survive_catalog_churn() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "Heritage Weave", 2000, 4);
    let order = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(saree.id, 1)],
            dec(500),
        ))
        .unwrap();

    // The catalog moves on: delisted and repriced
    state.catalog.soft_delete_saree(saree.id).unwrap();
    state
        .catalog
        .update_saree(
            saree.id,
            shared::models::SareeUpdate {
                selling_price: Some(dec(9999)),
                ..Default::default()
            },
        )
        .unwrap();

    // The order still shows the original snapshot
    let reloaded = state.ledger.get_order(order.id).unwrap();
    assert_eq!(reloaded.items[0].title, "Heritage Weave");
    assert_eq!(reloaded.items[0].unit_price, dec(2000));
    assert_eq!(reloaded.total_amount, dec(2000));

    // Deletion restores stock onto the delisted saree
    state.ledger.delete_order(order.id).unwrap();
    assert_eq!(state.catalog.get_saree(saree.id).unwrap().stock_quantity, 4);
}

#[test]
fn test_delete_customer_with_open_balance_refused() {
    let state = state();
    let customer = seed_customer(&state, "Meera", "111");
    let saree = seed_saree(&state, "A", 1000, 5);
    let order = state
        .ledger
        .place_order(PlaceOrderRequest::installment(
            customer.id,
            vec![line(saree.id, 1)],
            dec(300),
        ))
        .unwrap();

    assert!(matches!(
        state.customers.delete_customer(customer.id).unwrap_err(),
        LedgerError::Conflict(_)
    ));

    // Once settled, the customer and their history can go
    state
        .ledger
        .record_payment(pay(order.id, 700, PaymentMethod::Cash))
        .unwrap();
    state.customers.delete_customer(customer.id).unwrap();
    assert!(state.ledger.list_orders().unwrap().is_empty());
    assert!(state.reports.payments_for_order(order.id).unwrap().is_empty());
}
