//! Customer service
//!
//! Customer CRUD plus the collections-oriented queries over the
//! materialized outstanding balance. The balance itself is never mutated
//! here; it only moves inside order lifecycle transactions.

use crate::ledger::error::{LedgerError, LedgerResult};
use crate::storage::{CUSTOMER_ID_KEY, ShopStorage};
use rust_decimal::Decimal;
use shared::models::{Customer, CustomerCreate, CustomerUpdate, OrderStatus};
use validator::Validate;

/// Customer service
#[derive(Clone)]
pub struct CustomerService {
    storage: ShopStorage,
}

impl CustomerService {
    pub fn new(storage: ShopStorage) -> Self {
        Self { storage }
    }

    // ========== CRUD ==========

    /// Register a new customer; phone numbers are unique
    pub fn add_customer(&self, payload: CustomerCreate) -> LedgerResult<Customer> {
        payload
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        // Writers serialize globally, so checking inside the write
        // transaction makes the uniqueness check race-free
        let txn = self.storage.begin_write()?;
        if self
            .storage
            .list_customers_txn(&txn)?
            .iter()
            .any(|c| c.phone_number == payload.phone_number)
        {
            return Err(LedgerError::Conflict(format!(
                "customer with phone number {} already exists",
                payload.phone_number
            )));
        }
        let customer = Customer {
            id: self.storage.next_id(&txn, CUSTOMER_ID_KEY)?,
            name: payload.name,
            phone_number: payload.phone_number,
            email: payload.email,
            address: payload.address,
            date_of_birth: payload.date_of_birth,
            preferences: payload.preferences,
            total_outstanding: Decimal::ZERO,
            last_payment_date: None,
        };
        self.storage.put_customer(&txn, &customer)?;
        txn.commit().map_err(crate::storage::StorageError::from)?;

        tracing::info!(customer_id = customer.id, "customer added");
        Ok(customer)
    }

    /// Update contact fields; identity and balance fields are untouchable
    pub fn update_customer(&self, id: u64, payload: CustomerUpdate) -> LedgerResult<Customer> {
        payload
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let txn = self.storage.begin_write()?;
        let mut customer = self
            .storage
            .get_customer_txn(&txn, id)?
            .ok_or(LedgerError::CustomerNotFound(id))?;

        if let Some(name) = payload.name {
            customer.name = name;
        }
        if let Some(email) = payload.email {
            customer.email = Some(email);
        }
        if let Some(address) = payload.address {
            customer.address = Some(address);
        }
        if let Some(date_of_birth) = payload.date_of_birth {
            customer.date_of_birth = Some(date_of_birth);
        }
        if let Some(preferences) = payload.preferences {
            customer.preferences = Some(preferences);
        }

        self.storage.put_customer(&txn, &customer)?;
        txn.commit().map_err(crate::storage::StorageError::from)?;
        Ok(customer)
    }

    /// Remove a customer and cascade their settled order history
    ///
    /// Refused while any of the customer's orders still carries an open
    /// installment balance; collect or delete those orders first.
    pub fn delete_customer(&self, id: u64) -> LedgerResult<()> {
        let txn = self.storage.begin_write()?;
        let customer = self
            .storage
            .get_customer_txn(&txn, id)?
            .ok_or(LedgerError::CustomerNotFound(id))?;

        let owned: Vec<_> = self
            .storage
            .list_orders()?
            .into_iter()
            .filter(|o| o.customer_id == id)
            .collect();
        if owned.iter().any(|o| {
            o.status != OrderStatus::Cancelled && o.pending_amount > Decimal::ZERO
        }) {
            return Err(LedgerError::Conflict(format!(
                "customer {} still has orders with an open balance",
                id
            )));
        }

        for order in &owned {
            self.storage.remove_payments_for_order(&txn, order.id)?;
            self.storage.remove_order(&txn, order.id)?;
        }
        self.storage.remove_customer(&txn, id)?;
        txn.commit().map_err(crate::storage::StorageError::from)?;

        tracing::info!(
            customer_id = customer.id,
            cascaded_orders = owned.len(),
            "customer deleted"
        );
        Ok(())
    }

    // ========== Reads ==========

    pub fn get_customer(&self, id: u64) -> LedgerResult<Customer> {
        self.storage
            .get_customer(id)?
            .ok_or(LedgerError::CustomerNotFound(id))
    }

    pub fn list_customers(&self) -> LedgerResult<Vec<Customer>> {
        Ok(self.storage.list_customers()?)
    }

    pub fn by_phone(&self, phone_number: &str) -> LedgerResult<Option<Customer>> {
        Ok(self
            .storage
            .list_customers()?
            .into_iter()
            .find(|c| c.phone_number == phone_number))
    }

    /// Name search, case-insensitive contains
    pub fn search_by_name(&self, query: &str) -> LedgerResult<Vec<Customer>> {
        let needle = query.to_lowercase();
        Ok(self
            .storage
            .list_customers()?
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Customers owing more than the threshold, biggest debtor first
    ///
    /// Used for collections and reporting.
    pub fn with_outstanding_above(&self, threshold: Decimal) -> LedgerResult<Vec<Customer>> {
        let mut customers: Vec<_> = self
            .storage
            .list_customers()?
            .into_iter()
            .filter(|c| c.total_outstanding > threshold)
            .collect();
        customers.sort_by(|a, b| b.total_outstanding.cmp(&a.total_outstanding));
        Ok(customers)
    }

    /// All customers, sorted descending by outstanding balance
    pub fn sorted_by_outstanding(&self) -> LedgerResult<Vec<Customer>> {
        let mut customers = self.storage.list_customers()?;
        customers.sort_by(|a, b| b.total_outstanding.cmp(&a.total_outstanding));
        Ok(customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CustomerService {
        CustomerService::new(ShopStorage::open_in_memory().unwrap())
    }

    fn create(name: &str, phone: &str) -> CustomerCreate {
        CustomerCreate {
            name: name.to_string(),
            phone_number: phone.to_string(),
            email: None,
            address: None,
            date_of_birth: None,
            preferences: None,
        }
    }

    #[test]
    fn test_add_starts_with_zero_outstanding() {
        let customers = service();
        let c = customers.add_customer(create("Meera", "9876543210")).unwrap();
        assert_eq!(c.total_outstanding, Decimal::ZERO);
        assert!(c.last_payment_date.is_none());
    }

    #[test]
    fn test_duplicate_phone_rejected() {
        let customers = service();
        customers.add_customer(create("Meera", "9876543210")).unwrap();
        let err = customers
            .add_customer(create("Another Meera", "9876543210"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Conflict(_)));
    }

    #[test]
    fn test_concurrent_same_phone_single_winner() {
        let customers = service();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let customers = customers.clone();
                std::thread::spawn(move || {
                    customers.add_customer(create(&format!("Meera {}", i), "9876543210"))
                })
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(customers.list_customers().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_email_rejected() {
        let customers = service();
        let err = customers
            .add_customer(CustomerCreate {
                email: Some("not-an-email".to_string()),
                ..create("Meera", "9876543210")
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_search_by_name() {
        let customers = service();
        customers.add_customer(create("Meera Iyer", "111")).unwrap();
        customers.add_customer(create("Lakshmi Rao", "222")).unwrap();

        let hits = customers.search_by_name("meera").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].phone_number, "111");
    }

    #[test]
    fn test_update_keeps_identity_fields() {
        let customers = service();
        let c = customers.add_customer(create("Meera", "111")).unwrap();

        let updated = customers
            .update_customer(
                c.id,
                CustomerUpdate {
                    name: Some("Meera Iyer".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Meera Iyer");
        assert_eq!(updated.phone_number, "111");
    }

    #[test]
    fn test_delete_missing_customer() {
        let customers = service();
        assert!(matches!(
            customers.delete_customer(42).unwrap_err(),
            LedgerError::CustomerNotFound(42)
        ));
    }
}
