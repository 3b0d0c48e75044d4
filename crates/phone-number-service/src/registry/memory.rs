//! In-memory registry implementation.

use super::{seed_data, CustomerId, PhoneNumber};
use crate::error::RegistryError;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// In-memory customer phone number registry.
///
/// Not synchronized: mutation requires `&mut self`. Callers sharing a
/// registry across tasks wrap it in a lock.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Phone numbers per customer, in insertion order
    customers: BTreeMap<CustomerId, Vec<PhoneNumber>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            customers: BTreeMap::new(),
        }
    }

    /// Create a registry holding the demo dataset.
    pub fn seeded() -> Self {
        let mut registry = Self::new();
        registry.reset();
        registry
    }

    /// Discard all state and reload the demo dataset.
    pub fn reset(&mut self) {
        self.customers = seed_data().into_iter().collect();
    }

    /// Insert or replace a customer's phone numbers.
    pub fn insert_customer(&mut self, customer_id: CustomerId, phone_numbers: Vec<PhoneNumber>) {
        self.customers.insert(customer_id, phone_numbers);
    }

    /// Number of customers known to the registry, including those without numbers.
    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Total number of phone numbers across all customers.
    pub fn number_count(&self) -> usize {
        self.customers.values().map(Vec::len).sum()
    }

    /// All phone numbers across all customers.
    ///
    /// Customers are visited in ascending id order; each customer's numbers
    /// keep their insertion order.
    pub fn get_all_phone_numbers(&self) -> Result<Vec<PhoneNumber>, RegistryError> {
        let all: Vec<PhoneNumber> = self.customers.values().flatten().cloned().collect();

        if all.is_empty() {
            warn!("No phone numbers exist in the registry");
            return Err(RegistryError::NotFound(
                "No numbers exist in the system".into(),
            ));
        }

        debug!(count = all.len(), "Fetched all phone numbers");
        Ok(all)
    }

    /// Phone numbers owned by a customer.
    ///
    /// An unknown customer and a customer with no numbers both yield `NotFound`.
    pub fn get_phone_numbers_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<PhoneNumber>, RegistryError> {
        debug!(customer_id, "Fetching phone numbers for customer");
        self.customer_numbers(customer_id).map(|numbers| numbers.to_vec())
    }

    /// Activate the first of a customer's numbers that equals `phone_number`.
    ///
    /// Later duplicates are left untouched. Fails with `AlreadyActivated`
    /// without mutating anything if the matched entry is already active.
    pub fn activate_phone_number(
        &mut self,
        customer_id: CustomerId,
        phone_number: &str,
    ) -> Result<PhoneNumber, RegistryError> {
        debug!(customer_id, phone_number, "Activating phone number");

        let numbers = self.customer_numbers_mut(customer_id)?;
        let entry = numbers
            .iter_mut()
            .find(|entry| entry.number == phone_number)
            .ok_or_else(|| {
                warn!(customer_id, phone_number, "Phone number not found for customer");
                RegistryError::NotFound(format!(
                    "Phone number not found for customer ID: {}",
                    customer_id
                ))
            })?;

        if entry.is_active {
            warn!(customer_id, phone_number, "Phone number is already active");
            return Err(RegistryError::AlreadyActivated(format!(
                "Phone number {} is already active.",
                phone_number
            )));
        }

        entry.activate();
        Ok(entry.clone())
    }

    fn customer_numbers(&self, customer_id: CustomerId) -> Result<&[PhoneNumber], RegistryError> {
        match self.customers.get(&customer_id) {
            None => Err(customer_not_found(customer_id)),
            Some(numbers) if numbers.is_empty() => Err(no_numbers_for_customer(customer_id)),
            Some(numbers) => Ok(numbers.as_slice()),
        }
    }

    fn customer_numbers_mut(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<&mut Vec<PhoneNumber>, RegistryError> {
        match self.customers.get_mut(&customer_id) {
            None => Err(customer_not_found(customer_id)),
            Some(numbers) if numbers.is_empty() => Err(no_numbers_for_customer(customer_id)),
            Some(numbers) => Ok(numbers),
        }
    }
}

fn customer_not_found(customer_id: CustomerId) -> RegistryError {
    warn!(customer_id, "Customer not found");
    RegistryError::NotFound(format!("Customer not found with ID: {}", customer_id))
}

fn no_numbers_for_customer(customer_id: CustomerId) -> RegistryError {
    warn!(customer_id, "No phone numbers found for customer");
    RegistryError::NotFound(format!(
        "No phone numbers found for customer: {}",
        customer_id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_not_found<T: std::fmt::Debug>(result: Result<T, RegistryError>) {
        assert!(
            matches!(result, Err(RegistryError::NotFound(_))),
            "expected NotFound, got {:?}",
            result
        );
    }

    #[test]
    fn test_get_all_phone_numbers_seeded() {
        let registry = Registry::seeded();
        let all = registry.get_all_phone_numbers().unwrap();

        assert_eq!(all.len(), 3);
        let numbers: Vec<&str> = all.iter().map(|n| n.number.as_str()).collect();
        assert_eq!(numbers, vec!["1234567890", "9876543210", "5555555555"]);
    }

    #[test]
    fn test_get_all_phone_numbers_empty() {
        let mut registry = Registry::new();
        assert_not_found(registry.get_all_phone_numbers());

        registry.insert_customer(7, Vec::new());
        let err = registry.get_all_phone_numbers().unwrap_err();
        assert_eq!(err.to_string(), "No numbers exist in the system");
    }

    #[test]
    fn test_get_phone_numbers_for_customer() {
        let registry = Registry::seeded();
        let numbers = registry.get_phone_numbers_for_customer(1).unwrap();

        assert_eq!(
            numbers,
            vec![PhoneNumber::new("1234567890"), PhoneNumber::new("9876543210")]
        );
    }

    #[test]
    fn test_unknown_customer_not_found() {
        let mut registry = Registry::seeded();

        for customer_id in [-1, 0, 4, 99, i64::MIN, i64::MAX] {
            assert_not_found(registry.get_phone_numbers_for_customer(customer_id));
            assert_not_found(registry.activate_phone_number(customer_id, "1234567890"));
        }

        let err = registry.get_phone_numbers_for_customer(99).unwrap_err();
        assert_eq!(err.to_string(), "Customer not found with ID: 99");
    }

    #[test]
    fn test_empty_customer_indistinguishable_from_unknown() {
        let mut registry = Registry::seeded();

        let empty = registry.get_phone_numbers_for_customer(3).unwrap_err();
        let unknown = registry.get_phone_numbers_for_customer(4).unwrap_err();
        assert!(matches!(empty, RegistryError::NotFound(_)));
        assert!(matches!(unknown, RegistryError::NotFound(_)));
        assert_eq!(empty.to_string(), "No phone numbers found for customer: 3");

        assert_not_found(registry.activate_phone_number(3, "1234567890"));
    }

    #[test]
    fn test_returned_numbers_are_a_copy() {
        let registry = Registry::seeded();
        let mut numbers = registry.get_phone_numbers_for_customer(1).unwrap();
        numbers[0].activate();
        numbers.clear();

        let fresh = registry.get_phone_numbers_for_customer(1).unwrap();
        assert_eq!(fresh.len(), 2);
        assert!(!fresh[0].is_active);
    }

    #[test]
    fn test_activate_phone_number() {
        let mut registry = Registry::seeded();
        let activated = registry.activate_phone_number(1, "1234567890").unwrap();

        assert_eq!(activated.number, "1234567890");
        assert!(activated.is_active);

        let numbers = registry.get_phone_numbers_for_customer(1).unwrap();
        assert!(numbers[0].is_active);
        assert!(!numbers[1].is_active);
    }

    #[test]
    fn test_activate_twice_conflicts() {
        let mut registry = Registry::seeded();
        registry.activate_phone_number(2, "5555555555").unwrap();

        let err = registry.activate_phone_number(2, "5555555555").unwrap_err();
        assert_eq!(
            err,
            RegistryError::AlreadyActivated("Phone number 5555555555 is already active.".into())
        );

        let numbers = registry.get_phone_numbers_for_customer(2).unwrap();
        assert_eq!(numbers, vec![PhoneNumber::active("5555555555")]);
    }

    #[test]
    fn test_activate_unknown_number() {
        let mut registry = Registry::seeded();
        let err = registry.activate_phone_number(1, "0000000000").unwrap_err();

        assert_eq!(
            err,
            RegistryError::NotFound("Phone number not found for customer ID: 1".into())
        );
    }

    #[test]
    fn test_activate_number_owned_by_other_customer() {
        let mut registry = Registry::seeded();
        assert_not_found(registry.activate_phone_number(2, "1234567890"));
        assert!(!registry.get_phone_numbers_for_customer(1).unwrap()[0].is_active);
    }

    #[test]
    fn test_activate_duplicate_only_first() {
        let mut registry = Registry::new();
        registry.insert_customer(5, vec![PhoneNumber::new("123"), PhoneNumber::new("123")]);

        let activated = registry.activate_phone_number(5, "123").unwrap();
        assert!(activated.is_active);

        let numbers = registry.get_phone_numbers_for_customer(5).unwrap();
        assert!(numbers[0].is_active);
        assert!(!numbers[1].is_active);

        // The first entry now blocks the second.
        assert!(matches!(
            registry.activate_phone_number(5, "123"),
            Err(RegistryError::AlreadyActivated(_))
        ));
        assert!(!registry.get_phone_numbers_for_customer(5).unwrap()[1].is_active);
    }

    #[test]
    fn test_exact_match_no_normalization() {
        let mut registry = Registry::seeded();

        assert_not_found(registry.activate_phone_number(1, "1234567890 "));
        assert_not_found(registry.activate_phone_number(1, " 1234567890"));
        assert_not_found(registry.activate_phone_number(1, "123-456-7890"));

        registry.insert_customer(6, vec![PhoneNumber::new("123-456-7890")]);
        assert_not_found(registry.activate_phone_number(6, "1234567890"));
        assert!(registry.activate_phone_number(6, "123-456-7890").is_ok());

        let numbers = registry.get_phone_numbers_for_customer(1).unwrap();
        assert!(numbers.iter().all(|n| !n.is_active));
    }

    #[test]
    fn test_activation_visible_in_all_numbers() {
        let mut registry = Registry::seeded();
        registry.activate_phone_number(1, "9876543210").unwrap();

        let all = registry.get_all_phone_numbers().unwrap();
        let active: Vec<&str> = all
            .iter()
            .filter(|n| n.is_active)
            .map(|n| n.number.as_str())
            .collect();
        assert_eq!(active, vec!["9876543210"]);
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut registry = Registry::seeded();
        registry.activate_phone_number(1, "1234567890").unwrap();
        registry.insert_customer(42, vec![PhoneNumber::new("1")]);

        registry.reset();

        assert_eq!(registry.customer_count(), 3);
        assert_eq!(registry.number_count(), 3);
        assert!(registry
            .get_all_phone_numbers()
            .unwrap()
            .iter()
            .all(|n| !n.is_active));
    }
}
