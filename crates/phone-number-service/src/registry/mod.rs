//! Customer phone number registry.

mod memory;

pub use memory::Registry;

use serde::{Deserialize, Serialize};

/// Customer identifier.
pub type CustomerId = i64;

/// A phone number owned by a customer.
///
/// The number is an opaque string. It is compared by exact equality with no
/// normalization, so `"123-456-7890"` and `"1234567890"` are different numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    /// The phone number as stored
    pub number: String,

    /// Whether the number has been activated
    #[serde(default)]
    pub is_active: bool,
}

impl PhoneNumber {
    /// Create a new inactive phone number.
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            is_active: false,
        }
    }

    /// Create a phone number that is already active.
    pub fn active(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            is_active: true,
        }
    }

    /// Mark the number as active.
    pub fn activate(&mut self) {
        self.is_active = true;
    }
}

/// Demo dataset loaded at service start.
///
/// Customer 1 owns two inactive numbers, customer 2 owns one and customer 3
/// exists without any numbers.
pub fn seed_data() -> Vec<(CustomerId, Vec<PhoneNumber>)> {
    vec![
        (
            1,
            vec![PhoneNumber::new("1234567890"), PhoneNumber::new("9876543210")],
        ),
        (2, vec![PhoneNumber::new("5555555555")]),
        (3, Vec::new()),
    ]
}
