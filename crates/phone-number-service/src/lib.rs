//! Phone Number Service - customer phone number lookup and activation.
//!
//! This service keeps an in-memory registry of phone numbers per customer and
//! exposes it over HTTP:
//! - List every phone number in the system
//! - List the phone numbers owned by a single customer
//! - Activate one of a customer's phone numbers

pub mod api;
pub mod config;
pub mod error;
pub mod registry;

pub use config::Config;
pub use error::{ApiError, RegistryError};
pub use registry::{PhoneNumber, Registry};
