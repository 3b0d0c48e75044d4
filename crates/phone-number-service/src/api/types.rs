//! API response types other than the phone numbers envelope.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub customers: usize,
    pub phone_numbers: usize,
}
