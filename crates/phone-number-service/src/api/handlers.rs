//! HTTP request handlers.

use super::envelope::{
    PhoneNumbersResponse, ALL_PHONE_NUMBERS_PATH, CUSTOMER_PHONE_NUMBERS_PATH,
    CUSTOMER_PHONE_NUMBER_PATH,
};
use super::types::HealthResponse;
use super::AppState;
use crate::error::ApiError;
use crate::registry::CustomerId;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = state.registry.read().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        customers: registry.customer_count(),
        phone_numbers: registry.number_count(),
    })
}

/// List every phone number in the system.
pub async fn get_all_phone_numbers(
    State(state): State<AppState>,
) -> Result<Json<PhoneNumbersResponse>, ApiError> {
    info!("Received request to fetch all phone numbers");

    let phone_numbers = state.registry.read().await.get_all_phone_numbers()?;
    let response = PhoneNumbersResponse::assemble(
        &state.base_url,
        None,
        phone_numbers,
        "GET",
        ALL_PHONE_NUMBERS_PATH,
    );

    info!(count = response.phone_numbers.len(), "Retrieved all phone numbers");
    Ok(Json(response))
}

/// List the phone numbers owned by a customer.
pub async fn get_customer_phone_numbers(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PhoneNumbersResponse>, ApiError> {
    let Path(customer_id) = path.map_err(path_rejection)?;
    let customer_id = parse_customer_id(&customer_id)?;
    info!(customer_id, "Received request to fetch phone numbers for customer");

    let phone_numbers = state
        .registry
        .read()
        .await
        .get_phone_numbers_for_customer(customer_id)?;
    let response = PhoneNumbersResponse::assemble(
        &state.base_url,
        Some(customer_id),
        phone_numbers,
        "GET",
        CUSTOMER_PHONE_NUMBERS_PATH,
    );

    info!(customer_id, "Retrieved phone numbers for customer");
    Ok(Json(response))
}

/// Activate one of a customer's phone numbers.
pub async fn activate_phone_number(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<PhoneNumbersResponse>, ApiError> {
    let Path((customer_id, phone_number)) = path.map_err(path_rejection)?;
    let customer_id = parse_customer_id(&customer_id)?;
    info!(customer_id, phone_number = %phone_number, "Received request to activate phone number");

    // Lookup, check and flip happen under one write guard.
    let activated = state
        .registry
        .write()
        .await
        .activate_phone_number(customer_id, &phone_number)?;
    let response = PhoneNumbersResponse::assemble(
        &state.base_url,
        Some(customer_id),
        vec![activated],
        "PATCH",
        CUSTOMER_PHONE_NUMBER_PATH,
    );

    info!(customer_id, phone_number = %phone_number, "Activated phone number");
    Ok(Json(response))
}

/// Minimal OpenAPI document describing the service.
pub async fn openapi() -> Json<Value> {
    Json(json!({
        "openapi": "3.0.1",
        "info": {
            "title": "Telecom Phone Number Management API",
            "version": "1.0.0",
            "description": "API for managing phone numbers associated with customers. Handles new and existing phone numbers with activation support."
        },
        "paths": {
            ALL_PHONE_NUMBERS_PATH: {
                "get": {
                    "operationId": "getAllPhoneNumbers",
                    "responses": { "200": { "description": "All phone numbers" }, "404": { "description": "No numbers exist" } }
                }
            },
            CUSTOMER_PHONE_NUMBERS_PATH: {
                "get": {
                    "operationId": "getCustomerPhoneNumbers",
                    "responses": { "200": { "description": "Customer phone numbers" }, "404": { "description": "Customer not found" } }
                }
            },
            CUSTOMER_PHONE_NUMBER_PATH: {
                "patch": {
                    "operationId": "activatePhoneNumber",
                    "responses": {
                        "200": { "description": "Activated phone number" },
                        "404": { "description": "Customer or phone number not found" },
                        "409": { "description": "Phone number already active" }
                    }
                }
            }
        }
    }))
}

/// Fallback for unmapped routes.
pub async fn not_found(uri: Uri) -> ApiError {
    debug!(%uri, "No route matched");
    ApiError::RouteNotFound(uri.path().to_string())
}

/// Path segments that cannot be decoded are an internal failure, not a lookup miss.
fn path_rejection(rejection: PathRejection) -> ApiError {
    warn!(error = %rejection, "Failed to extract path parameters");
    ApiError::Internal(rejection.body_text())
}

fn parse_customer_id(raw: &str) -> Result<CustomerId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidCustomerId(raw.to_string()))
}
