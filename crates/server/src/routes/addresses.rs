use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use models::address::{self, AddressFields};
use service::address_service;

use crate::envelope::{self, Envelope};
use crate::errors::ApiError;
use crate::routes::ServerState;

/// Request body for create/update. Missing keys and `null` read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct AddressPayload {
    #[serde(default)]
    pub address_details: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pin_code: Option<String>,
}

impl AddressPayload {
    pub fn into_fields(self) -> AddressFields {
        AddressFields {
            address_details: self.address_details.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            pin_code: self.pin_code.unwrap_or_default(),
        }
    }
}

#[utoipa::path(
    post, path = "/api/customers/{id}/addresses", tag = "addresses", operation_id = "create_address",
    params(("id" = i64, Path, description = "Owning customer id")),
    request_body = crate::openapi::AddressRequestDoc,
    responses(
        (status = 200, description = "Address added successfully"),
        (status = 400, description = "Missing fields or unknown customer", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    customer_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AddressPayload>, JsonRejection>,
) -> Result<Json<Envelope<address::Model>>, ApiError> {
    let Path(customer_id) = customer_id?;
    let Json(payload) = payload?;
    let created = address_service::create_address(&state.db, customer_id, &payload.into_fields()).await?;
    info!(id = created.id, customer_id, "created address");
    Ok(envelope::ok("Address added successfully", created))
}

#[utoipa::path(
    get, path = "/api/customers/{id}/addresses", tag = "addresses", operation_id = "list_addresses",
    params(("id" = i64, Path, description = "Owning customer id")),
    responses(
        (status = 200, description = "Addresses of the customer, possibly empty"),
        (status = 400, description = "Bad customer id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    customer_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<Vec<address::Model>>>, ApiError> {
    let Path(customer_id) = customer_id?;
    let rows = address_service::list_addresses(&state.db, customer_id).await?;
    Ok(envelope::ok("success", rows))
}

#[utoipa::path(
    put, path = "/api/addresses/{address_id}", tag = "addresses", operation_id = "update_address",
    params(("address_id" = i64, Path, description = "Address id")),
    request_body = crate::openapi::AddressRequestDoc,
    responses(
        (status = 200, description = "Address updated successfully"),
        (status = 400, description = "Missing fields", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Address not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    address_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AddressPayload>, JsonRejection>,
) -> Result<Json<Envelope<address::Model>>, ApiError> {
    let Path(address_id) = address_id?;
    let Json(payload) = payload?;
    let updated = address_service::update_address(&state.db, address_id, &payload.into_fields()).await?;
    info!(id = updated.id, "updated address");
    Ok(envelope::ok("Address updated successfully", updated))
}

#[utoipa::path(
    delete, path = "/api/addresses/{address_id}", tag = "addresses", operation_id = "delete_address",
    params(("address_id" = i64, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address deleted successfully"),
        (status = 404, description = "Address not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    address_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let Path(address_id) = address_id?;
    address_service::delete_address(&state.db, address_id).await?;
    info!(id = address_id, "deleted address");
    Ok(envelope::done("Address deleted successfully"))
}
