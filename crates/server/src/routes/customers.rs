use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use models::customer::{self, CustomerDetail, CustomerFields, CustomerSummary};
use service::customer_service::{self, CustomerFilter};
use service::pagination::Pagination;
use service::roster::{self, SortKey};

use crate::envelope::{self, Envelope, PageEnvelope};
use crate::errors::ApiError;
use crate::routes::ServerState;

/// Request body for create/update. Missing keys and `null` read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerPayload {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl CustomerPayload {
    pub fn into_fields(self) -> CustomerFields {
        CustomerFields {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            phone_number: self.phone_number.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Substring of any owned address's city
    pub city: Option<String>,
    /// Substring of any owned address's state
    pub state: Option<String>,
    /// Substring of any owned address's pin code
    pub pin_code: Option<String>,
    /// 1-based page, default 1
    pub page: Option<String>,
    /// Page size, default 10, capped at 100
    pub limit: Option<String>,
    /// Name (case-insensitive) or phone substring, applied to the fetched page
    pub search: Option<String>,
    /// `name` or `phone`, applied to the fetched page
    pub sort: Option<String>,
}

#[utoipa::path(
    post, path = "/api/customers", tag = "customers", operation_id = "create_customer",
    request_body = crate::openapi::CustomerRequestDoc,
    responses(
        (status = 200, description = "Customer created successfully"),
        (status = 400, description = "Missing fields or duplicate phone", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<Json<Envelope<customer::Model>>, ApiError> {
    let Json(payload) = payload?;
    let created = customer_service::create_customer(&state.db, &payload.into_fields()).await?;
    info!(id = created.id, "created customer");
    Ok(envelope::ok("Customer created successfully", created))
}

#[utoipa::path(
    get, path = "/api/customers", tag = "customers", operation_id = "list_customers",
    params(ListQuery),
    responses(
        (status = 200, description = "Newest first, with address_count per row"),
        (status = 400, description = "Bad pagination or sort key", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PageEnvelope<CustomerSummary>>, ApiError> {
    let Query(q) = query?;
    let page = Pagination::parse(q.page.as_deref(), q.limit.as_deref())?;
    let sort = q
        .sort
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<SortKey>)
        .transpose()?;
    let filter = CustomerFilter { city: q.city, state: q.state, pin_code: q.pin_code };

    let mut rows = customer_service::list_customers(&state.db, &filter, page).await?;
    if let Some(term) = q.search.as_deref() {
        rows = roster::filter_by_term(rows, term);
    }
    if let Some(key) = sort {
        roster::sort_customers(&mut rows, key);
    }
    info!(count = rows.len(), page = page.page, limit = page.limit, "list customers");
    Ok(Json(PageEnvelope { message: "success", data: rows, page: page.page, limit: page.limit }))
}

#[utoipa::path(
    get, path = "/api/customers/{id}", tag = "customers", operation_id = "get_customer",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer with its addresses"),
        (status = 404, description = "Customer not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<CustomerDetail>>, ApiError> {
    let Path(id) = id?;
    let detail = customer_service::get_customer(&state.db, id).await?;
    Ok(envelope::ok("success", detail))
}

#[utoipa::path(
    put, path = "/api/customers/{id}", tag = "customers", operation_id = "update_customer",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerRequestDoc,
    responses(
        (status = 200, description = "Customer updated successfully"),
        (status = 400, description = "Missing fields or duplicate phone", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Customer not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<Json<Envelope<customer::Model>>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let updated = customer_service::update_customer(&state.db, id, &payload.into_fields()).await?;
    info!(id = updated.id, "updated customer");
    Ok(envelope::ok("Customer updated successfully", updated))
}

#[utoipa::path(
    delete, path = "/api/customers/{id}", tag = "customers", operation_id = "delete_customer",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deleted successfully, addresses included"),
        (status = 404, description = "Customer not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let Path(id) = id?;
    customer_service::delete_customer(&state.db, id).await?;
    info!(id, "deleted customer");
    Ok(envelope::done("Customer deleted successfully"))
}
