use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::customers::store::{
    delete_customer, get_customer, get_or_create_customer, list_customers, update_customer,
    CustomerUpdate, CUSTOMERS_PER_PAGE,
};
use crate::errors::AppError;
use crate::models::customer::CustomerRow;
use crate::models::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CustomerListQuery {
    pub user_id: Uuid,
    #[serde(default)]
    pub page: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub user_id: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub update: CustomerUpdate,
}

#[derive(Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerRow>,
    pub page: u32,
    pub per_page: i64,
}

fn customer_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("customer {id}"))
}

/// GET /api/v1/customers
pub async fn handle_list_customers(
    State(state): State<AppState>,
    Query(params): Query<CustomerListQuery>,
) -> Result<Json<CustomerListResponse>, AppError> {
    let page = params.page.max(1);
    let customers = list_customers(&state.db, params.user_id, page).await?;
    Ok(Json(CustomerListResponse {
        customers,
        page,
        per_page: CUSTOMERS_PER_PAGE,
    }))
}

/// POST /api/v1/customers
///
/// Idempotent: posting an existing name returns the stored customer.
pub async fn handle_create_customer(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<Json<CustomerRow>, AppError> {
    let customer = get_or_create_customer(&state.db, req.user_id, &req.name).await?;
    Ok(Json(customer))
}

/// GET /api/v1/customers/:id
pub async fn handle_get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CustomerRow>, AppError> {
    get_customer(&state.db, params.user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| customer_not_found(id))
}

/// PATCH /api/v1/customers/:id
pub async fn handle_update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerRow>, AppError> {
    update_customer(&state.db, req.user_id, id, &req.update)
        .await?
        .map(Json)
        .ok_or_else(|| customer_not_found(id))
}

/// DELETE /api/v1/customers/:id
pub async fn handle_delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if delete_customer(&state.db, params.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(customer_not_found(id))
    }
}
