//! Handlers for the `/customers` resource.
//!
//! Identifiers are taken from the path as raw strings; parsing them is the
//! repository's job so that a bad identifier and a missing row stay
//! distinguishable.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registry_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::models::customer::{CreateCustomerInput, CustomerResponse, UpdateCustomerInput};
use crate::state::AppState;

/// A body that omits a required field is a validation failure; any other
/// unreadable body is a bad request.
fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) if err.body_text().contains("missing field") => {
            AppError::Core(CoreError::Validation(err.body_text()))
        }
        other => AppError::BadRequest(other.body_text()),
    }
}

/// POST /api/v1/customers
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CustomerResponse>)> {
    let Json(input) = payload.map_err(json_rejection)?;
    let customer = state.customers.create_customer(input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /api/v1/customers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CustomerResponse>>> {
    let customers = state.customers.get_all_customers().await?;
    Ok(Json(customers))
}

/// GET /api/v1/customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CustomerResponse>> {
    let customer = state.customers.get_customer(&id).await?;
    Ok(Json(customer))
}

/// PUT /api/v1/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCustomerInput>, JsonRejection>,
) -> AppResult<Json<CustomerResponse>> {
    let Json(input) = payload.map_err(json_rejection)?;
    let customer = state.customers.update_customer(&id, input).await?;
    Ok(Json(customer))
}

/// DELETE /api/v1/customers/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.customers.delete_customer(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
