//! Customer handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Customer, NewCustomer, UpdateCustomer};
use crate::errors::AppResult;

/// Customer creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "Lopez")]
    pub last_name: String,
    /// Must not belong to any other customer
    #[validate(length(min = 1, max = 100, message = "Phone number must be 1 to 100 characters"))]
    #[schema(example = "555-0100")]
    pub phone: String,
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(req: CreateCustomerRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
        }
    }
}

/// Create customer routes
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customer/:id", get(get_customer))
        .route("/create/customer", post(create_customer))
        .route("/update/customer/:id", put(update_customer))
        .route("/delete/customer/:id", delete(delete_customer))
}

/// List all customers
#[utoipa::path(
    get,
    path = "/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "All active customers", body = Vec<Customer>)
    )
)]
pub async fn list_customers(State(state): State<AppState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = state.customer_service.list_customers().await?;
    Ok(Json(customers))
}

/// Get a customer with its cars
#[utoipa::path(
    get,
    path = "/customer/{id}",
    tag = "Customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer with cars; id 0 when not found", body = Customer)
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Customer>> {
    let customer = state.customer_service.get_customer(id).await?;
    Ok(Json(customer))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/create/customer",
    tag = "Customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Phone number already exists")
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCustomerRequest>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = state
        .customer_service
        .create_customer(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

/// Replace a customer's fields
///
/// Fields missing from the body are cleared.
#[utoipa::path(
    put,
    path = "/update/customer/{id}",
    tag = "Customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Updated customer; id 0 when not found", body = Customer),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCustomer>,
) -> AppResult<Json<Customer>> {
    let customer = state.customer_service.update_customer(id, payload).await?;
    Ok(Json(customer))
}

/// Delete a customer with all of its cars and service records
#[utoipa::path(
    delete,
    path = "/delete/customer/{id}",
    tag = "Customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "The deleted customer; id 0 if absent", body = Customer),
        (status = 500, description = "Cascade failed and was rolled back")
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Customer>> {
    let customer = state.customer_service.delete_customer(id).await?;
    Ok(Json(customer))
}
