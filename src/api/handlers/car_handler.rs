//! Car handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Car, NewCar};
use crate::errors::AppResult;

/// Car creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    #[schema(example = "Toyota")]
    pub make: String,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = "Red")]
    pub color: String,
    /// Must not belong to any other car
    #[validate(length(min = 1, max = 100, message = "VIN must be 1 to 100 characters"))]
    #[schema(example = "ABC123")]
    pub vin: String,
    /// Owner; must be an existing customer
    #[validate(range(min = 1, message = "customerId must be a positive id"))]
    #[schema(example = 1)]
    pub customer_id: i32,
}

impl From<CreateCarRequest> for NewCar {
    fn from(req: CreateCarRequest) -> Self {
        Self {
            make: req.make,
            model: req.model,
            color: req.color,
            vin: req.vin,
            customer_id: req.customer_id,
        }
    }
}

/// Optional owner filter for the car listing
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCarsQuery {
    /// Only cars owned by this customer
    #[serde(rename = "customerId")]
    pub customer_id: Option<i32>,
}

/// Create car routes
pub fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars))
        .route("/car/:id", get(get_car))
        .route("/create/car", post(create_car))
        .route("/delete/car/:id", delete(delete_car))
}

/// List cars
#[utoipa::path(
    get,
    path = "/cars",
    tag = "Cars",
    params(ListCarsQuery),
    responses(
        (status = 200, description = "Active cars", body = Vec<Car>)
    )
)]
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<ListCarsQuery>,
) -> AppResult<Json<Vec<Car>>> {
    let cars = state.car_service.list_cars(query.customer_id).await?;
    Ok(Json(cars))
}

/// Get a car with its service records
#[utoipa::path(
    get,
    path = "/car/{id}",
    tag = "Cars",
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car with services; id 0 when not found", body = Car)
    )
)]
pub async fn get_car(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Car>> {
    let car = state.car_service.get_car(id).await?;
    Ok(Json(car))
}

/// Register a car for a customer
#[utoipa::path(
    post,
    path = "/create/car",
    tag = "Cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created", body = Car),
        (status = 400, description = "Validation error or unknown customer"),
        (status = 409, description = "VIN already exists")
    )
)]
pub async fn create_car(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCarRequest>,
) -> AppResult<(StatusCode, Json<Car>)> {
    let car = state.car_service.create_car(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

/// Delete a car with its service records
#[utoipa::path(
    delete,
    path = "/delete/car/{id}",
    tag = "Cars",
    params(
        ("id" = i32, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "The deleted car; id 0 when it did not exist", body = Car),
        (status = 500, description = "Cascade failed and was rolled back")
    )
)]
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Car>> {
    let car = state.car_service.delete_car(id).await?;
    Ok(Json(car))
}
