//! Service record handlers.

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
use crate::domain::{NewService, Service};
use crate::errors::{AppError, AppResult};

/// Service record creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[schema(example = "oil change")]
    pub comment: String,
    /// Odometer reading, free text
    #[schema(example = "15000")]
    pub miles: String,
    /// Serviced car; must exist
    #[validate(range(min = 1, message = "carId must be a positive id"))]
    #[schema(example = 1)]
    pub car_id: i32,
}

impl From<CreateServiceRequest> for NewService {
    fn from(req: CreateServiceRequest) -> Self {
        Self {
            comment: req.comment,
            miles: req.miles,
            car_id: req.car_id,
        }
    }
}

/// Service record id passed as a query parameter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceIdQuery {
    pub id: Option<i32>,
}

/// Service record id passed in the body; other fields are ignored
#[derive(Debug, Deserialize, ToSchema)]
pub struct ServiceIdBody {
    #[schema(example = 1)]
    pub id: i32,
}

/// Create service record routes
pub fn maintenance_routes() -> Router<AppState> {
    Router::new()
        .route("/service/:id", get(get_service))
        .route("/create/service", post(create_service))
        .route("/delete/service", delete(delete_service))
        .route("/delete/service/:id", delete(delete_service_by_path))
}

/// Get a service record
#[utoipa::path(
    get,
    path = "/service/{id}",
    tag = "Services",
    params(
        ("id" = i32, Path, description = "Service record ID")
    ),
    responses(
        (status = 200, description = "Service record; id 0 when not found", body = Service)
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Service>> {
    let service = state.maintenance_service.get_service(id).await?;
    Ok(Json(service))
}

/// Record work performed on a car
#[utoipa::path(
    post,
    path = "/create/service",
    tag = "Services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service record created", body = Service),
        (status = 400, description = "Validation error or unknown car")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<Service>)> {
    let service = state
        .maintenance_service
        .create_service(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

/// Delete a service record named by `?id=` or a JSON body
#[utoipa::path(
    delete,
    path = "/delete/service",
    tag = "Services",
    params(ServiceIdQuery),
    request_body(content = ServiceIdBody, description = "Alternative to the id parameter"),
    responses(
        (status = 200, description = "The deleted record; id 0 if absent", body = Service),
        (status = 400, description = "No id given")
    )
)]
pub async fn delete_service(
    State(state): State<AppState>,
    Query(query): Query<ServiceIdQuery>,
    body: Option<Json<ServiceIdBody>>,
) -> AppResult<Json<Service>> {
    let id = query
        .id
        .or(body.map(|Json(body)| body.id))
        .ok_or_else(|| AppError::validation("Service id is required"))?;

    let service = state.maintenance_service.delete_service(id).await?;
    Ok(Json(service))
}

/// Delete a service record named in the path
#[utoipa::path(
    delete,
    path = "/delete/service/{id}",
    tag = "Services",
    params(
        ("id" = i32, Path, description = "Service record ID")
    ),
    responses(
        (status = 200, description = "The deleted record; id 0 if absent", body = Service)
    )
)]
pub async fn delete_service_by_path(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Service>> {
    let service = state.maintenance_service.delete_service(id).await?;
    Ok(Json(service))
}
