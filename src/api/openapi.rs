//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{car_handler, customer_handler, maintenance_handler};
use crate::domain::{Car, Customer, Service, UpdateCustomer};

/// OpenAPI documentation for the auto shop API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Auto Shop API",
        version = "0.1.0",
        description = "Customers, their cars and the service history of each car",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Customer endpoints
        customer_handler::list_customers,
        customer_handler::get_customer,
        customer_handler::create_customer,
        customer_handler::update_customer,
        customer_handler::delete_customer,
        // Car endpoints
        car_handler::list_cars,
        car_handler::get_car,
        car_handler::create_car,
        car_handler::delete_car,
        // Service record endpoints
        maintenance_handler::get_service,
        maintenance_handler::create_service,
        maintenance_handler::delete_service,
        maintenance_handler::delete_service_by_path,
    ),
    components(
        schemas(
            // Domain types
            Customer,
            Car,
            Service,
            UpdateCustomer,
            // Request types
            customer_handler::CreateCustomerRequest,
            car_handler::CreateCarRequest,
            maintenance_handler::CreateServiceRequest,
            maintenance_handler::ServiceIdBody,
        )
    ),
    tags(
        (name = "Customers", description = "Customer management and cascade delete"),
        (name = "Cars", description = "Cars owned by customers"),
        (name = "Services", description = "Service records performed on cars")
    )
)]
pub struct ApiDoc;
