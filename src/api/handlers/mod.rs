//! HTTP request handlers.

pub mod car_handler;
pub mod customer_handler;
pub mod maintenance_handler;

pub use car_handler::car_routes;
pub use customer_handler::customer_routes;
pub use maintenance_handler::maintenance_routes;
