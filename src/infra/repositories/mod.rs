//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Together they form the entity store: typed create, read, update and
//! soft/hard delete primitives for the three entities.

mod car_repository;
mod customer_repository;
pub(crate) mod entities;
mod service_repository;

pub use car_repository::{CarRepository, CarStore};
pub use customer_repository::{CustomerRepository, CustomerStore};
pub use service_repository::{ServiceRepository, ServiceStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use car_repository::MockCarRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use customer_repository::MockCustomerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service_repository::MockServiceRepository;
