//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! The integrity manager owns every cascade; the aggregator owns every
//! nested read. The use-case services delegate to both.

mod aggregator;
mod car_service;
pub mod container;
mod customer_service;
mod integrity;
mod maintenance_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Core components
pub use aggregator::ResourceAggregator;
pub use integrity::{CascadeWalk, IntegrityManager};

// Service traits and implementations
pub use car_service::{CarManager, CarService};
pub use customer_service::{CustomerManager, CustomerService};
pub use maintenance_service::{MaintenanceManager, MaintenanceService};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::errors::{AppError, AppResult};
    use crate::infra::{
        CarRepository, CustomerRepository, MockCarRepository, MockCustomerRepository,
        MockServiceRepository, ServiceRepository, TransactionContext, TxFuture, UnitOfWork,
    };

    /// Unit of work over mock repositories; unexpected calls panic.
    pub struct TestUnitOfWork {
        customers: Arc<MockCustomerRepository>,
        cars: Arc<MockCarRepository>,
        services: Arc<MockServiceRepository>,
    }

    impl TestUnitOfWork {
        pub fn new() -> Self {
            Self {
                customers: Arc::new(MockCustomerRepository::new()),
                cars: Arc::new(MockCarRepository::new()),
                services: Arc::new(MockServiceRepository::new()),
            }
        }

        pub fn with_customers(mut self, repo: MockCustomerRepository) -> Self {
            self.customers = Arc::new(repo);
            self
        }

        pub fn with_cars(mut self, repo: MockCarRepository) -> Self {
            self.cars = Arc::new(repo);
            self
        }

        pub fn with_services(mut self, repo: MockServiceRepository) -> Self {
            self.services = Arc::new(repo);
            self
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn customers(&self) -> Arc<dyn CustomerRepository> {
            self.customers.clone()
        }

        fn cars(&self) -> Arc<dyn CarRepository> {
            self.cars.clone()
        }

        fn services(&self) -> Arc<dyn ServiceRepository> {
            self.services.clone()
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }
}
