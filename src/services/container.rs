//! Service Container - Centralized service access.
//!
//! Handlers depend on the service traits through this container, never on
//! the managers or the unit of work directly.

use std::sync::Arc;

use super::{
    CarManager, CarService, CustomerManager, CustomerService, IntegrityManager,
    MaintenanceManager, MaintenanceService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get customer service
    fn customers(&self) -> Arc<dyn CustomerService>;

    /// Get car service
    fn cars(&self) -> Arc<dyn CarService>;

    /// Get service record service
    fn maintenance(&self) -> Arc<dyn MaintenanceService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    customer_service: Arc<dyn CustomerService>,
    car_service: Arc<dyn CarService>,
    maintenance_service: Arc<dyn MaintenanceService>,
}

impl Services {
    /// Create a service container from already built services
    pub fn new(
        customer_service: Arc<dyn CustomerService>,
        car_service: Arc<dyn CarService>,
        maintenance_service: Arc<dyn MaintenanceService>,
    ) -> Self {
        Self {
            customer_service,
            car_service,
            maintenance_service,
        }
    }

    /// Wire every service over one shared unit of work.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let integrity = Arc::new(IntegrityManager::new(
            uow.clone(),
            config.service_delete_mode,
            config.cascade_in_transaction,
        ));

        Self {
            customer_service: Arc::new(CustomerManager::new(uow.clone(), integrity.clone())),
            car_service: Arc::new(CarManager::new(uow.clone(), integrity.clone())),
            maintenance_service: Arc::new(MaintenanceManager::new(uow, integrity)),
        }
    }
}

impl ServiceContainer for Services {
    fn customers(&self) -> Arc<dyn CustomerService> {
        self.customer_service.clone()
    }

    fn cars(&self) -> Arc<dyn CarService> {
        self.car_service.clone()
    }

    fn maintenance(&self) -> Arc<dyn MaintenanceService> {
        self.maintenance_service.clone()
    }
}
