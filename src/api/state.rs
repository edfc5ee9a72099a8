//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    CarService, CustomerService, MaintenanceService, ServiceContainer, Services,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<dyn CustomerService>,
    pub car_service: Arc<dyn CarService>,
    pub maintenance_service: Arc<dyn MaintenanceService>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the services over the given database.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), &config);
        Self::new(&container, database, config)
    }

    /// Build state from any service container.
    pub fn new(container: &dyn ServiceContainer, database: Arc<Database>, config: Config) -> Self {
        Self {
            customer_service: container.customers(),
            car_service: container.cars(),
            maintenance_service: container.maintenance(),
            database,
            config: Arc::new(config),
        }
    }
}
