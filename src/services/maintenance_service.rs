//! Maintenance service - Service record use cases.

use async_trait::async_trait;
use std::sync::Arc;

use super::IntegrityManager;
use crate::domain::{NewService, Service};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Maintenance service trait for dependency injection.
#[async_trait]
pub trait MaintenanceService: Send + Sync {
    /// Active service record by ID; zero value when absent
    async fn get_service(&self, id: i32) -> AppResult<Service>;

    /// Record work on an existing car
    async fn create_service(&self, service: NewService) -> AppResult<Service>;

    /// Delete one service record (soft by default)
    async fn delete_service(&self, id: i32) -> AppResult<Service>;
}

/// Concrete implementation of MaintenanceService using Unit of Work.
pub struct MaintenanceManager<U: UnitOfWork> {
    uow: Arc<U>,
    integrity: Arc<IntegrityManager<U>>,
}

impl<U: UnitOfWork> MaintenanceManager<U> {
    pub fn new(uow: Arc<U>, integrity: Arc<IntegrityManager<U>>) -> Self {
        Self { uow, integrity }
    }
}

#[async_trait]
impl<U: UnitOfWork> MaintenanceService for MaintenanceManager<U> {
    async fn get_service(&self, id: i32) -> AppResult<Service> {
        Ok(self
            .uow
            .services()
            .find_by_id(id)
            .await?
            .unwrap_or_default())
    }

    async fn create_service(&self, service: NewService) -> AppResult<Service> {
        if self.uow.cars().find_by_id(service.car_id).await?.is_none() {
            return Err(AppError::bad_request(format!(
                "Car {} does not exist",
                service.car_id
            )));
        }

        self.uow.services().create(service).await
    }

    async fn delete_service(&self, id: i32) -> AppResult<Service> {
        self.integrity.delete_service(id).await
    }
}
