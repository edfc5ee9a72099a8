//! Integrity manager - Cascade-delete protocol for the ownership tree.
//!
//! Deleting a customer removes every car it owns and every service record
//! on those cars; deleting a car removes its service records; deleting a
//! service record touches nothing else. Children always go before their
//! parent, so the restricting foreign keys never fire. The explicit walk is
//! the only cascade mechanism; the schema declares none.

use std::sync::Arc;

use crate::config::DeleteMode;
use crate::domain::{Car, Customer, Service};
use crate::errors::AppResult;
use crate::infra::{CarRepository, CustomerRepository, ServiceRepository, UnitOfWork};

/// One pass of the cascade walk over a set of repositories.
///
/// Borrowing trait objects lets the same walk run against the pooled stores,
/// the stores of an open transaction, or mocks.
pub struct CascadeWalk<'r> {
    customers: &'r dyn CustomerRepository,
    cars: &'r dyn CarRepository,
    services: &'r dyn ServiceRepository,
}

impl<'r> CascadeWalk<'r> {
    pub fn new(
        customers: &'r dyn CustomerRepository,
        cars: &'r dyn CarRepository,
        services: &'r dyn ServiceRepository,
    ) -> Self {
        Self {
            customers,
            cars,
            services,
        }
    }

    /// Remove a customer and all of its descendants.
    ///
    /// Returns the customer as it was loaded before any row was touched, or
    /// `None` when there was nothing to delete.
    pub async fn delete_customer(&self, id: i32) -> AppResult<Option<Customer>> {
        let Some(customer) = self.customers.find_by_id_with_deleted(id).await? else {
            tracing::debug!("Customer {} not found, nothing to delete", id);
            return Ok(None);
        };

        let cars = self.cars.list_by_customer_with_deleted(id).await?;

        let mut removed_services = 0;
        for car in &cars {
            for service in self.services.list_by_car_with_deleted(car.id).await? {
                removed_services += self.services.hard_delete(service.id).await?;
            }
        }
        tracing::debug!(
            "Removed {} service records under customer {}",
            removed_services,
            id
        );

        let removed_cars = self.cars.hard_delete_by_customer(id).await?;
        tracing::debug!("Removed {} cars of customer {}", removed_cars, id);

        self.customers.hard_delete(id).await?;

        tracing::info!(
            customer_id = id,
            cars = removed_cars,
            services = removed_services,
            "Customer deleted with descendants"
        );

        Ok(Some(customer))
    }

    /// Remove a car and its service records; the owner and sibling cars stay.
    pub async fn delete_car(&self, id: i32) -> AppResult<Option<Car>> {
        let Some(car) = self.cars.find_by_id_with_deleted(id).await? else {
            tracing::debug!("Car {} not found, nothing to delete", id);
            return Ok(None);
        };

        let removed_services = self.services.hard_delete_by_car(id).await?;
        tracing::debug!("Removed {} service records of car {}", removed_services, id);

        self.cars.hard_delete(id).await?;

        tracing::info!(
            car_id = id,
            services = removed_services,
            "Car deleted with descendants"
        );

        Ok(Some(car))
    }
}

/// Runs the cascade walk, inside a transaction when configured to.
pub struct IntegrityManager<U: UnitOfWork> {
    uow: Arc<U>,
    service_delete_mode: DeleteMode,
    in_transaction: bool,
}

impl<U: UnitOfWork> IntegrityManager<U> {
    pub fn new(uow: Arc<U>, service_delete_mode: DeleteMode, in_transaction: bool) -> Self {
        Self {
            uow,
            service_delete_mode,
            in_transaction,
        }
    }

    /// Cascade-delete a customer; `None` when the id names no row.
    pub async fn remove_customer(&self, id: i32) -> AppResult<Option<Customer>> {
        if self.in_transaction {
            return self
                .uow
                .transaction(move |ctx| {
                    Box::pin(async move {
                        let (customers, cars, services) =
                            (ctx.customers(), ctx.cars(), ctx.services());
                        CascadeWalk::new(&customers, &cars, &services)
                            .delete_customer(id)
                            .await
                    })
                })
                .await;
        }

        let (customers, cars, services) =
            (self.uow.customers(), self.uow.cars(), self.uow.services());
        CascadeWalk::new(customers.as_ref(), cars.as_ref(), services.as_ref())
            .delete_customer(id)
            .await
    }

    /// Cascade-delete a car; `None` when the id names no row.
    pub async fn remove_car(&self, id: i32) -> AppResult<Option<Car>> {
        if self.in_transaction {
            return self
                .uow
                .transaction(move |ctx| {
                    Box::pin(async move {
                        let (customers, cars, services) =
                            (ctx.customers(), ctx.cars(), ctx.services());
                        CascadeWalk::new(&customers, &cars, &services)
                            .delete_car(id)
                            .await
                    })
                })
                .await;
        }

        let (customers, cars, services) =
            (self.uow.customers(), self.uow.cars(), self.uow.services());
        CascadeWalk::new(customers.as_ref(), cars.as_ref(), services.as_ref())
            .delete_car(id)
            .await
    }

    /// Delete one active service record using the configured mode.
    pub async fn remove_service(&self, id: i32) -> AppResult<Option<Service>> {
        let services = self.uow.services();
        let Some(service) = services.find_by_id(id).await? else {
            tracing::debug!("Service record {} not found, nothing to delete", id);
            return Ok(None);
        };

        match self.service_delete_mode {
            DeleteMode::Soft => services.soft_delete(id).await?,
            DeleteMode::Hard => services.hard_delete(id).await?,
        };
        tracing::info!(service_id = id, mode = ?self.service_delete_mode, "Service record deleted");

        Ok(Some(service))
    }

    /// Zero-value form of [`Self::remove_customer`].
    pub async fn delete_customer(&self, id: i32) -> AppResult<Customer> {
        Ok(self.remove_customer(id).await?.unwrap_or_default())
    }

    /// Zero-value form of [`Self::remove_car`].
    pub async fn delete_car(&self, id: i32) -> AppResult<Car> {
        Ok(self.remove_car(id).await?.unwrap_or_default())
    }

    /// Zero-value form of [`Self::remove_service`].
    pub async fn delete_service(&self, id: i32) -> AppResult<Service> {
        Ok(self.remove_service(id).await?.unwrap_or_default())
    }
}
