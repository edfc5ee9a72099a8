//! Customer service - Customer use cases.

use async_trait::async_trait;
use std::sync::Arc;

use super::{IntegrityManager, ResourceAggregator};
use crate::domain::{Customer, NewCustomer, UpdateCustomer};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Customer service trait for dependency injection.
///
/// Reads, updates and deletes answer an unknown id with the zero-value
/// customer instead of an error.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// List all active customers
    async fn list_customers(&self) -> AppResult<Vec<Customer>>;

    /// Customer with its cars
    async fn get_customer(&self, id: i32) -> AppResult<Customer>;

    /// Register a customer; the phone number must be unused
    async fn create_customer(&self, customer: NewCustomer) -> AppResult<Customer>;

    /// Overlay every scalar field from the payload
    async fn update_customer(&self, id: i32, update: UpdateCustomer) -> AppResult<Customer>;

    /// Cascade-delete the customer, its cars and their service records
    async fn delete_customer(&self, id: i32) -> AppResult<Customer>;
}

/// Concrete implementation of CustomerService using Unit of Work.
pub struct CustomerManager<U: UnitOfWork> {
    uow: Arc<U>,
    aggregator: ResourceAggregator<U>,
    integrity: Arc<IntegrityManager<U>>,
}

impl<U: UnitOfWork> CustomerManager<U> {
    pub fn new(uow: Arc<U>, integrity: Arc<IntegrityManager<U>>) -> Self {
        Self {
            aggregator: ResourceAggregator::new(uow.clone()),
            uow,
            integrity,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> CustomerService for CustomerManager<U> {
    async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        self.uow.customers().list().await
    }

    async fn get_customer(&self, id: i32) -> AppResult<Customer> {
        self.aggregator.get_customer_with_cars(id).await
    }

    async fn create_customer(&self, customer: NewCustomer) -> AppResult<Customer> {
        let customers = self.uow.customers();

        // Soft-deleted rows still hold their phone number
        if customers
            .find_by_phone_with_deleted(&customer.phone)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Phone number"));
        }

        customers.create(customer).await
    }

    async fn update_customer(&self, id: i32, update: UpdateCustomer) -> AppResult<Customer> {
        let customers = self.uow.customers();

        let Some(stored) = customers.find_by_id(id).await? else {
            return Ok(Customer::default());
        };

        let mut customer = stored.clone();
        customer.overlay(update);

        // A failed write answers with the stored values rather than an error.
        match customers.update(customer).await {
            Ok(updated) => Ok(updated),
            Err(e) => {
                tracing::error!("Failed to update customer {}: {}", id, e);
                Ok(stored)
            }
        }
    }

    async fn delete_customer(&self, id: i32) -> AppResult<Customer> {
        self.integrity.delete_customer(id).await
    }
}
