//! Unit of Work pattern implementation.
//!
//! Centralizes access to the three entity stores and runs multi-step work
//! (the cascade deletes) inside one database transaction when asked to.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::repositories::{
    CarRepository, CarStore, CustomerRepository, CustomerStore, ServiceRepository, ServiceStore,
};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by a transactional closure.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic `transaction` method; unit
/// tests provide a small hand-written implementation over mock repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get customer repository
    fn customers(&self) -> Arc<dyn CustomerRepository>;

    /// Get car repository
    fn cars(&self) -> Arc<dyn CarRepository>;

    /// Get service record repository
    fn services(&self) -> Arc<dyn ServiceRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
///
/// The stores handed out borrow the transaction, so they cannot outlive it.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn customers(&self) -> CustomerStore<&'a DatabaseTransaction> {
        CustomerStore::new(self.txn)
    }

    pub fn cars(&self) -> CarStore<&'a DatabaseTransaction> {
        CarStore::new(self.txn)
    }

    pub fn services(&self) -> ServiceStore<&'a DatabaseTransaction> {
        ServiceStore::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork backed by a SeaORM pool.
pub struct Persistence {
    db: Arc<DatabaseConnection>,
    customer_repo: Arc<CustomerStore>,
    car_repo: Arc<CarStore>,
    service_repo: Arc<ServiceStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        Self {
            customer_repo: Arc::new(CustomerStore::new(db.clone())),
            car_repo: Arc::new(CarStore::new(db.clone())),
            service_repo: Arc::new(ServiceStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn customers(&self) -> Arc<dyn CustomerRepository> {
        self.customer_repo.clone()
    }

    fn cars(&self) -> Arc<dyn CarRepository> {
        self.car_repo.clone()
    }

    fn services(&self) -> Arc<dyn ServiceRepository> {
        self.service_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let outcome = f(TransactionContext::new(&txn)).await;

        match outcome {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
