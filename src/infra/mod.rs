//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Entity stores for customers, cars and service records
//! - Unit of Work for repository access and transactions

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CarRepository, CarStore, CustomerRepository, CustomerStore, ServiceRepository, ServiceStore,
};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCarRepository, MockCustomerRepository, MockServiceRepository};
