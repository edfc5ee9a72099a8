//! Shared setup for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use auto_shop::config::Config;
use auto_shop::domain::{Car, Customer, NewCar, NewCustomer, NewService, Service};
use auto_shop::infra::{CarRepository, CustomerRepository, Database, ServiceRepository};

/// Config for a private in-memory SQLite database.
///
/// A single pooled connection keeps every query on the same in-memory file.
pub fn test_config() -> Config {
    let mut config = Config::with_database_url("sqlite::memory:");
    config.max_connections = 1;
    config
}

/// Migrated in-memory database.
pub async fn setup_database(config: &Config) -> Arc<Database> {
    Arc::new(
        Database::connect(config)
            .await
            .expect("in-memory database should migrate"),
    )
}

pub async fn seed_customer(repo: &dyn CustomerRepository, phone: &str) -> Customer {
    repo.create(NewCustomer {
        first_name: "Ana".to_string(),
        last_name: "Lopez".to_string(),
        phone: phone.to_string(),
    })
    .await
    .expect("customer insert")
}

pub async fn seed_car(repo: &dyn CarRepository, customer_id: i32, vin: &str) -> Car {
    repo.create(NewCar {
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        color: "Red".to_string(),
        vin: vin.to_string(),
        customer_id,
    })
    .await
    .expect("car insert")
}

pub async fn seed_service(repo: &dyn ServiceRepository, car_id: i32, comment: &str) -> Service {
    repo.create(NewService {
        comment: comment.to_string(),
        miles: "15000".to_string(),
        car_id,
    })
    .await
    .expect("service insert")
}
