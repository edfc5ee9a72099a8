//! Car service - Car use cases.

use async_trait::async_trait;
use std::sync::Arc;

use super::{IntegrityManager, ResourceAggregator};
use crate::domain::{Car, NewCar};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Car service trait for dependency injection.
#[async_trait]
pub trait CarService: Send + Sync {
    /// List active cars, optionally only those of one customer
    async fn list_cars(&self, customer_id: Option<i32>) -> AppResult<Vec<Car>>;

    /// Car with its service records; zero value when absent
    async fn get_car(&self, id: i32) -> AppResult<Car>;

    /// Register a car for an existing customer; the VIN must be unused
    async fn create_car(&self, car: NewCar) -> AppResult<Car>;

    /// Cascade-delete the car and its service records
    async fn delete_car(&self, id: i32) -> AppResult<Car>;
}

/// Concrete implementation of CarService using Unit of Work.
pub struct CarManager<U: UnitOfWork> {
    uow: Arc<U>,
    aggregator: ResourceAggregator<U>,
    integrity: Arc<IntegrityManager<U>>,
}

impl<U: UnitOfWork> CarManager<U> {
    pub fn new(uow: Arc<U>, integrity: Arc<IntegrityManager<U>>) -> Self {
        Self {
            aggregator: ResourceAggregator::new(uow.clone()),
            uow,
            integrity,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> CarService for CarManager<U> {
    async fn list_cars(&self, customer_id: Option<i32>) -> AppResult<Vec<Car>> {
        match customer_id {
            Some(customer_id) => self.uow.cars().list_by_customer(customer_id).await,
            None => self.uow.cars().list().await,
        }
    }

    async fn get_car(&self, id: i32) -> AppResult<Car> {
        self.aggregator.get_car_with_services(id).await
    }

    async fn create_car(&self, car: NewCar) -> AppResult<Car> {
        if self
            .uow
            .customers()
            .find_by_id(car.customer_id)
            .await?
            .is_none()
        {
            return Err(AppError::bad_request(format!(
                "Customer {} does not exist",
                car.customer_id
            )));
        }

        let cars = self.uow.cars();
        if cars.find_by_vin_with_deleted(&car.vin).await?.is_some() {
            return Err(AppError::conflict("VIN"));
        }

        cars.create(car).await
    }

    async fn delete_car(&self, id: i32) -> AppResult<Car> {
        self.integrity.delete_car(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeleteMode;
    use crate::domain::Customer;
    use crate::infra::{MockCarRepository, MockCustomerRepository};
    use crate::services::test_support::TestUnitOfWork;
    use mockall::predicate::eq;

    fn new_car(customer_id: i32) -> NewCar {
        NewCar {
            make: "Toyota".into(),
            model: "Corolla".into(),
            color: "White".into(),
            vin: "ABC123".into(),
            customer_id,
        }
    }

    fn manager(
        customers: MockCustomerRepository,
        cars: MockCarRepository,
    ) -> CarManager<TestUnitOfWork> {
        let uow = Arc::new(
            TestUnitOfWork::new()
                .with_customers(customers)
                .with_cars(cars),
        );
        let integrity = Arc::new(IntegrityManager::new(uow.clone(), DeleteMode::Soft, false));
        CarManager::new(uow, integrity)
    }

    #[tokio::test]
    async fn test_create_car_requires_existing_customer() {
        let mut customers = MockCustomerRepository::new();
        let mut cars = MockCarRepository::new();
        customers.expect_find_by_id().returning(|_| Ok(None));
        cars.expect_create().never();

        let result = manager(customers, cars).create_car(new_car(4)).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_car_rejects_duplicate_vin() {
        let mut customers = MockCustomerRepository::new();
        let mut cars = MockCarRepository::new();
        customers.expect_find_by_id().returning(|id| {
            Ok(Some(Customer {
                id,
                ..Default::default()
            }))
        });
        cars.expect_find_by_vin_with_deleted()
            .returning(|vin| {
                Ok(Some(Car {
                    id: 1,
                    vin: vin.to_string(),
                    ..Default::default()
                }))
            });
        cars.expect_create().never();

        let result = manager(customers, cars).create_car(new_car(4)).await;

        assert!(matches!(result, Err(AppError::Conflict(field)) if field == "VIN"));
    }

    #[tokio::test]
    async fn test_list_cars_filters_by_customer() {
        let mut cars = MockCarRepository::new();
        cars.expect_list_by_customer()
            .with(eq(2))
            .times(1)
            .returning(|id| {
                Ok(vec![Car {
                    id: 5,
                    customer_id: id,
                    ..Default::default()
                }])
            });
        cars.expect_list().never();

        let listed = manager(MockCustomerRepository::new(), cars)
            .list_cars(Some(2))
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].customer_id, 2);
    }
}
