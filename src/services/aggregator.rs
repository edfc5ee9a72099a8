//! Resource aggregator - Nested reads for the ownership tree.
//!
//! Each read issues exactly two store queries, one for the entity and one
//! for its direct children, and runs them concurrently. Nothing is written.

use std::sync::Arc;

use tokio::try_join;

use crate::domain::{Car, Customer};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

pub struct ResourceAggregator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ResourceAggregator<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Customer with its active cars attached, `None` when absent.
    pub async fn customer_with_cars(&self, id: i32) -> AppResult<Option<Customer>> {
        let customers = self.uow.customers();
        let cars = self.uow.cars();

        let (customer, cars) = try_join!(customers.find_by_id(id), cars.list_by_customer(id))?;

        Ok(customer.map(|customer| customer.with_cars(cars)))
    }

    /// Car with its active service records attached, `None` when absent.
    pub async fn car_with_services(&self, id: i32) -> AppResult<Option<Car>> {
        let cars = self.uow.cars();
        let services = self.uow.services();

        let (car, services) = try_join!(cars.find_by_id(id), services.list_by_car(id))?;

        Ok(car.map(|car| car.with_services(services)))
    }

    /// Zero-value form: an absent customer reads as `id == 0` with no cars.
    pub async fn get_customer_with_cars(&self, id: i32) -> AppResult<Customer> {
        Ok(self.customer_with_cars(id).await?.unwrap_or_default())
    }

    /// Zero-value form: an absent car reads as `id == 0` with no services.
    pub async fn get_car_with_services(&self, id: i32) -> AppResult<Car> {
        Ok(self.car_with_services(id).await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Service;
    use crate::infra::{MockCarRepository, MockCustomerRepository, MockServiceRepository};
    use crate::services::test_support::TestUnitOfWork;
    use mockall::predicate::eq;

    fn car(id: i32, customer_id: i32) -> Car {
        Car {
            id,
            make: "Honda".into(),
            model: "Civic".into(),
            color: "Blue".into(),
            vin: format!("VIN{}", id),
            customer_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_customer_with_cars_uses_two_queries() {
        let mut customers = MockCustomerRepository::new();
        let mut cars = MockCarRepository::new();

        customers
            .expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(|id| {
                Ok(Some(Customer {
                    id,
                    first_name: "Ana".into(),
                    ..Default::default()
                }))
            });
        cars.expect_list_by_customer()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(vec![car(1, id), car(2, id), car(3, id)]));

        let uow = TestUnitOfWork::new()
            .with_customers(customers)
            .with_cars(cars);
        let aggregator = ResourceAggregator::new(Arc::new(uow));

        let customer = aggregator.get_customer_with_cars(1).await.unwrap();
        assert_eq!(customer.first_name, "Ana");
        assert_eq!(customer.cars.len(), 3);
        assert!(customer.cars.iter().all(|c| c.customer_id == 1));
    }

    #[tokio::test]
    async fn test_missing_customer_reads_as_zero_value() {
        let mut customers = MockCustomerRepository::new();
        let mut cars = MockCarRepository::new();
        customers.expect_find_by_id().returning(|_| Ok(None));
        cars.expect_list_by_customer().returning(|_| Ok(vec![]));

        let uow = TestUnitOfWork::new()
            .with_customers(customers)
            .with_cars(cars);
        let aggregator = ResourceAggregator::new(Arc::new(uow));

        assert!(aggregator.customer_with_cars(5).await.unwrap().is_none());
        let zero = aggregator.get_customer_with_cars(5).await.unwrap();
        assert!(!zero.exists());
        assert!(zero.cars.is_empty());
    }

    #[tokio::test]
    async fn test_car_with_services() {
        let mut cars = MockCarRepository::new();
        let mut services = MockServiceRepository::new();
        cars.expect_find_by_id()
            .with(eq(10))
            .times(1)
            .returning(|id| Ok(Some(car(id, 1))));
        services
            .expect_list_by_car()
            .with(eq(10))
            .times(1)
            .returning(|car_id| {
                Ok(vec![Service {
                    id: 100,
                    comment: "brake pads".into(),
                    miles: "42000".into(),
                    car_id,
                    ..Default::default()
                }])
            });

        let uow = TestUnitOfWork::new().with_cars(cars).with_services(services);
        let aggregator = ResourceAggregator::new(Arc::new(uow));

        let car = aggregator.get_car_with_services(10).await.unwrap();
        assert_eq!(car.services.len(), 1);
        assert_eq!(car.services[0].comment, "brake pads");
    }
}
