//! Car repository implementation.

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::car::{self, ActiveModel, Entity as CarEntity};
use crate::domain::{Car, NewCar};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Car repository trait for dependency injection.
///
/// Owner lookups come in two flavours: the plain one serves reads, the
/// `_with_deleted` one serves the cascade walk, which must see every row
/// that still references the owner.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Find active car by ID (excludes soft-deleted)
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Car>>;

    /// Find car by ID including soft-deleted
    async fn find_by_id_with_deleted(&self, id: i32) -> AppResult<Option<Car>>;

    /// Find car by VIN including soft-deleted
    async fn find_by_vin_with_deleted(&self, vin: &str) -> AppResult<Option<Car>>;

    /// List all active cars
    async fn list(&self) -> AppResult<Vec<Car>>;

    /// List active cars owned by a customer
    async fn list_by_customer(&self, customer_id: i32) -> AppResult<Vec<Car>>;

    /// List every car owned by a customer, soft-deleted ones included
    async fn list_by_customer_with_deleted(&self, customer_id: i32) -> AppResult<Vec<Car>>;

    /// Insert a new car
    async fn create(&self, car: NewCar) -> AppResult<Car>;

    /// Set `deleted_at` on one car
    async fn soft_delete(&self, id: i32) -> AppResult<u64>;

    /// Physically remove one car
    async fn hard_delete(&self, id: i32) -> AppResult<u64>;

    /// Physically remove every car owned by a customer
    async fn hard_delete_by_customer(&self, customer_id: i32) -> AppResult<u64>;
}

/// SeaORM-backed car store, generic over the connection handle.
pub struct CarStore<C = Arc<DatabaseConnection>> {
    db: C,
}

impl<C> CarStore<C> {
    /// Create new repository instance
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C> CarRepository for CarStore<C>
where
    C: Deref + Send + Sync,
    C::Target: ConnectionTrait + Sized + Send + Sync,
{
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Car>> {
        let result = CarEntity::find_by_id(id)
            .filter(car::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Car::from))
    }

    async fn find_by_id_with_deleted(&self, id: i32) -> AppResult<Option<Car>> {
        let result = CarEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Car::from))
    }

    async fn find_by_vin_with_deleted(&self, vin: &str) -> AppResult<Option<Car>> {
        let result = CarEntity::find()
            .filter(car::Column::Vin.eq(vin))
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Car::from))
    }

    async fn list(&self) -> AppResult<Vec<Car>> {
        let models = CarEntity::find()
            .filter(car::Column::DeletedAt.is_null())
            .order_by_asc(car::Column::Id)
            .all(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Car::from).collect())
    }

    async fn list_by_customer(&self, customer_id: i32) -> AppResult<Vec<Car>> {
        let models = CarEntity::find()
            .filter(car::Column::CustomerId.eq(customer_id))
            .filter(car::Column::DeletedAt.is_null())
            .order_by_asc(car::Column::Id)
            .all(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Car::from).collect())
    }

    async fn list_by_customer_with_deleted(&self, customer_id: i32) -> AppResult<Vec<Car>> {
        let models = CarEntity::find()
            .filter(car::Column::CustomerId.eq(customer_id))
            .order_by_asc(car::Column::Id)
            .all(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Car::from).collect())
    }

    async fn create(&self, car: NewCar) -> AppResult<Car> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            make: Set(car.make),
            model_name: Set(car.model),
            color: Set(car.color),
            vin: Set(car.vin),
            customer_id: Set(car.customer_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "VIN"))?;

        Ok(Car::from(model))
    }

    async fn soft_delete(&self, id: i32) -> AppResult<u64> {
        let now = chrono::Utc::now();
        let result = CarEntity::update_many()
            .col_expr(car::Column::DeletedAt, Expr::value(now))
            .col_expr(car::Column::UpdatedAt, Expr::value(now))
            .filter(car::Column::Id.eq(id))
            .filter(car::Column::DeletedAt.is_null())
            .exec(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn hard_delete(&self, id: i32) -> AppResult<u64> {
        let result = CarEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn hard_delete_by_customer(&self, customer_id: i32) -> AppResult<u64> {
        let result = CarEntity::delete_many()
            .filter(car::Column::CustomerId.eq(customer_id))
            .exec(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
