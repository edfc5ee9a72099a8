//! Service record repository implementation.

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::service::{self, ActiveModel, Entity as ServiceEntity};
use crate::domain::{NewService, Service};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service record repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Find active service record by ID (excludes soft-deleted)
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>>;

    /// Find service record by ID including soft-deleted
    async fn find_by_id_with_deleted(&self, id: i32) -> AppResult<Option<Service>>;

    /// List active service records for a car
    async fn list_by_car(&self, car_id: i32) -> AppResult<Vec<Service>>;

    /// List every service record for a car, soft-deleted ones included
    async fn list_by_car_with_deleted(&self, car_id: i32) -> AppResult<Vec<Service>>;

    /// Insert a new service record
    async fn create(&self, service: NewService) -> AppResult<Service>;

    /// Set `deleted_at` on one record
    async fn soft_delete(&self, id: i32) -> AppResult<u64>;

    /// Physically remove one record
    async fn hard_delete(&self, id: i32) -> AppResult<u64>;

    /// Physically remove every record for a car
    async fn hard_delete_by_car(&self, car_id: i32) -> AppResult<u64>;
}

/// SeaORM-backed service record store, generic over the connection handle.
pub struct ServiceStore<C = Arc<DatabaseConnection>> {
    db: C,
}

impl<C> ServiceStore<C> {
    /// Create new repository instance
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C> ServiceRepository for ServiceStore<C>
where
    C: Deref + Send + Sync,
    C::Target: ConnectionTrait + Sized + Send + Sync,
{
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>> {
        let result = ServiceEntity::find_by_id(id)
            .filter(service::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Service::from))
    }

    async fn find_by_id_with_deleted(&self, id: i32) -> AppResult<Option<Service>> {
        let result = ServiceEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Service::from))
    }

    async fn list_by_car(&self, car_id: i32) -> AppResult<Vec<Service>> {
        let models = ServiceEntity::find()
            .filter(service::Column::CarId.eq(car_id))
            .filter(service::Column::DeletedAt.is_null())
            .order_by_asc(service::Column::Id)
            .all(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Service::from).collect())
    }

    async fn list_by_car_with_deleted(&self, car_id: i32) -> AppResult<Vec<Service>> {
        let models = ServiceEntity::find()
            .filter(service::Column::CarId.eq(car_id))
            .order_by_asc(service::Column::Id)
            .all(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Service::from).collect())
    }

    async fn create(&self, service: NewService) -> AppResult<Service> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            comment: Set(service.comment),
            miles: Set(service.miles),
            car_id: Set(service.car_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Service::from(model))
    }

    async fn soft_delete(&self, id: i32) -> AppResult<u64> {
        let now = chrono::Utc::now();
        let result = ServiceEntity::update_many()
            .col_expr(service::Column::DeletedAt, Expr::value(now))
            .col_expr(service::Column::UpdatedAt, Expr::value(now))
            .filter(service::Column::Id.eq(id))
            .filter(service::Column::DeletedAt.is_null())
            .exec(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn hard_delete(&self, id: i32) -> AppResult<u64> {
        let result = ServiceEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn hard_delete_by_car(&self, car_id: i32) -> AppResult<u64> {
        let result = ServiceEntity::delete_many()
            .filter(service::Column::CarId.eq(car_id))
            .exec(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
