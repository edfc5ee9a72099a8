//! Customer repository implementation with soft delete support.

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::customer::{self, ActiveModel, Entity as CustomerEntity};
use crate::domain::{Customer, NewCustomer};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Customer repository trait for dependency injection.
///
/// By default, all query methods exclude soft-deleted records.
/// Use `*_with_deleted` variants to include them. Deletes are idempotent
/// and report the number of rows touched.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find active customer by ID (excludes soft-deleted)
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>>;

    /// Find customer by ID including soft-deleted
    async fn find_by_id_with_deleted(&self, id: i32) -> AppResult<Option<Customer>>;

    /// Find customer by phone including soft-deleted
    async fn find_by_phone_with_deleted(&self, phone: &str) -> AppResult<Option<Customer>>;

    /// List all active customers in insertion order
    async fn list(&self) -> AppResult<Vec<Customer>>;

    /// Insert a new customer
    async fn create(&self, customer: NewCustomer) -> AppResult<Customer>;

    /// Replace every mutable column of an existing customer
    async fn update(&self, customer: Customer) -> AppResult<Customer>;

    /// Set `deleted_at`; the row keeps enforcing its phone constraint
    async fn soft_delete(&self, id: i32) -> AppResult<u64>;

    /// Physically remove the row, ignoring the soft delete marker
    async fn hard_delete(&self, id: i32) -> AppResult<u64>;
}

/// SeaORM-backed customer store.
///
/// Generic over the connection handle so the same queries run against the
/// pool (`Arc<DatabaseConnection>`) or inside a transaction
/// (`&DatabaseTransaction`).
pub struct CustomerStore<C = Arc<DatabaseConnection>> {
    db: C,
}

impl<C> CustomerStore<C> {
    /// Create new repository instance
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C> CustomerRepository for CustomerStore<C>
where
    C: Deref + Send + Sync,
    C::Target: ConnectionTrait + Sized + Send + Sync,
{
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find_by_id(id)
            .filter(customer::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn find_by_id_with_deleted(&self, id: i32) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn find_by_phone_with_deleted(&self, phone: &str) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find()
            .filter(customer::Column::Phone.eq(phone))
            .one(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn list(&self) -> AppResult<Vec<Customer>> {
        let models = CustomerEntity::find()
            .filter(customer::Column::DeletedAt.is_null())
            .order_by_asc(customer::Column::Id)
            .all(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Customer::from).collect())
    }

    async fn create(&self, customer: NewCustomer) -> AppResult<Customer> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            first_name: Set(customer.first_name),
            last_name: Set(customer.last_name),
            phone: Set(customer.phone),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Phone number"))?;

        Ok(Customer::from(model))
    }

    async fn update(&self, customer: Customer) -> AppResult<Customer> {
        let active = ActiveModel {
            id: Unchanged(customer.id),
            first_name: Set(customer.first_name),
            last_name: Set(customer.last_name),
            phone: Set(customer.phone),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active
            .update(&*self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Phone number"))?;

        Ok(Customer::from(model))
    }

    async fn soft_delete(&self, id: i32) -> AppResult<u64> {
        let now = chrono::Utc::now();
        let result = CustomerEntity::update_many()
            .col_expr(customer::Column::DeletedAt, Expr::value(now))
            .col_expr(customer::Column::UpdatedAt, Expr::value(now))
            .filter(customer::Column::Id.eq(id))
            .filter(customer::Column::DeletedAt.is_null())
            .exec(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn hard_delete(&self, id: i32) -> AppResult<u64> {
        let result = CustomerEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
