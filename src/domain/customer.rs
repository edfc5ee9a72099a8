//! Customer domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::Car;

/// Customer of the shop, root of the ownership tree.
///
/// The zero value (`id == 0`) stands for "no such customer" in read and
/// delete responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all customers, including soft-deleted ones
    pub phone: String,
    /// Owned cars; only populated by nested reads
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// False for the zero value returned in place of "not found".
    pub fn exists(&self) -> bool {
        self.id != 0
    }

    /// Check if customer is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Attach the owned cars for a nested read.
    pub fn with_cars(mut self, cars: Vec<Car>) -> Self {
        self.cars = cars;
        self
    }

    /// Replace every scalar field with the payload's value.
    ///
    /// Fields the client left out arrive as empty strings and blank the
    /// stored value; this is a full overlay, not a merge patch.
    pub fn overlay(&mut self, update: UpdateCustomer) {
        self.first_name = update.first_name;
        self.last_name = update.last_name;
        self.phone = update.phone;
    }
}

/// Customer creation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Customer update payload; absent fields decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCustomer {
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "Lopez")]
    pub last_name: String,
    #[validate(length(max = 100, message = "Phone number must be at most 100 characters"))]
    #[schema(example = "555-0100")]
    pub phone: String,
}
