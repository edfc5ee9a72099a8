//! Car domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Service;

/// A car owned by exactly one customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub color: String,
    /// Unique across all cars, including soft-deleted ones
    pub vin: String,
    pub customer_id: i32,
    /// Service history; only populated by nested reads
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Car {
    /// False for the zero value returned in place of "not found".
    pub fn exists(&self) -> bool {
        self.id != 0
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }
}

/// Car creation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub color: String,
    pub vin: String,
    pub customer_id: i32,
}
