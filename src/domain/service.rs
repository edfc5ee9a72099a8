//! Service record domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Work performed on a car. Leaf of the ownership tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i32,
    pub comment: String,
    /// Odometer reading at service time, kept as free text
    pub miles: String,
    pub car_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Service {
    /// False for the zero value returned in place of "not found".
    pub fn exists(&self) -> bool {
        self.id != 0
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Service creation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
    pub comment: String,
    pub miles: String,
    pub car_id: i32,
}
