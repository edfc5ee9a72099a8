//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_customers_table;
mod m20240101_000002_create_cars_table;
mod m20240101_000003_create_services_table;
mod m20240102_000001_add_soft_delete;

/// Width of the unique phone and VIN columns.
const MAX_UNIQUE_COLUMN_LENGTH: u32 = 100;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customers_table::Migration),
            Box::new(m20240101_000002_create_cars_table::Migration),
            Box::new(m20240101_000003_create_services_table::Migration),
            Box::new(m20240102_000001_add_soft_delete::Migration),
        ]
    }
}
