//! Migration: Add soft delete support to the customers, cars and services tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Tables receiving a `deleted_at` column, with the name of its index.
fn soft_delete_tables() -> [(SoftDeleteTable, &'static str); 3] {
    [
        (SoftDeleteTable::Customers, "idx_customers_deleted_at"),
        (SoftDeleteTable::Cars, "idx_cars_deleted_at"),
        (SoftDeleteTable::Services, "idx_services_deleted_at"),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, index) in soft_delete_tables() {
            // Add deleted_at column for soft delete
            manager
                .alter_table(
                    Table::alter()
                        .table(table)
                        .add_column(
                            ColumnDef::new(SoftDelete::DeletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Add index for efficient filtering of active rows
            manager
                .create_index(
                    Index::create()
                        .name(index)
                        .table(table)
                        .col(SoftDelete::DeletedAt)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, index) in soft_delete_tables() {
            // Drop the index first
            manager
                .drop_index(Index::drop().name(index).table(table).to_owned())
                .await?;

            manager
                .alter_table(
                    Table::alter()
                        .table(table)
                        .drop_column(SoftDelete::DeletedAt)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden, Clone, Copy)]
enum SoftDeleteTable {
    Customers,
    Cars,
    Services,
}

#[derive(Iden)]
enum SoftDelete {
    DeletedAt,
}
