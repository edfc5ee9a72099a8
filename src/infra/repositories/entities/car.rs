//! Car database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Car;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub make: String,
    #[sea_orm(column_name = "model")]
    pub model_name: String,
    pub color: String,
    #[sea_orm(unique)]
    pub vin: String,
    pub customer_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::service::Entity")]
    Services,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Services.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Car {
    fn from(model: Model) -> Self {
        Car {
            id: model.id,
            make: model.make,
            model: model.model_name,
            color: model.color,
            vin: model.vin,
            customer_id: model.customer_id,
            services: Vec::new(),
            created_at: Some(model.created_at),
            updated_at: Some(model.updated_at),
            deleted_at: model.deleted_at,
        }
    }
}
