use sea_orm::entity::prelude::*;

use crate::domain::DeliveryStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "deliveries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[sea_orm(column_type = "Text")]
    pub delivery_address: String,
    pub product_name: String,
    pub quantity: i32,
    pub delivery_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub special_instructions: Option<String>,
    pub status: DeliveryStatus,

    /// Bumped on every mutation; used for conditional updates.
    pub revision: i32,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
