use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `suppliers` table. Suppliers have no foreign dependencies.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub category: String,

    pub email: Option<String>,

    pub phone: Option<String>,

    pub address: Option<String>,

    pub notes: Option<String>,

    pub active: bool,

    pub created_at: DateTime<Utc>,

    pub created_at_utc: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub updated_at_utc: DateTime<Utc>,

    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::models::ingredient_supplier::Entity")]
    IngredientSuppliers,
    #[sea_orm(has_many = "crate::models::order::Entity")]
    Orders,
    #[sea_orm(has_many = "crate::models::procurement::Entity")]
    Procurements,
}

impl Related<crate::models::ingredient_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IngredientSuppliers.def()
    }
}

impl Related<crate::models::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
