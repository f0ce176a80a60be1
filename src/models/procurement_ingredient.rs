use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `procurement_ingredients` table: one ingredient line of a
/// procurement. Mirrors `order_items` plus the supplier-reported
/// availability flag.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "procurement_ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub procurement_id: Uuid,

    pub ingredient_id: Uuid,

    pub unit_id: Uuid,

    pub quantity: f64,

    pub unit_cost: f64,

    pub currency: String,

    pub is_available: bool,

    pub created_at: DateTime<Utc>,

    pub created_at_utc: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub updated_at_utc: DateTime<Utc>,

    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::models::procurement::Entity",
        from = "Column::ProcurementId",
        to = "crate::models::procurement::Column::Id"
    )]
    Procurement,
    #[sea_orm(
        belongs_to = "crate::models::ingredient::Entity",
        from = "Column::IngredientId",
        to = "crate::models::ingredient::Column::Id"
    )]
    Ingredient,
    #[sea_orm(
        belongs_to = "crate::models::unit::Entity",
        from = "Column::UnitId",
        to = "crate::models::unit::Column::Id"
    )]
    Unit,
}

impl Related<crate::models::procurement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Procurement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
