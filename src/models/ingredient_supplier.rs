use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `ingredient_suppliers` table: one supplier offer for one
/// ingredient.
///
/// (ingredient, supplier) pairs are deliberately not unique — offers are
/// recorded historically. The current offer for a pair is the most
/// recent non-deleted row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredient_suppliers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub ingredient_id: Uuid,

    pub supplier_id: Uuid,

    /// Cost of one pack.
    pub unit_cost: f64,

    pub currency: String,

    /// Display form of the pack ("5 kg bag").
    pub pack_size: String,

    /// Structured pack contents, in `pack_unit_id` units.
    pub pack_quantity: f64,

    /// None means the pack is quoted in the ingredient's canonical unit.
    pub pack_unit_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,

    pub created_at_utc: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub updated_at_utc: DateTime<Utc>,

    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::models::ingredient::Entity",
        from = "Column::IngredientId",
        to = "crate::models::ingredient::Column::Id"
    )]
    Ingredient,
    #[sea_orm(
        belongs_to = "crate::models::supplier::Entity",
        from = "Column::SupplierId",
        to = "crate::models::supplier::Column::Id"
    )]
    Supplier,
}

impl Related<crate::models::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredient.def()
    }
}

impl Related<crate::models::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
