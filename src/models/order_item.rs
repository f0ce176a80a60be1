use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `order_items` table: one ingredient line of an order.
///
/// `quantity` is expressed in `unit_id` units, which must be convertible
/// to the ingredient's canonical unit. `unit_cost` is per one `unit_id`
/// unit, tagged with `currency`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub order_id: Uuid,

    pub ingredient_id: Uuid,

    pub unit_id: Uuid,

    pub quantity: f64,

    pub unit_cost: f64,

    pub currency: String,

    pub created_at: DateTime<Utc>,

    pub created_at_utc: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub updated_at_utc: DateTime<Utc>,

    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::models::order::Entity",
        from = "Column::OrderId",
        to = "crate::models::order::Column::Id"
    )]
    Order,
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

impl Related<crate::models::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
