use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-text labels attached to an ingredient, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Tags(pub Vec<String>);

/// The `ingredients` table.
///
/// `quantity` and `par_level` are recorded in the ingredient's canonical
/// unit and must be non-negative.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    #[sea_orm(column_type = "Json")]
    pub tags: Tags,

    /// Target stock level, in canonical units.
    pub par_level: f64,

    /// Current stock level, in canonical units.
    pub quantity: f64,

    /// Unit in which quantity and par level are recorded.
    pub canonical_unit_id: Uuid,

    pub active: bool,

    pub created_at: DateTime<Utc>,

    pub created_at_utc: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub updated_at_utc: DateTime<Utc>,

    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::models::unit::Entity",
        from = "Column::CanonicalUnitId",
        to = "crate::models::unit::Column::Id"
    )]
    CanonicalUnit,
    #[sea_orm(has_many = "crate::models::ingredient_supplier::Entity")]
    IngredientSuppliers,
}

impl Related<crate::models::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CanonicalUnit.def()
    }
}

impl Related<crate::models::ingredient_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IngredientSuppliers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
