use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Measurement dimension of a unit. Conversions are only defined
/// between units of the same type.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum UnitType {
    #[sea_orm(string_value = "Weight")]
    Weight,
    #[sea_orm(string_value = "Volume")]
    Volume,
    #[sea_orm(string_value = "Count")]
    Count,
}

/// The `units` table.
///
/// `multiplier` is the ratio of this unit to its base unit: one of this
/// unit equals `multiplier` of `base_unit_id`. A unit without a base
/// reference is its own base and converts with an effective multiplier
/// of 1 regardless of the stored value.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub symbol: String,

    pub unit_type: UnitType,

    /// Conversion target; None when this unit is a base unit.
    pub base_unit_id: Option<Uuid>,

    /// Ratio to the base unit (1 g = 0.001 kg => multiplier 0.001).
    pub multiplier: f64,

    pub active: bool,

    pub created_at: DateTime<Utc>,

    pub created_at_utc: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub updated_at_utc: DateTime<Utc>,

    /// Soft-delete marker; set rows are excluded from default reads.
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::BaseUnitId",
        to = "Column::Id"
    )]
    BaseUnit,
}

impl ActiveModelBehavior for ActiveModel {}
