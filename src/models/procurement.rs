use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a procurement.
///
/// Same shape as the order machine but procurement goods are received
/// rather than shipped: Pending -> Approved -> Received, with
/// Pending -> Rejected terminal.
#[derive(
    Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ProcurementStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    Approved,
    #[sea_orm(string_value = "Received")]
    Received,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

impl ProcurementStatus {
    pub fn allowed_transitions(&self) -> &'static [ProcurementStatus] {
        match self {
            ProcurementStatus::Pending => {
                &[ProcurementStatus::Approved, ProcurementStatus::Rejected]
            }
            ProcurementStatus::Approved => &[ProcurementStatus::Received],
            ProcurementStatus::Received => &[],
            ProcurementStatus::Rejected => &[],
        }
    }

    pub fn can_transition_to(&self, next: &ProcurementStatus) -> bool {
        self.allowed_transitions().contains(next)
    }
}

/// The `procurements` table: header row of a procurement with its
/// ingredient lines in `procurement_ingredients`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "procurements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub restaurant_id: Uuid,

    pub supplier_id: Uuid,

    pub status: ProcurementStatus,

    pub note: Option<String>,

    pub expected_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub created_at_utc: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub updated_at_utc: DateTime<Utc>,

    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::models::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "crate::models::restaurant::Column::Id"
    )]
    Restaurant,
    #[sea_orm(
        belongs_to = "crate::models::supplier::Entity",
        from = "Column::SupplierId",
        to = "crate::models::supplier::Column::Id"
    )]
    Supplier,
    #[sea_orm(has_many = "crate::models::procurement_ingredient::Entity")]
    Ingredients,
}

impl Related<crate::models::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<crate::models::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<crate::models::procurement_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_requires_approval_first() {
        assert!(ProcurementStatus::Pending.can_transition_to(&ProcurementStatus::Approved));
        assert!(ProcurementStatus::Approved.can_transition_to(&ProcurementStatus::Received));
        assert!(!ProcurementStatus::Pending.can_transition_to(&ProcurementStatus::Received));
    }

    #[test]
    fn rejected_procurement_is_terminal() {
        assert!(ProcurementStatus::Pending.can_transition_to(&ProcurementStatus::Rejected));
        assert!(ProcurementStatus::Rejected.allowed_transitions().is_empty());
        assert!(ProcurementStatus::Received.allowed_transitions().is_empty());
    }
}
