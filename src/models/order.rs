use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a supplier order.
///
/// The lifecycle is a closed state machine validated centrally by the
/// status-update command: Pending -> Approved -> Shipped -> Delivered,
/// with Pending -> Rejected as the only terminal alternative.
#[derive(
    Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    Approved,
    #[sea_orm(string_value = "Shipped")]
    Shipped,
    #[sea_orm(string_value = "Delivered")]
    Delivered,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

impl OrderStatus {
    /// Outgoing edges of the status state machine.
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Approved, OrderStatus::Rejected],
            OrderStatus::Approved => &[OrderStatus::Shipped],
            OrderStatus::Shipped => &[OrderStatus::Delivered],
            OrderStatus::Delivered => &[],
            OrderStatus::Rejected => &[],
        }
    }

    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        self.allowed_transitions().contains(next)
    }
}

/// The `orders` table: header row of a multi-item supplier order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub restaurant_id: Uuid,

    pub supplier_id: Uuid,

    pub status: OrderStatus,

    pub created_at: DateTime<Utc>,

    pub created_at_utc: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub updated_at_utc: DateTime<Utc>,

    /// Soft-delete marker; cancelled headers keep their items for audit.
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
    #[sea_orm(has_many = "crate::models::order_item::Entity")]
    Items,
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

impl Related<crate::models::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_edges_are_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(&OrderStatus::Approved));
        assert!(OrderStatus::Approved.can_transition_to(&OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(&OrderStatus::Delivered));
    }

    #[test]
    fn rejection_is_only_reachable_from_pending() {
        assert!(OrderStatus::Pending.can_transition_to(&OrderStatus::Rejected));
        assert!(!OrderStatus::Approved.can_transition_to(&OrderStatus::Rejected));
        assert!(!OrderStatus::Shipped.can_transition_to(&OrderStatus::Rejected));
    }

    #[test]
    fn skipping_states_is_not_allowed() {
        assert!(!OrderStatus::Pending.can_transition_to(&OrderStatus::Shipped));
        assert!(!OrderStatus::Pending.can_transition_to(&OrderStatus::Delivered));
        assert!(!OrderStatus::Approved.can_transition_to(&OrderStatus::Delivered));
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        assert!(OrderStatus::Delivered.allowed_transitions().is_empty());
        assert!(OrderStatus::Rejected.allowed_transitions().is_empty());
    }
}
