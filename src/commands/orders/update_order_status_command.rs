use crate::{
    commands::Command,
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    models::{order, OrderStatus},
};
use chrono::Utc;
use lazy_static::lazy_static;
use prometheus::IntCounter;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

lazy_static! {
    static ref ORDER_STATUS_UPDATES: IntCounter = IntCounter::new(
        "order_status_updates_total",
        "Total number of order status updates"
    )
    .expect("metric can be created");
    static ref ORDER_STATUS_UPDATE_FAILURES: IntCounter = IntCounter::new(
        "order_status_update_failures_total",
        "Total number of failed order status updates"
    )
    .expect("metric can be created");
}

/// Transitions an order along the status state machine.
///
/// The update is conditional on the status observed when the order was
/// loaded; a concurrent transition in between surfaces as
/// `ConcurrentModification` instead of silently overwriting it.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateOrderStatusCommand {
    pub order_id: Uuid,
    pub new_status: OrderStatus,
}

#[async_trait::async_trait]
impl Command for UpdateOrderStatusCommand {
    type Result = order::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();

        let current = order::Entity::find_by_id(self.order_id)
            .filter(order::Column::DeletedAt.is_null())
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ORDER_STATUS_UPDATE_FAILURES.inc();
                ServiceError::NotFound(format!("Order {} not found", self.order_id))
            })?;

        if !current.status.can_transition_to(&self.new_status) {
            ORDER_STATUS_UPDATE_FAILURES.inc();
            return Err(ServiceError::InvalidTransition {
                from: current.status.to_string(),
                to: self.new_status.to_string(),
            });
        }

        let now = Utc::now();
        let result = order::Entity::update_many()
            .set(order::ActiveModel {
                status: Set(self.new_status.clone()),
                updated_at: Set(now),
                updated_at_utc: Set(now),
                ..Default::default()
            })
            .filter(order::Column::Id.eq(self.order_id))
            .filter(order::Column::Status.eq(current.status.clone()))
            .filter(order::Column::DeletedAt.is_null())
            .exec(db)
            .await
            .map_err(|e| {
                ORDER_STATUS_UPDATE_FAILURES.inc();
                error!("Failed to update status of order {}: {}", self.order_id, e);
                ServiceError::db_error(e)
            })?;

        if result.rows_affected == 0 {
            ORDER_STATUS_UPDATE_FAILURES.inc();
            warn!(
                order_id = %self.order_id,
                expected = %current.status,
                "Order status changed concurrently"
            );
            return Err(ServiceError::ConcurrentModification(self.order_id));
        }

        let updated = order::Entity::find_by_id(self.order_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::InternalError(format!("Order {} missing after update", self.order_id))
            })?;

        info!(
            order_id = %updated.id,
            old_status = %current.status,
            new_status = %updated.status,
            "Order status updated"
        );
        event_sender
            .send(Event::OrderStatusChanged {
                order_id: updated.id,
                old_status: current.status.to_string(),
                new_status: updated.status.to_string(),
            })
            .await
            .map_err(ServiceError::EventError)?;

        ORDER_STATUS_UPDATES.inc();
        Ok(updated)
    }
}
