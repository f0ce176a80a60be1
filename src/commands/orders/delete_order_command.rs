use crate::{
    commands::Command,
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    models::order,
};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Soft-deletes an order header. Items are kept for audit; they stop
/// appearing in default reads only because their header does.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteOrderCommand {
    pub order_id: Uuid,
}

#[async_trait::async_trait]
impl Command for DeleteOrderCommand {
    type Result = ();

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();
        let now = Utc::now();

        let result = order::Entity::update_many()
            .set(order::ActiveModel {
                deleted_at: Set(Some(now)),
                updated_at: Set(now),
                updated_at_utc: Set(now),
                ..Default::default()
            })
            .filter(order::Column::Id.eq(self.order_id))
            .filter(order::Column::DeletedAt.is_null())
            .exec(db)
            .await
            .map_err(ServiceError::db_error)?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Order {} not found",
                self.order_id
            )));
        }

        info!(order_id = %self.order_id, "Order soft-deleted");
        event_sender
            .send(Event::OrderDeleted(self.order_id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }
}
