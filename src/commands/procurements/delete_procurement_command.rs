use crate::{
    commands::Command,
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    models::procurement,
};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Soft-deletes a procurement header, keeping its ingredient lines for
/// audit.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProcurementCommand {
    pub procurement_id: Uuid,
}

#[async_trait::async_trait]
impl Command for DeleteProcurementCommand {
    type Result = ();

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();
        let now = Utc::now();

        let result = procurement::Entity::update_many()
            .set(procurement::ActiveModel {
                deleted_at: Set(Some(now)),
                updated_at: Set(now),
                updated_at_utc: Set(now),
                ..Default::default()
            })
            .filter(procurement::Column::Id.eq(self.procurement_id))
            .filter(procurement::Column::DeletedAt.is_null())
            .exec(db)
            .await
            .map_err(ServiceError::db_error)?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Procurement {} not found",
                self.procurement_id
            )));
        }

        info!(procurement_id = %self.procurement_id, "Procurement soft-deleted");
        event_sender
            .send(Event::ProcurementDeleted(self.procurement_id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }
}
