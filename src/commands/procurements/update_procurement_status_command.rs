use crate::{
    commands::Command,
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    models::{procurement, ProcurementStatus},
};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Transitions a procurement along its status state machine, guarded by
/// the same optimistic expected-prior-state check as order transitions.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProcurementStatusCommand {
    pub procurement_id: Uuid,
    pub new_status: ProcurementStatus,
}

#[async_trait::async_trait]
impl Command for UpdateProcurementStatusCommand {
    type Result = procurement::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();

        let current = procurement::Entity::find_by_id(self.procurement_id)
            .filter(procurement::Column::DeletedAt.is_null())
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Procurement {} not found", self.procurement_id))
            })?;

        if !current.status.can_transition_to(&self.new_status) {
            return Err(ServiceError::InvalidTransition {
                from: current.status.to_string(),
                to: self.new_status.to_string(),
            });
        }

        let now = Utc::now();
        let result = procurement::Entity::update_many()
            .set(procurement::ActiveModel {
                status: Set(self.new_status.clone()),
                updated_at: Set(now),
                updated_at_utc: Set(now),
                ..Default::default()
            })
            .filter(procurement::Column::Id.eq(self.procurement_id))
            .filter(procurement::Column::Status.eq(current.status.clone()))
            .filter(procurement::Column::DeletedAt.is_null())
            .exec(db)
            .await
            .map_err(|e| {
                error!(
                    "Failed to update status of procurement {}: {}",
                    self.procurement_id, e
                );
                ServiceError::db_error(e)
            })?;

        if result.rows_affected == 0 {
            warn!(
                procurement_id = %self.procurement_id,
                expected = %current.status,
                "Procurement status changed concurrently"
            );
            return Err(ServiceError::ConcurrentModification(self.procurement_id));
        }

        let updated = procurement::Entity::find_by_id(self.procurement_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "Procurement {} missing after update",
                    self.procurement_id
                ))
            })?;

        info!(
            procurement_id = %updated.id,
            old_status = %current.status,
            new_status = %updated.status,
            "Procurement status updated"
        );
        event_sender
            .send(Event::ProcurementStatusChanged {
                procurement_id: updated.id,
                old_status: current.status.to_string(),
                new_status: updated.status.to_string(),
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }
}
