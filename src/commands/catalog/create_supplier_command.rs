use crate::{
    commands::Command,
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    models::supplier,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Creates a supplier. Suppliers have no foreign dependencies, so this
/// is a single validated insert.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateSupplierCommand {
    #[validate(length(min = 1, message = "Supplier name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Supplier category is required"))]
    pub category: String,
    #[validate(email(message = "Invalid supplier email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[async_trait::async_trait]
impl Command for CreateSupplierCommand {
    type Result = supplier::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid supplier input: {}", e);
            error!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;

        let now = Utc::now();
        let new_supplier = supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name.clone()),
            category: Set(self.category.clone()),
            email: Set(self.email.clone()),
            phone: Set(self.phone.clone()),
            address: Set(self.address.clone()),
            notes: Set(self.notes.clone()),
            active: Set(true),
            created_at: Set(now),
            created_at_utc: Set(now),
            updated_at: Set(now),
            updated_at_utc: Set(now),
            deleted_at: Set(None),
        };

        let saved = new_supplier.insert(db_pool.as_ref()).await.map_err(|e| {
            error!("Failed to create supplier '{}': {}", self.name, e);
            ServiceError::db_error(e)
        })?;

        info!(supplier_id = %saved.id, name = %saved.name, "Supplier created");
        event_sender
            .send(Event::SupplierCreated(saved.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(saved)
    }
}
