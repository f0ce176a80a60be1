use crate::{
    commands::Command,
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    models::{unit, UnitType},
    services::units::find_active_unit,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Registers a unit of measure in the conversion registry.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterUnitCommand {
    #[validate(length(min = 1, message = "Unit name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Unit symbol is required"))]
    pub symbol: String,
    pub unit_type: UnitType,
    /// Conversion target; None registers a base unit.
    pub base_unit_id: Option<Uuid>,
    /// Ratio to the base unit. Ignored (stored as 1.0) for base units.
    pub multiplier: f64,
}

#[async_trait::async_trait]
impl Command for RegisterUnitCommand {
    type Result = unit::Model;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid unit input: {}", e);
            error!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;
        if self.base_unit_id.is_some() && self.multiplier <= 0.0 {
            return Err(ServiceError::ValidationError(
                "Unit multiplier must be positive".to_string(),
            ));
        }

        let db = db_pool.as_ref();

        // A base-unit reference must resolve and share the unit type.
        if let Some(base_id) = self.base_unit_id {
            let base = find_active_unit(db, base_id).await.map_err(|e| match e {
                ServiceError::NotFound(_) => ServiceError::InvalidBaseUnit(format!(
                    "Base unit {} does not exist or is inactive",
                    base_id
                )),
                other => other,
            })?;
            if base.unit_type != self.unit_type {
                return Err(ServiceError::InvalidBaseUnit(format!(
                    "Base unit {} is {} but unit '{}' is {}",
                    base_id, base.unit_type, self.name, self.unit_type
                )));
            }
        }

        let now = Utc::now();
        let new_unit = unit::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name.clone()),
            symbol: Set(self.symbol.clone()),
            unit_type: Set(self.unit_type),
            base_unit_id: Set(self.base_unit_id),
            multiplier: Set(if self.base_unit_id.is_some() {
                self.multiplier
            } else {
                1.0
            }),
            active: Set(true),
            created_at: Set(now),
            created_at_utc: Set(now),
            updated_at: Set(now),
            updated_at_utc: Set(now),
            deleted_at: Set(None),
        };

        let saved = new_unit.insert(db).await.map_err(|e| {
            error!("Failed to register unit '{}': {}", self.name, e);
            ServiceError::db_error(e)
        })?;

        info!(unit_id = %saved.id, symbol = %saved.symbol, "Unit registered");
        event_sender
            .send(Event::UnitRegistered(saved.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(saved)
    }
}
