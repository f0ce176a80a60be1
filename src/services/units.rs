use crate::{
    commands::{units::RegisterUnitCommand, Command},
    db::DbPool,
    errors::ServiceError,
    events::EventSender,
    models::unit,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Fetch a unit that is active and not soft-deleted.
///
/// Generic over the connection so ledger commands can run the same
/// lookup inside their transaction.
pub async fn find_active_unit<C: ConnectionTrait>(
    db: &C,
    unit_id: Uuid,
) -> Result<unit::Model, ServiceError> {
    unit::Entity::find_by_id(unit_id)
        .filter(unit::Column::DeletedAt.is_null())
        .filter(unit::Column::Active.eq(true))
        .one(db)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| ServiceError::NotFound(format!("Unit {} not found", unit_id)))
}

/// Resolve a unit to its ratio against the root of its base-unit chain.
///
/// A unit with no base reference is its own base (factor 1 regardless of
/// the stored multiplier). The walk tracks visited ids so malformed data
/// containing a cycle fails instead of looping.
pub async fn base_factor<C: ConnectionTrait>(
    db: &C,
    unit: &unit::Model,
) -> Result<f64, ServiceError> {
    let mut factor = 1.0_f64;
    let mut current = unit.clone();
    let mut visited: HashSet<Uuid> = HashSet::new();
    visited.insert(current.id);

    while let Some(base_id) = current.base_unit_id {
        if !visited.insert(base_id) {
            return Err(ServiceError::ConversionCycle(base_id));
        }
        let base = find_active_unit(db, base_id).await?;
        if base.unit_type != current.unit_type {
            return Err(ServiceError::InvalidBaseUnit(format!(
                "Unit {} is {} but its base unit {} is {}",
                current.id, current.unit_type, base.id, base.unit_type
            )));
        }
        factor *= current.multiplier;
        current = base;
    }

    Ok(factor)
}

/// Verify that `from` can be converted into `to`: same unit type and
/// both base chains resolvable. Returns the conversion factor.
pub async fn conversion_factor<C: ConnectionTrait>(
    db: &C,
    from: &unit::Model,
    to: &unit::Model,
) -> Result<f64, ServiceError> {
    if from.unit_type != to.unit_type {
        return Err(ServiceError::IncompatibleUnitType {
            from: from.unit_type.to_string(),
            to: to.unit_type.to_string(),
        });
    }
    let from_factor = base_factor(db, from).await?;
    let to_factor = base_factor(db, to).await?;
    Ok(from_factor / to_factor)
}

/// Convert a quantity between two registered units.
///
/// Pure floating-point multiplication/division: repeated conversions are
/// not round-trip-exact and callers comparing quantities must use a
/// tolerance.
pub async fn convert_quantity<C: ConnectionTrait>(
    db: &C,
    quantity: f64,
    from_id: Uuid,
    to_id: Uuid,
) -> Result<f64, ServiceError> {
    let from = find_active_unit(db, from_id).await?;
    let to = find_active_unit(db, to_id).await?;
    let factor = conversion_factor(db, &from, &to).await?;
    Ok(quantity * factor)
}

/// Unit conversion registry service.
#[derive(Clone)]
pub struct UnitService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl UnitService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Registers a new unit of measure.
    #[instrument(skip(self))]
    pub async fn register_unit(
        &self,
        command: RegisterUnitCommand,
    ) -> Result<unit::Model, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Converts a quantity from one unit to another.
    #[instrument(skip(self))]
    pub async fn convert(
        &self,
        quantity: f64,
        from_id: Uuid,
        to_id: Uuid,
    ) -> Result<f64, ServiceError> {
        convert_quantity(self.db_pool.as_ref(), quantity, from_id, to_id).await
    }

    /// Gets a unit by id (active, not soft-deleted).
    #[instrument(skip(self))]
    pub async fn get_unit(&self, unit_id: Uuid) -> Result<unit::Model, ServiceError> {
        find_active_unit(self.db_pool.as_ref(), unit_id).await
    }

    /// Lists all active units, ordered by name.
    #[instrument(skip(self))]
    pub async fn list_units(&self) -> Result<Vec<unit::Model>, ServiceError> {
        unit::Entity::find()
            .filter(unit::Column::DeletedAt.is_null())
            .filter(unit::Column::Active.eq(true))
            .order_by_asc(unit::Column::Name)
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
