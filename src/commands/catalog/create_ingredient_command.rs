use crate::{
    commands::Command,
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    models::{ingredient, ingredient_supplier, supplier, Tags},
    services::units::{conversion_factor, find_active_unit},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// One supplier offer recorded alongside a new ingredient.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct IngredientOfferInput {
    pub supplier_id: Uuid,
    /// Cost of one pack.
    #[validate(range(min = 0.0, message = "Unit cost must be non-negative"))]
    pub unit_cost: f64,
    #[validate(length(min = 1, message = "Currency is required"))]
    pub currency: String,
    /// Display form of the pack ("5 kg bag").
    #[validate(length(min = 1, message = "Pack size is required"))]
    pub pack_size: String,
    /// Structured pack contents, in `pack_unit_id` units.
    pub pack_quantity: f64,
    /// None means the pack is quoted in the ingredient's canonical unit.
    pub pack_unit_id: Option<Uuid>,
}

/// Creates an ingredient together with its supplier offers as one
/// atomic unit: an unknown supplier or unit on any offer leaves nothing
/// persisted.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateIngredientCommand {
    #[validate(length(min = 1, message = "Ingredient name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[validate(range(min = 0.0, message = "Par level must be non-negative"))]
    pub par_level: f64,
    #[validate(range(min = 0.0, message = "Quantity must be non-negative"))]
    pub quantity: f64,
    pub canonical_unit_id: Uuid,
    #[validate]
    pub offers: Vec<IngredientOfferInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientWithOffers {
    pub ingredient: ingredient::Model,
    pub offers: Vec<ingredient_supplier::Model>,
}

#[async_trait::async_trait]
impl Command for CreateIngredientCommand {
    type Result = IngredientWithOffers;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid ingredient input: {}", e);
            error!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;
        for offer in &self.offers {
            if offer.pack_quantity <= 0.0 {
                return Err(ServiceError::ValidationError(format!(
                    "Pack quantity must be positive for offer from supplier {}",
                    offer.supplier_id
                )));
            }
        }

        let db = db_pool.as_ref();
        let ingredient_id = self.persist(db).await?;

        // Re-read the committed rows so the caller observes exactly what
        // was stored, including server-assigned ids and timestamps.
        let ingredient = ingredient::Entity::find_by_id(ingredient_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "Ingredient {} missing after commit",
                    ingredient_id
                ))
            })?;
        let offers = ingredient_supplier::Entity::find()
            .filter(ingredient_supplier::Column::IngredientId.eq(ingredient_id))
            .order_by_asc(ingredient_supplier::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        info!(
            ingredient_id = %ingredient.id,
            offers = offers.len(),
            "Ingredient created"
        );
        event_sender
            .send(Event::IngredientCreated(ingredient.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(IngredientWithOffers { ingredient, offers })
    }
}

impl CreateIngredientCommand {
    async fn persist(&self, db: &DatabaseConnection) -> Result<Uuid, ServiceError> {
        let name = self.name.clone();
        let description = self.description.clone();
        let tags = self.tags.clone();
        let par_level = self.par_level;
        let quantity = self.quantity;
        let canonical_unit_id = self.canonical_unit_id;
        let offers = self.offers.clone();

        db.transaction::<_, Uuid, ServiceError>(move |txn| {
            Box::pin(async move {
                let canonical = find_active_unit(txn, canonical_unit_id).await?;

                let now = Utc::now();
                let ingredient_id = Uuid::new_v4();
                let new_ingredient = ingredient::ActiveModel {
                    id: Set(ingredient_id),
                    name: Set(name),
                    description: Set(description),
                    tags: Set(Tags(tags)),
                    par_level: Set(par_level),
                    quantity: Set(quantity),
                    canonical_unit_id: Set(canonical.id),
                    active: Set(true),
                    created_at: Set(now),
                    created_at_utc: Set(now),
                    updated_at: Set(now),
                    updated_at_utc: Set(now),
                    deleted_at: Set(None),
                };
                new_ingredient.insert(txn).await.map_err(|e| {
                    error!("Failed to create ingredient: {}", e);
                    ServiceError::db_error(e)
                })?;

                for offer in &offers {
                    let supplier = supplier::Entity::find_by_id(offer.supplier_id)
                        .filter(supplier::Column::DeletedAt.is_null())
                        .filter(supplier::Column::Active.eq(true))
                        .one(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Supplier {} not found",
                                offer.supplier_id
                            ))
                        })?;

                    // A structured pack unit must be convertible to the
                    // ingredient's canonical unit for cost comparison.
                    if let Some(pack_unit_id) = offer.pack_unit_id {
                        let pack_unit = find_active_unit(txn, pack_unit_id).await?;
                        conversion_factor(txn, &pack_unit, &canonical).await?;
                    }

                    let new_offer = ingredient_supplier::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        ingredient_id: Set(ingredient_id),
                        supplier_id: Set(supplier.id),
                        unit_cost: Set(offer.unit_cost),
                        currency: Set(offer.currency.clone()),
                        pack_size: Set(offer.pack_size.clone()),
                        pack_quantity: Set(offer.pack_quantity),
                        pack_unit_id: Set(offer.pack_unit_id),
                        created_at: Set(now),
                        created_at_utc: Set(now),
                        updated_at: Set(now),
                        updated_at_utc: Set(now),
                        deleted_at: Set(None),
                    };
                    new_offer.insert(txn).await.map_err(|e| {
                        error!(
                            "Failed to create offer for supplier {}: {}",
                            supplier.id, e
                        );
                        ServiceError::db_error(e)
                    })?;
                }

                Ok(ingredient_id)
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })
    }
}
