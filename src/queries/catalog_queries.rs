use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    db::DbPool,
    errors::ServiceError,
    models::{ingredient, ingredient_supplier, supplier},
    queries::Query,
    services::units::convert_quantity,
};

/// A supplier offer joined with supplier display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferView {
    pub offer_id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub unit_cost: f64,
    pub currency: String,
    pub pack_size: String,
    pub pack_quantity: f64,
    pub pack_unit_id: Option<Uuid>,
}

/// An ingredient together with its current supplier offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientOffersView {
    pub ingredient: ingredient::Model,
    pub offers: Vec<OfferView>,
}

/// A supplier's offer normalized to cost per canonical unit of the
/// ingredient, so packs quoted in different units compare directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierComparisonRow {
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub unit_cost: f64,
    pub currency: String,
    pub pack_size: String,
    /// Pack cost divided by the pack contents expressed in the
    /// ingredient's canonical unit.
    pub normalized_unit_cost: f64,
}

/// The current offer per supplier: newest non-deleted row for each
/// (ingredient, supplier) pair, from active suppliers only. Earlier
/// rows stay in the table as price history.
async fn current_offers<C: ConnectionTrait>(
    db: &C,
    ingredient_id: Uuid,
) -> Result<Vec<(ingredient_supplier::Model, supplier::Model)>, ServiceError> {
    let rows = ingredient_supplier::Entity::find()
        .filter(ingredient_supplier::Column::IngredientId.eq(ingredient_id))
        .filter(ingredient_supplier::Column::DeletedAt.is_null())
        .order_by_desc(ingredient_supplier::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::DatabaseError)?;

    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut offers = Vec::new();
    for row in rows {
        if !seen.insert(row.supplier_id) {
            continue;
        }
        let supplier = supplier::Entity::find_by_id(row.supplier_id)
            .filter(supplier::Column::DeletedAt.is_null())
            .filter(supplier::Column::Active.eq(true))
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        if let Some(supplier) = supplier {
            offers.push((row, supplier));
        }
    }
    Ok(offers)
}

/// List active suppliers ordered by name.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListSuppliersQuery;

#[async_trait]
impl Query for ListSuppliersQuery {
    type Result = Vec<supplier::Model>;

    #[instrument(skip(self, db))]
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError> {
        supplier::Entity::find()
            .filter(supplier::Column::DeletedAt.is_null())
            .filter(supplier::Column::Active.eq(true))
            .order_by_asc(supplier::Column::Name)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}

/// List active ingredients with their current offers. Ingredients are
/// ordered by name; offers within each ingredient by ascending pack
/// cost.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListIngredientsWithOffersQuery;

#[async_trait]
impl Query for ListIngredientsWithOffersQuery {
    type Result = Vec<IngredientOffersView>;

    #[instrument(skip(self, db))]
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError> {
        let ingredients = ingredient::Entity::find()
            .filter(ingredient::Column::DeletedAt.is_null())
            .filter(ingredient::Column::Active.eq(true))
            .order_by_asc(ingredient::Column::Name)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let mut views = Vec::with_capacity(ingredients.len());
        for ingredient in ingredients {
            let mut offers: Vec<OfferView> = current_offers(db, ingredient.id)
                .await?
                .into_iter()
                .map(|(offer, supplier)| OfferView {
                    offer_id: offer.id,
                    supplier_id: supplier.id,
                    supplier_name: supplier.name,
                    unit_cost: offer.unit_cost,
                    currency: offer.currency,
                    pack_size: offer.pack_size,
                    pack_quantity: offer.pack_quantity,
                    pack_unit_id: offer.pack_unit_id,
                })
                .collect();
            offers.sort_by(|a, b| {
                a.unit_cost
                    .total_cmp(&b.unit_cost)
                    .then_with(|| a.supplier_name.cmp(&b.supplier_name))
            });
            views.push(IngredientOffersView { ingredient, offers });
        }
        Ok(views)
    }
}

/// Compare the current offers for one ingredient across suppliers,
/// normalized to cost per canonical unit. Cheapest first; ties break on
/// supplier name.
#[derive(Debug, Serialize, Deserialize)]
pub struct SupplierComparisonQuery {
    pub ingredient_id: Uuid,
}

#[async_trait]
impl Query for SupplierComparisonQuery {
    type Result = Vec<SupplierComparisonRow>;

    #[instrument(skip(self, db), fields(ingredient_id = %self.ingredient_id))]
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError> {
        let ingredient = ingredient::Entity::find_by_id(self.ingredient_id)
            .filter(ingredient::Column::DeletedAt.is_null())
            .filter(ingredient::Column::Active.eq(true))
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Ingredient {} not found", self.ingredient_id))
            })?;

        let mut rows = Vec::new();
        for (offer, supplier) in current_offers(db, ingredient.id).await? {
            // Pack contents in canonical units; a missing pack unit means
            // the pack was quoted in the canonical unit already.
            let canonical_quantity = match offer.pack_unit_id {
                Some(pack_unit_id) => {
                    convert_quantity(db, offer.pack_quantity, pack_unit_id, ingredient.canonical_unit_id)
                        .await?
                }
                None => offer.pack_quantity,
            };
            if !(canonical_quantity > 0.0) {
                return Err(ServiceError::InternalError(format!(
                    "Offer {} resolves to a non-positive pack quantity",
                    offer.id
                )));
            }

            rows.push(SupplierComparisonRow {
                supplier_id: supplier.id,
                supplier_name: supplier.name,
                unit_cost: offer.unit_cost,
                currency: offer.currency,
                pack_size: offer.pack_size,
                normalized_unit_cost: offer.unit_cost / canonical_quantity,
            });
        }

        rows.sort_by(|a, b| {
            a.normalized_unit_cost
                .total_cmp(&b.normalized_unit_cost)
                .then_with(|| a.supplier_name.cmp(&b.supplier_name))
        });
        Ok(rows)
    }
}
