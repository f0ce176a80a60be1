use crate::{
    commands::{
        catalog::{
            create_ingredient_command::{CreateIngredientCommand, IngredientWithOffers},
            create_supplier_command::CreateSupplierCommand,
        },
        Command,
    },
    db::DbPool,
    errors::ServiceError,
    events::EventSender,
    models::supplier,
    queries::{
        catalog_queries::{
            IngredientOffersView, ListIngredientsWithOffersQuery, ListSuppliersQuery,
            SupplierComparisonQuery, SupplierComparisonRow,
        },
        Query,
    },
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Supplier and ingredient catalog service.
#[derive(Clone)]
pub struct CatalogService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl CatalogService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new supplier.
    #[instrument(skip(self, command))]
    pub async fn create_supplier(
        &self,
        command: CreateSupplierCommand,
    ) -> Result<supplier::Model, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Creates an ingredient with its supplier offers atomically.
    #[instrument(skip(self, command))]
    pub async fn create_ingredient(
        &self,
        command: CreateIngredientCommand,
    ) -> Result<IngredientWithOffers, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Lists active suppliers ordered by name.
    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        ListSuppliersQuery.execute(self.db_pool.as_ref()).await
    }

    /// Lists active ingredients with their current offers.
    #[instrument(skip(self))]
    pub async fn list_ingredients_with_offers(
        &self,
    ) -> Result<Vec<IngredientOffersView>, ServiceError> {
        ListIngredientsWithOffersQuery
            .execute(self.db_pool.as_ref())
            .await
    }

    /// Compares current supplier offers for one ingredient, normalized
    /// to cost per canonical unit.
    #[instrument(skip(self))]
    pub async fn supplier_comparison(
        &self,
        ingredient_id: Uuid,
    ) -> Result<Vec<SupplierComparisonRow>, ServiceError> {
        SupplierComparisonQuery { ingredient_id }
            .execute(self.db_pool.as_ref())
            .await
    }
}
