use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    db::DbPool,
    errors::ServiceError,
    models::{ingredient, procurement, procurement_ingredient, supplier, unit},
    queries::{
        order_queries::{currency_totals, CurrencyTotal, OrderItemView},
        Query,
    },
};

/// Fully populated procurement view: header, supplier, ingredient lines.
///
/// Lines reuse [`OrderItemView`]; procurements carry the same quantity,
/// cost and currency shape as orders, plus per-line availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementWithItems {
    pub procurement: procurement::Model,
    pub supplier_name: String,
    pub items: Vec<ProcurementItemView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementItemView {
    #[serde(flatten)]
    pub line: OrderItemView,
    pub is_available: bool,
}

/// Load a procurement with its ingredient lines and supplier detail.
pub async fn load_procurement_view<C: ConnectionTrait>(
    db: &C,
    procurement_id: Uuid,
    include_deleted: bool,
) -> Result<ProcurementWithItems, ServiceError> {
    let mut query = procurement::Entity::find_by_id(procurement_id);
    if !include_deleted {
        query = query.filter(procurement::Column::DeletedAt.is_null());
    }
    let procurement = query
        .one(db)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Procurement {} not found", procurement_id))
        })?;

    let supplier_name = supplier::Entity::find_by_id(procurement.supplier_id)
        .one(db)
        .await
        .map_err(ServiceError::DatabaseError)?
        .map(|s| s.name)
        .unwrap_or_default();

    let rows = procurement_ingredient::Entity::find()
        .filter(procurement_ingredient::Column::ProcurementId.eq(procurement_id))
        .filter(procurement_ingredient::Column::DeletedAt.is_null())
        .order_by_asc(procurement_ingredient::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::DatabaseError)?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let ingredient_name = ingredient::Entity::find_by_id(row.ingredient_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .map(|i| i.name)
            .unwrap_or_default();
        let unit_symbol = unit::Entity::find_by_id(row.unit_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .map(|u| u.symbol)
            .unwrap_or_default();

        items.push(ProcurementItemView {
            line: OrderItemView {
                id: row.id,
                ingredient_id: row.ingredient_id,
                ingredient_name,
                unit_id: row.unit_id,
                unit_symbol,
                quantity: row.quantity,
                unit_cost: row.unit_cost,
                currency: row.currency,
            },
            is_available: row.is_available,
        });
    }

    Ok(ProcurementWithItems {
        procurement,
        supplier_name,
        items,
    })
}

/// Get a specific procurement with its ingredient lines.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetProcurementQuery {
    pub procurement_id: Uuid,
    pub include_deleted: bool,
}

#[async_trait]
impl Query for GetProcurementQuery {
    type Result = ProcurementWithItems;

    #[instrument(skip(self, db), fields(procurement_id = %self.procurement_id))]
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError> {
        load_procurement_view(db, self.procurement_id, self.include_deleted).await
    }
}

/// List all non-deleted procurements, newest first.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListProcurementsQuery;

#[async_trait]
impl Query for ListProcurementsQuery {
    type Result = Vec<ProcurementWithItems>;

    #[instrument(skip(self, db))]
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError> {
        let headers = procurement::Entity::find()
            .filter(procurement::Column::DeletedAt.is_null())
            .order_by_desc(procurement::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let mut views = Vec::with_capacity(headers.len());
        for header in headers {
            views.push(load_procurement_view(db, header.id, false).await?);
        }
        Ok(views)
    }
}

/// Per-currency totals of one procurement.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcurementTotalsQuery {
    pub procurement_id: Uuid,
}

#[async_trait]
impl Query for ProcurementTotalsQuery {
    type Result = Vec<CurrencyTotal>;

    #[instrument(skip(self, db), fields(procurement_id = %self.procurement_id))]
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError> {
        let view = load_procurement_view(db, self.procurement_id, false).await?;
        let lines: Vec<OrderItemView> = view.items.into_iter().map(|i| i.line).collect();
        Ok(currency_totals(&lines))
    }
}
