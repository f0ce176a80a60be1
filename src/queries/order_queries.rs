use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    db::DbPool,
    errors::ServiceError,
    models::{ingredient, order, order_item, supplier, unit},
    queries::Query,
};

/// One line of an order, joined with ingredient and unit display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub unit_id: Uuid,
    pub unit_symbol: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub currency: String,
}

/// Fully populated order view: header, supplier, items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: order::Model,
    pub supplier_name: String,
    pub items: Vec<OrderItemView>,
}

/// Sum of quantity x unit cost for one currency tag. Items with
/// different currencies are never summed together; exchange-rate logic
/// is out of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyTotal {
    pub currency: String,
    pub total: f64,
}

/// Group item amounts by currency. Result is ordered by currency code,
/// so the sum per currency is independent of item order up to
/// floating-point tolerance.
pub fn currency_totals(items: &[OrderItemView]) -> Vec<CurrencyTotal> {
    let mut by_currency: BTreeMap<&str, f64> = BTreeMap::new();
    for item in items {
        *by_currency.entry(item.currency.as_str()).or_insert(0.0) +=
            item.quantity * item.unit_cost;
    }
    by_currency
        .into_iter()
        .map(|(currency, total)| CurrencyTotal {
            currency: currency.to_string(),
            total,
        })
        .collect()
}

/// Load an order with its items and supplier detail.
///
/// Generic over the connection so the ledger writer can reuse it for
/// the post-commit re-read. `include_deleted` exposes soft-deleted
/// headers for audit.
pub async fn load_order_view<C: ConnectionTrait>(
    db: &C,
    order_id: Uuid,
    include_deleted: bool,
) -> Result<OrderWithItems, ServiceError> {
    let mut query = order::Entity::find_by_id(order_id);
    if !include_deleted {
        query = query.filter(order::Column::DeletedAt.is_null());
    }
    let order = query
        .one(db)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

    let supplier_name = supplier::Entity::find_by_id(order.supplier_id)
        .one(db)
        .await
        .map_err(ServiceError::DatabaseError)?
        .map(|s| s.name)
        .unwrap_or_default();

    let rows = order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .filter(order_item::Column::DeletedAt.is_null())
        .order_by_asc(order_item::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::DatabaseError)?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        // Display lookups ignore soft-delete so audit reads still render.
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

        items.push(OrderItemView {
            id: row.id,
            ingredient_id: row.ingredient_id,
            ingredient_name,
            unit_id: row.unit_id,
            unit_symbol,
            quantity: row.quantity,
            unit_cost: row.unit_cost,
            currency: row.currency,
        });
    }

    Ok(OrderWithItems {
        order,
        supplier_name,
        items,
    })
}

/// Get a specific order with items and supplier detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetOrderQuery {
    pub order_id: Uuid,
    /// Expose soft-deleted headers (audit reads).
    pub include_deleted: bool,
}

#[async_trait]
impl Query for GetOrderQuery {
    type Result = OrderWithItems;

    #[instrument(skip(self, db), fields(order_id = %self.order_id))]
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError> {
        load_order_view(db, self.order_id, self.include_deleted).await
    }
}

/// List all non-deleted orders, newest first, with items and supplier
/// detail.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListOrdersQuery;

#[async_trait]
impl Query for ListOrdersQuery {
    type Result = Vec<OrderWithItems>;

    #[instrument(skip(self, db))]
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError> {
        let headers = order::Entity::find()
            .filter(order::Column::DeletedAt.is_null())
            .order_by_desc(order::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let mut views = Vec::with_capacity(headers.len());
        for header in headers {
            views.push(load_order_view(db, header.id, false).await?);
        }
        Ok(views)
    }
}

/// Per-currency totals of one order.
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderTotalsQuery {
    pub order_id: Uuid,
}

#[async_trait]
impl Query for OrderTotalsQuery {
    type Result = Vec<CurrencyTotal>;

    #[instrument(skip(self, db), fields(order_id = %self.order_id))]
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError> {
        let view = load_order_view(db, self.order_id, false).await?;
        Ok(currency_totals(&view.items))
    }
}
