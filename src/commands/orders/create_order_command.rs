use crate::{
    commands::Command,
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    models::{ingredient, order, order_item, restaurant, supplier, OrderStatus},
    queries::order_queries::{load_order_view, OrderWithItems},
    services::units::{conversion_factor, find_active_unit},
};
use chrono::Utc;
use lazy_static::lazy_static;
use prometheus::IntCounter;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref ORDER_CREATIONS: IntCounter =
        IntCounter::new("order_creations_total", "Total number of orders created")
            .expect("metric can be created");
    static ref ORDER_CREATION_FAILURES: IntCounter = IntCounter::new(
        "order_creation_failures_total",
        "Total number of failed order creations"
    )
    .expect("metric can be created");
}

/// One ingredient line of a new order or procurement.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateLineItem {
    pub ingredient_id: Uuid,
    /// Unit the quantity is expressed in; must be convertible to the
    /// ingredient's canonical unit.
    pub unit_id: Uuid,
    pub quantity: f64,
    #[validate(range(min = 0.0, message = "Unit cost must be non-negative"))]
    pub unit_cost: f64,
    #[validate(length(min = 1, message = "Currency is required"))]
    pub currency: String,
}

/// Creates an order header together with its line items as a single
/// all-or-nothing write. Reference checks run inside the owning
/// transaction; a failure on any item rolls back the header and every
/// previously inserted item.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateOrderCommand {
    pub restaurant_id: Uuid,
    pub supplier_id: Uuid,
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<CreateLineItem>,
}

#[async_trait::async_trait]
impl Command for CreateOrderCommand {
    type Result = OrderWithItems;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.check_input().map_err(|e| {
            ORDER_CREATION_FAILURES.inc();
            e
        })?;

        let db = db_pool.as_ref();

        let order_id = self.persist(db).await.map_err(|e| {
            ORDER_CREATION_FAILURES.inc();
            e
        })?;

        // Re-read the committed header with its items and supplier so the
        // caller observes exactly what was durably stored.
        let view = load_order_view(db, order_id, false).await?;

        info!(
            order_id = %order_id,
            supplier_id = %self.supplier_id,
            items_count = %self.items.len(),
            "Order created successfully"
        );
        event_sender
            .send(Event::OrderCreated(order_id))
            .await
            .map_err(|e| {
                error!("Failed to send event for created order: {}", e);
                ServiceError::EventError(e)
            })?;

        ORDER_CREATIONS.inc();
        Ok(view)
    }
}

impl CreateOrderCommand {
    fn check_input(&self) -> Result<(), ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid order input: {}", e);
            error!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;
        for item in &self.items {
            item.validate().map_err(|e| {
                let msg = format!("Invalid order item: {}", e);
                error!("{}", msg);
                ServiceError::ValidationError(msg)
            })?;
            if item.quantity <= 0.0 {
                return Err(ServiceError::ValidationError(format!(
                    "Item quantity must be positive for ingredient {}",
                    item.ingredient_id
                )));
            }
        }
        Ok(())
    }

    async fn persist(&self, db: &DatabaseConnection) -> Result<Uuid, ServiceError> {
        let restaurant_id = self.restaurant_id;
        let supplier_id = self.supplier_id;
        let items = self.items.clone();

        db.transaction::<_, Uuid, ServiceError>(move |txn| {
            Box::pin(async move {
                check_order_references(txn, restaurant_id, supplier_id, &items).await?;

                let now = Utc::now();
                let order_id = Uuid::new_v4();
                let new_order = order::ActiveModel {
                    id: Set(order_id),
                    restaurant_id: Set(restaurant_id),
                    supplier_id: Set(supplier_id),
                    status: Set(OrderStatus::Pending),
                    created_at: Set(now),
                    created_at_utc: Set(now),
                    updated_at: Set(now),
                    updated_at_utc: Set(now),
                    deleted_at: Set(None),
                };
                new_order.insert(txn).await.map_err(|e| {
                    error!(
                        "Failed to create order for supplier {}: {}",
                        supplier_id, e
                    );
                    ServiceError::db_error(e)
                })?;

                for item in &items {
                    let new_item = order_item::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        order_id: Set(order_id),
                        ingredient_id: Set(item.ingredient_id),
                        unit_id: Set(item.unit_id),
                        quantity: Set(item.quantity),
                        unit_cost: Set(item.unit_cost),
                        currency: Set(item.currency.clone()),
                        created_at: Set(now),
                        created_at_utc: Set(now),
                        updated_at: Set(now),
                        updated_at_utc: Set(now),
                        deleted_at: Set(None),
                    };
                    new_item.insert(txn).await.map_err(|e| {
                        error!("Failed to create order item for order {}: {}", order_id, e);
                        ServiceError::db_error(e)
                    })?;
                }

                Ok(order_id)
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })
    }
}

/// Reference checks shared by the order and procurement ledger writers.
/// Runs inside the caller's transaction, before any row insert.
pub(crate) async fn check_order_references<C: ConnectionTrait>(
    txn: &C,
    restaurant_id: Uuid,
    supplier_id: Uuid,
    items: &[CreateLineItem],
) -> Result<(), ServiceError> {
    restaurant::Entity::find_by_id(restaurant_id)
        .filter(restaurant::Column::DeletedAt.is_null())
        .one(txn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| ServiceError::NotFound(format!("Restaurant {} not found", restaurant_id)))?;

    supplier::Entity::find_by_id(supplier_id)
        .filter(supplier::Column::DeletedAt.is_null())
        .filter(supplier::Column::Active.eq(true))
        .one(txn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| ServiceError::NotFound(format!("Supplier {} not found", supplier_id)))?;

    for item in items {
        let ing = ingredient::Entity::find_by_id(item.ingredient_id)
            .filter(ingredient::Column::DeletedAt.is_null())
            .filter(ingredient::Column::Active.eq(true))
            .one(txn)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Ingredient {} not found", item.ingredient_id))
            })?;

        let unit = find_active_unit(txn, item.unit_id).await?;
        let canonical = find_active_unit(txn, ing.canonical_unit_id).await?;
        conversion_factor(txn, &unit, &canonical).await?;
    }

    Ok(())
}
