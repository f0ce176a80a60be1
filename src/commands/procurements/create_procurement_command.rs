use crate::{
    commands::{
        orders::create_order_command::{check_order_references, CreateLineItem},
        Command,
    },
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    models::{procurement, procurement_ingredient, ProcurementStatus},
    queries::procurement_queries::{load_procurement_view, ProcurementWithItems},
};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use prometheus::IntCounter;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, Set, TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref PROCUREMENT_CREATIONS: IntCounter = IntCounter::new(
        "procurement_creations_total",
        "Total number of procurements created"
    )
    .expect("metric can be created");
    static ref PROCUREMENT_CREATION_FAILURES: IntCounter = IntCounter::new(
        "procurement_creation_failures_total",
        "Total number of failed procurement creations"
    )
    .expect("metric can be created");
}

/// Creates a procurement header together with its ingredient lines as a
/// single all-or-nothing write, under the same atomicity contract as
/// order creation.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateProcurementCommand {
    pub restaurant_id: Uuid,
    pub supplier_id: Uuid,
    pub note: Option<String>,
    pub expected_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<CreateLineItem>,
}

#[async_trait::async_trait]
impl Command for CreateProcurementCommand {
    type Result = ProcurementWithItems;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.check_input().map_err(|e| {
            PROCUREMENT_CREATION_FAILURES.inc();
            e
        })?;

        let db = db_pool.as_ref();

        let procurement_id = self.persist(db).await.map_err(|e| {
            PROCUREMENT_CREATION_FAILURES.inc();
            e
        })?;

        let view = load_procurement_view(db, procurement_id, false).await?;

        info!(
            procurement_id = %procurement_id,
            supplier_id = %self.supplier_id,
            items_count = %self.items.len(),
            "Procurement created successfully"
        );
        event_sender
            .send(Event::ProcurementCreated(procurement_id))
            .await
            .map_err(|e| {
                error!("Failed to send event for created procurement: {}", e);
                ServiceError::EventError(e)
            })?;

        PROCUREMENT_CREATIONS.inc();
        Ok(view)
    }
}

impl CreateProcurementCommand {
    fn check_input(&self) -> Result<(), ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid procurement input: {}", e);
            error!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;
        for item in &self.items {
            item.validate().map_err(|e| {
                let msg = format!("Invalid procurement item: {}", e);
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
        let note = self.note.clone();
        let expected_date = self.expected_date;
        let items = self.items.clone();

        db.transaction::<_, Uuid, ServiceError>(move |txn| {
            Box::pin(async move {
                check_order_references(txn, restaurant_id, supplier_id, &items).await?;

                let now = Utc::now();
                let procurement_id = Uuid::new_v4();
                let new_procurement = procurement::ActiveModel {
                    id: Set(procurement_id),
                    restaurant_id: Set(restaurant_id),
                    supplier_id: Set(supplier_id),
                    status: Set(ProcurementStatus::Pending),
                    note: Set(note),
                    expected_date: Set(expected_date),
                    created_at: Set(now),
                    created_at_utc: Set(now),
                    updated_at: Set(now),
                    updated_at_utc: Set(now),
                    deleted_at: Set(None),
                };
                new_procurement.insert(txn).await.map_err(|e| {
                    error!(
                        "Failed to create procurement for supplier {}: {}",
                        supplier_id, e
                    );
                    ServiceError::db_error(e)
                })?;

                for item in &items {
                    let new_item = procurement_ingredient::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        procurement_id: Set(procurement_id),
                        ingredient_id: Set(item.ingredient_id),
                        unit_id: Set(item.unit_id),
                        quantity: Set(item.quantity),
                        unit_cost: Set(item.unit_cost),
                        currency: Set(item.currency.clone()),
                        is_available: Set(true),
                        created_at: Set(now),
                        created_at_utc: Set(now),
                        updated_at: Set(now),
                        updated_at_utc: Set(now),
                        deleted_at: Set(None),
                    };
                    new_item.insert(txn).await.map_err(|e| {
                        error!(
                            "Failed to create procurement item for procurement {}: {}",
                            procurement_id, e
                        );
                        ServiceError::db_error(e)
                    })?;
                }

                Ok(procurement_id)
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })
    }
}
