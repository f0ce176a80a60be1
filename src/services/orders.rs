use crate::{
    commands::{
        orders::{
            create_order_command::CreateOrderCommand,
            delete_order_command::DeleteOrderCommand,
            update_order_status_command::UpdateOrderStatusCommand,
        },
        Command,
    },
    db::DbPool,
    errors::ServiceError,
    events::EventSender,
    models::{order, OrderStatus},
    queries::{
        order_queries::{
            CurrencyTotal, GetOrderQuery, ListOrdersQuery, OrderTotalsQuery, OrderWithItems,
        },
        Query,
    },
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Order ledger service.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates an order with its items atomically.
    #[instrument(skip(self, command))]
    pub async fn create_order(
        &self,
        command: CreateOrderCommand,
    ) -> Result<OrderWithItems, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Transitions an order to a new status.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<order::Model, ServiceError> {
        UpdateOrderStatusCommand {
            order_id,
            new_status,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await
    }

    /// Soft-deletes an order.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: Uuid) -> Result<(), ServiceError> {
        DeleteOrderCommand { order_id }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Gets an order with its items and supplier detail.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderWithItems, ServiceError> {
        GetOrderQuery {
            order_id,
            include_deleted: false,
        }
        .execute(self.db_pool.as_ref())
        .await
    }

    /// Lists non-deleted orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderWithItems>, ServiceError> {
        ListOrdersQuery.execute(self.db_pool.as_ref()).await
    }

    /// Per-currency totals of one order.
    #[instrument(skip(self))]
    pub async fn order_totals(&self, order_id: Uuid) -> Result<Vec<CurrencyTotal>, ServiceError> {
        OrderTotalsQuery { order_id }
            .execute(self.db_pool.as_ref())
            .await
    }
}
