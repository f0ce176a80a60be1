use crate::{
    commands::{
        procurements::{
            create_procurement_command::CreateProcurementCommand,
            delete_procurement_command::DeleteProcurementCommand,
            update_procurement_status_command::UpdateProcurementStatusCommand,
        },
        Command,
    },
    db::DbPool,
    errors::ServiceError,
    events::EventSender,
    models::{procurement, ProcurementStatus},
    queries::{
        order_queries::CurrencyTotal,
        procurement_queries::{
            GetProcurementQuery, ListProcurementsQuery, ProcurementTotalsQuery,
            ProcurementWithItems,
        },
        Query,
    },
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Procurement ledger service.
#[derive(Clone)]
pub struct ProcurementService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ProcurementService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a procurement with its ingredient lines atomically.
    #[instrument(skip(self, command))]
    pub async fn create_procurement(
        &self,
        command: CreateProcurementCommand,
    ) -> Result<ProcurementWithItems, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Transitions a procurement to a new status.
    #[instrument(skip(self))]
    pub async fn update_procurement_status(
        &self,
        procurement_id: Uuid,
        new_status: ProcurementStatus,
    ) -> Result<procurement::Model, ServiceError> {
        UpdateProcurementStatusCommand {
            procurement_id,
            new_status,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await
    }

    /// Soft-deletes a procurement.
    #[instrument(skip(self))]
    pub async fn delete_procurement(&self, procurement_id: Uuid) -> Result<(), ServiceError> {
        DeleteProcurementCommand { procurement_id }
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Gets a procurement with its ingredient lines.
    #[instrument(skip(self))]
    pub async fn get_procurement(
        &self,
        procurement_id: Uuid,
    ) -> Result<ProcurementWithItems, ServiceError> {
        GetProcurementQuery {
            procurement_id,
            include_deleted: false,
        }
        .execute(self.db_pool.as_ref())
        .await
    }

    /// Lists non-deleted procurements, newest first.
    #[instrument(skip(self))]
    pub async fn list_procurements(&self) -> Result<Vec<ProcurementWithItems>, ServiceError> {
        ListProcurementsQuery.execute(self.db_pool.as_ref()).await
    }

    /// Per-currency totals of one procurement.
    #[instrument(skip(self))]
    pub async fn procurement_totals(
        &self,
        procurement_id: Uuid,
    ) -> Result<Vec<CurrencyTotal>, ServiceError> {
        ProcurementTotalsQuery { procurement_id }
            .execute(self.db_pool.as_ref())
            .await
    }
}
