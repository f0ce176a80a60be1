use crate::{db::DbPool, errors::ServiceError};
use async_trait::async_trait;

/// Trait representing a generic asynchronous read over the ledger.
///
/// Queries never write; they reconstruct derived views from persisted
/// rows, reapplying unit normalization where needed.
#[async_trait]
pub trait Query: Send + Sync {
    type Result: Send + Sync;

    /// Executes the query using the provided database connection
    async fn execute(&self, db: &DbPool) -> Result<Self::Result, ServiceError>;
}

pub mod catalog_queries;
pub mod order_queries;
pub mod procurement_queries;
