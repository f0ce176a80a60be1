use sea_orm::error::DbErr;
use uuid::Uuid;

/// Error taxonomy for the supply-chain core.
///
/// Every public operation returns `Result<_, ServiceError>`. Only
/// `DatabaseError` is potentially transient; all other variants are
/// permanent for the given input and must not be retried unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Incompatible unit types: cannot convert {from} to {to}")]
    IncompatibleUnitType { from: String, to: String },

    #[error("Conversion cycle detected at unit {0}")]
    ConversionCycle(Uuid),

    #[error("Invalid base unit: {0}")]
    InvalidBaseUnit(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Concurrent modification of {0}")]
    ConcurrentModification(Uuid),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

pub trait IntoDbErr {
    fn into_db_err(self) -> DbErr;
}

impl IntoDbErr for DbErr {
    fn into_db_err(self) -> DbErr {
        self
    }
}

impl IntoDbErr for String {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self)
    }
}

impl IntoDbErr for &str {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self.to_string())
    }
}

impl ServiceError {
    /// Generic constructor that normalizes any supported database error input.
    pub fn db_error<E: IntoDbErr>(error: E) -> Self {
        ServiceError::DatabaseError(error.into_db_err())
    }

    /// True when retrying the same input could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ServiceError::DatabaseError(_))
    }
}
