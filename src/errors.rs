use sea_orm::error::DbErr;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Error type returned at every service boundary.
///
/// Storage failures carry the underlying [`DbErr`]; the (external)
/// transport layer is expected to render them as a generic operation
/// failure without leaking driver detail to end users.
#[derive(Error, Debug, Serialize)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(
        #[from]
        #[serde(skip)]
        DbErr,
    ),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    pub fn not_found_requisition(id: Uuid) -> Self {
        ServiceError::NotFound(format!("Requisition {} not found", id))
    }

    pub fn not_found_item(id: Uuid) -> Self {
        ServiceError::NotFound(format!("Requisition item {} not found", id))
    }
}
