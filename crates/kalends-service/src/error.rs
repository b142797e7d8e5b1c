use kalends_core::types::DocumentReference;
use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Casbin error: {0}")]
    CasbinError(#[from] casbin::Error),

    #[error(transparent)]
    StoreError(#[from] kalends_store::StoreError),

    #[error(transparent)]
    CoreError(#[from] kalends_core::error::CoreError),

    #[error("Policy file error: {0}")]
    PolicyIo(#[from] std::io::Error),

    #[error("Document [{0}] not found")]
    DocumentNotFound(DocumentReference),

    /// A document matched a search but lacks the record the search implied.
    #[error("Data inconsistency: [{reference}] contains no {expected}")]
    DataInconsistency {
        reference: DocumentReference,
        expected: &'static str,
    },

    #[error("No occurrence generator found for frequency [{frequency}] used by [{reference}]")]
    UnknownGenerator {
        frequency: String,
        reference: DocumentReference,
    },

    #[error("Recurrent event [{0}] has no recurrence information")]
    MissingRecurrenceInfo(DocumentReference),

    #[error("Recurrence rule error: {0}")]
    RecurrenceError(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
