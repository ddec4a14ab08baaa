//! Business error taxonomy for the service layer.

use crate::db::repository::RepositoryError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer.
///
/// `SlotUnavailable`, `SlotFull` and `DuplicateBooking` are business-rule
/// violations the user can recover from by choosing another slot.
/// `ConcurrencyConflict` is internal-facing: the ledger retries it exactly
/// once before resolving it to `SlotFull`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed input, rejected before any mutation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced slot is missing or inactive.
    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),

    /// The slot's capacity is exhausted.
    #[error("Slot full: {0}")]
    SlotFull(String),

    /// The user already holds a non-cancelled booking on this slot.
    #[error("Duplicate booking: {0}")]
    DuplicateBooking(String),

    /// A capacity check was invalidated by a concurrent booking.
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transient infrastructure failure.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ServiceError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, ServiceError::StoreUnavailable(_))
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        let message = err.to_string();
        match err {
            RepositoryError::NotFound { .. } => ServiceError::NotFound(message),
            RepositoryError::ValidationError { .. } => ServiceError::Validation(message),
            RepositoryError::ConflictError { .. } => ServiceError::ConcurrencyConflict(message),
            _ => ServiceError::StoreUnavailable(message),
        }
    }
}

/// Degrade a transient store failure on a read path to an empty result.
///
/// Write paths never use this; a failed write always surfaces to the caller.
pub(crate) fn degrade_read<T: Default>(
    result: Result<T, RepositoryError>,
    what: &str,
) -> ServiceResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err @ (RepositoryError::ConnectionError { .. } | RepositoryError::TimeoutError { .. })) => {
            tracing::warn!(error = %err, "{} degraded to empty result", what);
            Ok(T::default())
        }
        Err(err) => Err(err.into()),
    }
}
