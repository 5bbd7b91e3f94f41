//! Storage-specific error type.

use catpoint_domain::error::CatpointError;

/// Errors originating from the in-memory storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A writer panicked while holding the state lock.
    #[error("security state lock poisoned")]
    Poisoned,
}

impl From<StorageError> for CatpointError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

impl<T> From<std::sync::PoisonError<T>> for StorageError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::Poisoned
    }
}
