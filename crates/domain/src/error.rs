//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`CatpointError`] via `#[from]` or a `From` impl.

/// Top-level error shared by ports, services and adapters.
#[derive(Debug, thiserror::Error)]
pub enum CatpointError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("image classifier error")]
    Classifier(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant or caller contract was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("sensor name must not be empty")]
    EmptySensorName,

    #[error("sensor {0} is already registered")]
    DuplicateSensor(String),

    #[error("unknown sensor type: {0}")]
    UnknownSensorType(String),

    #[error("unknown arming status: {0}")]
    UnknownArmingStatus(String),

    #[error("unknown alarm status: {0}")]
    UnknownAlarmStatus(String),
}

/// A lookup did not find the requested item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
