//! Event — an immutable record of a status change.
//!
//! The alarm controller emits one event per observable change so that a
//! notifier (UI, log, push service) can follow the system without polling.

use serde::{Deserialize, Serialize};

use crate::id::EventId;
use crate::sensor::SensorKey;
use crate::status::{AlarmStatus, ArmingStatus};
use crate::time::{Timestamp, now};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    AlarmStatusChanged {
        from: AlarmStatus,
        to: AlarmStatus,
    },
    ArmingStatusChanged {
        from: ArmingStatus,
        to: ArmingStatus,
    },
    SensorActivationChanged {
        sensor: SensorKey,
        active: bool,
    },
    SensorAdded {
        sensor: SensorKey,
    },
    SensorRemoved {
        sensor: SensorKey,
    },
    /// Verdict of the camera classifier for the latest frame.
    CatDetected {
        detected: bool,
    },
}

/// A timestamped [`EventKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(flatten)]
    pub kind: EventKind,
    pub timestamp: Timestamp,
}

impl Event {
    /// Stamp `kind` with a fresh id and the current time.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            kind,
            timestamp: now(),
        }
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Self::new(kind)
    }
}
