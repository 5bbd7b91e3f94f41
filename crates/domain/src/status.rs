//! Arming and alarm statuses.
//!
//! Both are held singly by the security repository. The arming status is
//! chosen by the user; the alarm status is only ever moved by the rules in
//! [`alarm`](crate::alarm).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How the system has been armed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    /// Whether sensor activity can raise an alarm in this status.
    #[must_use]
    pub fn is_armed(self) -> bool {
        matches!(self, Self::ArmedHome | Self::ArmedAway)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disarmed => "DISARMED",
            Self::ArmedHome => "ARMED_HOME",
            Self::ArmedAway => "ARMED_AWAY",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DISARMED" => Ok(Self::Disarmed),
            "ARMED_HOME" => Ok(Self::ArmedHome),
            "ARMED_AWAY" => Ok(Self::ArmedAway),
            other => Err(ValidationError::UnknownArmingStatus(other.to_string())),
        }
    }
}

/// Current state of the alarm itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoAlarm => "NO_ALARM",
            Self::PendingAlarm => "PENDING_ALARM",
            Self::Alarm => "ALARM",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlarmStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NO_ALARM" => Ok(Self::NoAlarm),
            "PENDING_ALARM" => Ok(Self::PendingAlarm),
            "ALARM" => Ok(Self::Alarm),
            other => Err(ValidationError::UnknownAlarmStatus(other.to_string())),
        }
    }
}
