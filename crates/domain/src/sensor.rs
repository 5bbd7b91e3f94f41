//! Sensor — a door, window or motion contact that can be active or not.
//!
//! A sensor is identified by its name together with its type: two sensors
//! with the same name and type are the same sensor, whatever their `active`
//! flag says. [`SensorKey`] carries that identity on its own.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatpointError, ValidationError};

/// Kind of physical contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl SensorType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Door => "DOOR",
            Self::Window => "WINDOW",
            Self::Motion => "MOTION",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DOOR" => Ok(Self::Door),
            "WINDOW" => Ok(Self::Window),
            "MOTION" => Ok(Self::Motion),
            other => Err(ValidationError::UnknownSensorType(other.to_string())),
        }
    }
}

/// Identity of a sensor: its name and type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SensorKey {
    pub name: String,
    pub sensor_type: SensorType,
}

impl SensorKey {
    #[must_use]
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            name: name.into(),
            sensor_type,
        }
    }
}

impl fmt::Display for SensorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sensor_type, self.name)
    }
}

/// A registered sensor and whether it is currently tripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub name: String,
    pub sensor_type: SensorType,
    pub active: bool,
}

impl Sensor {
    /// Create a builder for constructing a [`Sensor`].
    #[must_use]
    pub fn builder() -> SensorBuilder {
        SensorBuilder::default()
    }

    /// The identity of this sensor.
    #[must_use]
    pub fn key(&self) -> SensorKey {
        SensorKey::new(self.name.clone(), self.sensor_type)
    }

    /// Whether this sensor has the given identity.
    #[must_use]
    pub fn is(&self, key: &SensorKey) -> bool {
        self.sensor_type == key.sensor_type && self.name == key.name
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), CatpointError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptySensorName.into());
        }
        Ok(())
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.sensor_type == other.sensor_type && self.name == other.name
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sensor_type.hash(state);
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.sensor_type.cmp(&other.sensor_type))
    }
}

/// Step-by-step builder for [`Sensor`].
///
/// Sensors start inactive unless told otherwise.
#[derive(Debug, Default)]
pub struct SensorBuilder {
    name: Option<String>,
    sensor_type: Option<SensorType>,
    active: bool,
}

impl SensorBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn sensor_type(mut self, sensor_type: SensorType) -> Self {
        self.sensor_type = Some(sensor_type);
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Consume the builder, validate, and return a [`Sensor`].
    ///
    /// A missing type defaults to [`SensorType::Door`].
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Sensor, CatpointError> {
        let sensor = Sensor {
            name: self.name.unwrap_or_default(),
            sensor_type: self.sensor_type.unwrap_or(SensorType::Door),
            active: self.active,
        };
        sensor.validate()?;
        Ok(sensor)
    }
}
