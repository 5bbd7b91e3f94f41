//! Storage port — the security repository.

use std::future::Future;

use catpoint_domain::error::CatpointError;
use catpoint_domain::sensor::{Sensor, SensorKey};
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

/// Authoritative holder of the arming status, the alarm status and the set
/// of registered sensors.
///
/// Writes must be visible to the very next read; no other ordering is
/// required (last write wins).
pub trait SecurityRepository {
    /// Current arming status.
    fn arming_status(&self) -> impl Future<Output = Result<ArmingStatus, CatpointError>> + Send;

    /// Replace the arming status.
    fn set_arming_status(
        &self,
        status: ArmingStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send;

    /// Current alarm status.
    fn alarm_status(&self) -> impl Future<Output = Result<AlarmStatus, CatpointError>> + Send;

    /// Replace the alarm status.
    fn set_alarm_status(
        &self,
        status: AlarmStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send;

    /// All registered sensors, ordered by name then type.
    fn sensors(&self) -> impl Future<Output = Result<Vec<Sensor>, CatpointError>> + Send;

    /// Look up a sensor by identity.
    fn get_sensor(
        &self,
        key: SensorKey,
    ) -> impl Future<Output = Result<Option<Sensor>, CatpointError>> + Send;

    /// Register a sensor. An existing sensor with the same identity is replaced.
    fn add_sensor(&self, sensor: Sensor)
    -> impl Future<Output = Result<Sensor, CatpointError>> + Send;

    /// Unregister a sensor. Removing an unknown sensor is not an error.
    fn remove_sensor(&self, key: SensorKey)
    -> impl Future<Output = Result<(), CatpointError>> + Send;

    /// Persist a sensor's mutated `active` flag.
    fn update_sensor(
        &self,
        sensor: Sensor,
    ) -> impl Future<Output = Result<Sensor, CatpointError>> + Send;
}
