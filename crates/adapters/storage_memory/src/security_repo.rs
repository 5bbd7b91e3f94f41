//! In-memory implementation of [`SecurityRepository`].

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::RwLock;

use catpoint_app::ports::SecurityRepository;
use catpoint_domain::error::CatpointError;
use catpoint_domain::sensor::{Sensor, SensorKey};
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

use crate::error::StorageError;

#[derive(Debug, Default)]
struct State {
    arming: ArmingStatus,
    alarm: AlarmStatus,
    sensors: BTreeMap<SensorKey, Sensor>,
}

/// Process-local security repository.
///
/// Starts disarmed, with no alarm and no sensors.
#[derive(Debug, Default)]
pub struct InMemorySecurityRepository {
    state: RwLock<State>,
}

impl InMemorySecurityRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> Result<T, CatpointError> {
        let state = self.state.read().map_err(StorageError::from)?;
        Ok(f(&state))
    }

    fn write<T>(&self, f: impl FnOnce(&mut State) -> T) -> Result<T, CatpointError> {
        let mut state = self.state.write().map_err(StorageError::from)?;
        Ok(f(&mut state))
    }
}

impl SecurityRepository for InMemorySecurityRepository {
    fn arming_status(&self) -> impl Future<Output = Result<ArmingStatus, CatpointError>> + Send {
        let result = self.read(|s| s.arming);
        async { result }
    }

    fn set_arming_status(
        &self,
        status: ArmingStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        let result = self.write(|s| s.arming = status);
        async { result }
    }

    fn alarm_status(&self) -> impl Future<Output = Result<AlarmStatus, CatpointError>> + Send {
        let result = self.read(|s| s.alarm);
        async { result }
    }

    fn set_alarm_status(
        &self,
        status: AlarmStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        let result = self.write(|s| s.alarm = status);
        async { result }
    }

    fn sensors(&self) -> impl Future<Output = Result<Vec<Sensor>, CatpointError>> + Send {
        let result = self.read(|s| s.sensors.values().cloned().collect());
        async { result }
    }

    fn get_sensor(
        &self,
        key: SensorKey,
    ) -> impl Future<Output = Result<Option<Sensor>, CatpointError>> + Send {
        let result = self.read(|s| s.sensors.get(&key).cloned());
        async { result }
    }

    fn add_sensor(
        &self,
        sensor: Sensor,
    ) -> impl Future<Output = Result<Sensor, CatpointError>> + Send {
        let result = self.write(|s| {
            s.sensors.insert(sensor.key(), sensor.clone());
            sensor
        });
        async { result }
    }

    fn remove_sensor(
        &self,
        key: SensorKey,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        let result = self.write(|s| {
            s.sensors.remove(&key);
        });
        async { result }
    }

    fn update_sensor(
        &self,
        sensor: Sensor,
    ) -> impl Future<Output = Result<Sensor, CatpointError>> + Send {
        let result = self.write(|s| {
            s.sensors.insert(sensor.key(), sensor.clone());
            sensor
        });
        async { result }
    }
}
