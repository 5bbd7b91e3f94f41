//! Alarm controller — the use-cases that drive the alarm state machine.
//!
//! The controller owns no state of its own: every read and write goes
//! through the [`SecurityRepository`]. The decisions themselves come from
//! [`catpoint_domain::alarm::decide`]; this service loads what the rules need,
//! applies the outcome and tells the notifier.
//!
//! Each public operation holds the controller's operation lock from its first
//! read to its last write, so a sensor change can never interleave with an
//! arming change half-way through a decision.

use tokio::sync::Mutex;

use catpoint_domain::alarm::{self, Trigger};
use catpoint_domain::error::{CatpointError, NotFoundError, ValidationError};
use catpoint_domain::event::{Event, EventKind};
use catpoint_domain::image::{CAT_CONFIDENCE_THRESHOLD, CameraImage};
use catpoint_domain::sensor::{Sensor, SensorKey};
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

use crate::ports::{EventPublisher, ImageClassifier, SecurityRepository};

/// Consistent view of the whole security state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecuritySnapshot {
    pub arming_status: ArmingStatus,
    pub alarm_status: AlarmStatus,
    pub sensors: Vec<Sensor>,
}

/// Outcome of [`AlarmController::process_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageVerdict {
    pub cat_detected: bool,
    /// Alarm status right after this frame was judged.
    pub alarm_status: AlarmStatus,
}

/// Application service running the alarm rules.
pub struct AlarmController<R, C, P> {
    repo: R,
    classifier: C,
    publisher: P,
    gate: Mutex<()>,
}

impl<R, C, P> AlarmController<R, C, P>
where
    R: SecurityRepository,
    C: ImageClassifier,
    P: EventPublisher,
{
    /// Create a new controller from its collaborators.
    pub fn new(repo: R, classifier: C, publisher: P) -> Self {
        Self {
            repo,
            classifier,
            publisher,
            gate: Mutex::new(()),
        }
    }

    /// Move a sensor to a new activation state and apply the alarm rules.
    ///
    /// The rules see the sensor's *stored* flag, before the change is
    /// written. The sensor is persisted before the alarm status, so a failed
    /// sensor write leaves the alarm untouched. Returns the sensor as
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::NotFound`] when no sensor has this identity,
    /// or a storage error from the repository.
    pub async fn change_sensor_activation(
        &self,
        key: SensorKey,
        active: bool,
    ) -> Result<Sensor, CatpointError> {
        let _guard = self.gate.lock().await;

        let sensors = self.repo.sensors().await?;
        let Some(mut sensor) = sensors.iter().find(|s| s.is(&key)).cloned() else {
            return Err(sensor_not_found(&key));
        };
        let others_active = sensors.iter().any(|s| s.active && !s.is(&key));

        let arming = self.repo.arming_status().await?;
        let current = self.repo.alarm_status().await?;
        let trigger = Trigger::SensorChanged {
            was_active: sensor.active,
            now_active: active,
            others_active,
        };
        tracing::debug!(sensor = %key, active, %arming, alarm = %current, "sensor change");
        let next = alarm::decide(arming, current, trigger);

        let changed = sensor.active != active;
        sensor.active = active;
        let sensor = self.repo.update_sensor(sensor).await?;
        if let Some(next) = next {
            self.write_alarm_status(current, next).await?;
        }
        if changed {
            self.notify(EventKind::SensorActivationChanged {
                sensor: key,
                active,
            })
            .await;
        }
        Ok(sensor)
    }

    /// Clear a pending alarm once every sensor has gone quiet.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn check_sensors(&self) -> Result<AlarmStatus, CatpointError> {
        let _guard = self.gate.lock().await;

        let current = self.repo.alarm_status().await?;
        let any_active = self.any_sensor_active().await?;
        let arming = self.repo.arming_status().await?;
        match alarm::decide(arming, current, Trigger::SensorSweep { any_active }) {
            Some(next) => {
                self.write_alarm_status(current, next).await?;
                Ok(next)
            }
            None => Ok(current),
        }
    }

    /// Change the arming status.
    ///
    /// Disarming clears any alarm. Arming (home or away) resets every sensor
    /// to inactive directly, without running the activation rules.
    ///
    /// Sensor resets and the arming status are written before the alarm
    /// status, and nothing is announced until every write has succeeded.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn set_arming_status(&self, next: ArmingStatus) -> Result<(), CatpointError> {
        let _guard = self.gate.lock().await;

        let previous = self.repo.arming_status().await?;
        let current = self.repo.alarm_status().await?;
        let alarm_next = alarm::decide(previous, current, Trigger::ArmingChanged(next));

        let mut reset = Vec::new();
        if alarm::resets_sensors(next) {
            for mut sensor in self.repo.sensors().await? {
                if !sensor.active {
                    continue;
                }
                sensor.active = false;
                reset.push(self.repo.update_sensor(sensor).await?.key());
            }
        }
        self.repo.set_arming_status(next).await?;
        if let Some(status) = alarm_next {
            self.write_alarm_status(current, status).await?;
        }

        for sensor in reset {
            self.notify(EventKind::SensorActivationChanged {
                sensor,
                active: false,
            })
            .await;
        }
        if previous != next {
            tracing::info!(from = %previous, to = %next, "arming status changed");
            self.notify(EventKind::ArmingStatusChanged {
                from: previous,
                to: next,
            })
            .await;
        }
        Ok(())
    }

    /// Run the cat detector on a camera frame and apply its verdict.
    ///
    /// The classifier is consulted before the operation lock is taken; the
    /// verdict is then judged against the state current at that moment.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Classifier`] when the classifier fails (no
    /// state is changed), or a storage error from the repository.
    pub async fn process_image(
        &self,
        image: &CameraImage,
    ) -> Result<ImageVerdict, CatpointError> {
        let cat_detected = self
            .classifier
            .image_contains_cat(image, CAT_CONFIDENCE_THRESHOLD)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "image classification failed"))?;

        let _guard = self.gate.lock().await;

        let arming = self.repo.arming_status().await?;
        let current = self.repo.alarm_status().await?;
        let any_active = self.any_sensor_active().await?;
        tracing::debug!(cat_detected, %arming, alarm = %current, any_active, "camera verdict");
        let trigger = Trigger::ImageClassified {
            cat_detected,
            any_active,
        };
        let alarm_status = match alarm::decide(arming, current, trigger) {
            Some(next) => {
                self.write_alarm_status(current, next).await?;
                next
            }
            None => current,
        };

        self.notify(EventKind::CatDetected {
            detected: cat_detected,
        })
        .await;
        Ok(ImageVerdict {
            cat_detected,
            alarm_status,
        })
    }

    /// Register a new sensor.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] if the sensor name is empty or a
    /// sensor with the same name and type exists, or a storage error.
    pub async fn add_sensor(&self, sensor: Sensor) -> Result<Sensor, CatpointError> {
        sensor.validate()?;
        let _guard = self.gate.lock().await;

        let key = sensor.key();
        if self.repo.get_sensor(key.clone()).await?.is_some() {
            return Err(ValidationError::DuplicateSensor(key.to_string()).into());
        }
        let sensor = self.repo.add_sensor(sensor).await?;
        self.notify(EventKind::SensorAdded { sensor: key }).await;
        Ok(sensor)
    }

    /// Unregister a sensor. The alarm status is left as it is.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::NotFound`] when no sensor has this identity,
    /// or a storage error from the repository.
    pub async fn remove_sensor(&self, key: SensorKey) -> Result<(), CatpointError> {
        let _guard = self.gate.lock().await;

        if self.repo.get_sensor(key.clone()).await?.is_none() {
            return Err(sensor_not_found(&key));
        }
        self.repo.remove_sensor(key.clone()).await?;
        self.notify(EventKind::SensorRemoved { sensor: key }).await;
        Ok(())
    }

    /// List all registered sensors.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        self.repo.sensors().await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        self.repo.alarm_status().await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        self.repo.arming_status().await
    }

    /// Read arming status, alarm status and sensors as one consistent view.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn snapshot(&self) -> Result<SecuritySnapshot, CatpointError> {
        let _guard = self.gate.lock().await;

        Ok(SecuritySnapshot {
            arming_status: self.repo.arming_status().await?,
            alarm_status: self.repo.alarm_status().await?,
            sensors: self.repo.sensors().await?,
        })
    }

    async fn any_sensor_active(&self) -> Result<bool, CatpointError> {
        Ok(self.repo.sensors().await?.iter().any(|s| s.active))
    }

    async fn write_alarm_status(
        &self,
        current: AlarmStatus,
        next: AlarmStatus,
    ) -> Result<(), CatpointError> {
        self.repo.set_alarm_status(next).await?;
        if current != next {
            tracing::info!(from = %current, to = %next, "alarm status changed");
            self.notify(EventKind::AlarmStatusChanged {
                from: current,
                to: next,
            })
            .await;
        }
        Ok(())
    }

    async fn notify(&self, kind: EventKind) {
        if let Err(err) = self.publisher.publish(Event::new(kind)).await {
            tracing::warn!(error = %err, "failed to publish event");
        }
    }
}

fn sensor_not_found(key: &SensorKey) -> CatpointError {
    NotFoundError {
        entity: "Sensor",
        id: key.to_string(),
    }
    .into()
}
