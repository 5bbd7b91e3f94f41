//! Alarm rules — how the alarm status reacts to what happens in the house.
//!
//! Every rule is a pure function of the current [`ArmingStatus`], the current
//! [`AlarmStatus`] and the [`Trigger`] that just happened. [`decide`] returns
//! the alarm status to write, or `None` when nothing must be written.
//!
//! | Current | Trigger | Result |
//! |---------|---------|--------|
//! | `PENDING_ALARM` | already-active sensor re-activated | `ALARM` |
//! | `NO_ALARM` | sensor becomes active, armed | `PENDING_ALARM` |
//! | `PENDING_ALARM` | sensor becomes active, armed | `ALARM` |
//! | `PENDING_ALARM` | sensor becomes inactive, no other sensor active | `NO_ALARM` |
//! | `ALARM` | any sensor change | no write |
//! | `PENDING_ALARM` | sweep finds no active sensor | `NO_ALARM` |
//! | any | disarmed | `NO_ALARM` |
//! | any | cat seen while `ARMED_HOME` | `ALARM` |
//! | any | no cat seen, no active sensor | `NO_ALARM` |

use crate::status::{AlarmStatus, ArmingStatus};

/// Something that may move the alarm status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A sensor was asked to take a new activation state.
    ///
    /// `others_active` reports whether any *other* registered sensor is
    /// currently active.
    SensorChanged {
        was_active: bool,
        now_active: bool,
        others_active: bool,
    },
    /// Periodic or post-bulk-change sweep over all sensors.
    SensorSweep { any_active: bool },
    /// The user picked a new arming status.
    ArmingChanged(ArmingStatus),
    /// The camera classifier returned a verdict for the latest frame.
    ImageClassified { cat_detected: bool, any_active: bool },
}

/// Apply the alarm rules.
///
/// Returns the status to persist, or `None` when the rules ask for no write.
#[must_use]
pub fn decide(arming: ArmingStatus, alarm: AlarmStatus, trigger: Trigger) -> Option<AlarmStatus> {
    match trigger {
        Trigger::SensorChanged {
            was_active,
            now_active,
            others_active,
        } => on_sensor_changed(arming, alarm, was_active, now_active, others_active),
        Trigger::SensorSweep { any_active } => {
            (alarm == AlarmStatus::PendingAlarm && !any_active).then_some(AlarmStatus::NoAlarm)
        }
        Trigger::ArmingChanged(next) => {
            (next == ArmingStatus::Disarmed).then_some(AlarmStatus::NoAlarm)
        }
        Trigger::ImageClassified {
            cat_detected: true, ..
        } => (arming == ArmingStatus::ArmedHome).then_some(AlarmStatus::Alarm),
        Trigger::ImageClassified {
            cat_detected: false,
            any_active,
        } => (!any_active).then_some(AlarmStatus::NoAlarm),
    }
}

fn on_sensor_changed(
    arming: ArmingStatus,
    alarm: AlarmStatus,
    was_active: bool,
    now_active: bool,
    others_active: bool,
) -> Option<AlarmStatus> {
    match (alarm, was_active, now_active) {
        // Alarm is sticky: only disarming clears it.
        (AlarmStatus::Alarm, _, _) => None,
        // A second trip while pending; independent of arming.
        (AlarmStatus::PendingAlarm, true, true) => Some(AlarmStatus::Alarm),
        (AlarmStatus::NoAlarm, false, true) if arming.is_armed() => {
            Some(AlarmStatus::PendingAlarm)
        }
        (AlarmStatus::PendingAlarm, false, true) if arming.is_armed() => Some(AlarmStatus::Alarm),
        (AlarmStatus::PendingAlarm, true, false) if !others_active => Some(AlarmStatus::NoAlarm),
        _ => None,
    }
}

/// Whether switching to `next` clears every sensor's active flag.
#[must_use]
pub fn resets_sensors(next: ArmingStatus) -> bool {
    next.is_armed()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARMED: [ArmingStatus; 2] = [ArmingStatus::ArmedHome, ArmingStatus::ArmedAway];
    const ALL_ARMING: [ArmingStatus; 3] = [
        ArmingStatus::Disarmed,
        ArmingStatus::ArmedHome,
        ArmingStatus::ArmedAway,
    ];
    const ALL_ALARM: [AlarmStatus; 3] = [
        AlarmStatus::NoAlarm,
        AlarmStatus::PendingAlarm,
        AlarmStatus::Alarm,
    ];

    fn activate() -> Trigger {
        Trigger::SensorChanged {
            was_active: false,
            now_active: true,
            others_active: false,
        }
    }

    fn deactivate(others_active: bool) -> Trigger {
        Trigger::SensorChanged {
            was_active: true,
            now_active: false,
            others_active,
        }
    }

    #[test]
    fn should_go_pending_when_armed_and_sensor_activates() {
        for arming in ARMED {
            assert_eq!(
                decide(arming, AlarmStatus::NoAlarm, activate()),
                Some(AlarmStatus::PendingAlarm)
            );
        }
    }

    #[test]
    fn should_ignore_activation_when_disarmed() {
        assert_eq!(
            decide(ArmingStatus::Disarmed, AlarmStatus::NoAlarm, activate()),
            None
        );
    }

    #[test]
    fn should_escalate_to_alarm_when_pending_and_sensor_activates() {
        for arming in ARMED {
            assert_eq!(
                decide(arming, AlarmStatus::PendingAlarm, activate()),
                Some(AlarmStatus::Alarm)
            );
        }
    }

    #[test]
    fn should_escalate_when_active_sensor_is_reactivated_while_pending() {
        let trigger = Trigger::SensorChanged {
            was_active: true,
            now_active: true,
            others_active: false,
        };
        for arming in ALL_ARMING {
            assert_eq!(
                decide(arming, AlarmStatus::PendingAlarm, trigger),
                Some(AlarmStatus::Alarm)
            );
        }
    }

    #[test]
    fn should_not_escalate_reactivation_outside_pending() {
        let trigger = Trigger::SensorChanged {
            was_active: true,
            now_active: true,
            others_active: true,
        };
        assert_eq!(
            decide(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm, trigger),
            None
        );
    }

    #[test]
    fn should_never_write_on_sensor_change_while_alarm() {
        for arming in ALL_ARMING {
            for (was, now) in [(false, true), (true, false), (true, true), (false, false)] {
                let trigger = Trigger::SensorChanged {
                    was_active: was,
                    now_active: now,
                    others_active: false,
                };
                assert_eq!(decide(arming, AlarmStatus::Alarm, trigger), None);
            }
        }
    }

    #[test]
    fn should_clear_pending_when_last_active_sensor_deactivates() {
        assert_eq!(
            decide(
                ArmingStatus::ArmedHome,
                AlarmStatus::PendingAlarm,
                deactivate(false)
            ),
            Some(AlarmStatus::NoAlarm)
        );
    }

    #[test]
    fn should_stay_pending_while_another_sensor_is_active() {
        assert_eq!(
            decide(
                ArmingStatus::ArmedHome,
                AlarmStatus::PendingAlarm,
                deactivate(true)
            ),
            None
        );
    }

    #[test]
    fn should_not_write_when_inactive_sensor_is_deactivated() {
        let trigger = Trigger::SensorChanged {
            was_active: false,
            now_active: false,
            others_active: false,
        };
        for arming in ALL_ARMING {
            for alarm in ALL_ALARM {
                assert_eq!(decide(arming, alarm, trigger), None);
            }
        }
    }

    #[test]
    fn should_clear_pending_on_sweep_only_when_everything_is_quiet() {
        let quiet = Trigger::SensorSweep { any_active: false };
        let busy = Trigger::SensorSweep { any_active: true };
        assert_eq!(
            decide(ArmingStatus::ArmedAway, AlarmStatus::PendingAlarm, quiet),
            Some(AlarmStatus::NoAlarm)
        );
        assert_eq!(
            decide(ArmingStatus::ArmedAway, AlarmStatus::PendingAlarm, busy),
            None
        );
        assert_eq!(
            decide(ArmingStatus::ArmedAway, AlarmStatus::Alarm, quiet),
            None
        );
    }

    #[test]
    fn should_clear_any_alarm_when_disarmed() {
        for alarm in ALL_ALARM {
            assert_eq!(
                decide(
                    ArmingStatus::ArmedHome,
                    alarm,
                    Trigger::ArmingChanged(ArmingStatus::Disarmed)
                ),
                Some(AlarmStatus::NoAlarm)
            );
        }
    }

    #[test]
    fn should_leave_alarm_untouched_when_arming() {
        for next in ARMED {
            assert_eq!(
                decide(
                    ArmingStatus::Disarmed,
                    AlarmStatus::PendingAlarm,
                    Trigger::ArmingChanged(next)
                ),
                None
            );
            assert!(resets_sensors(next));
        }
        assert!(!resets_sensors(ArmingStatus::Disarmed));
    }

    #[test]
    fn should_raise_alarm_when_cat_seen_while_armed_home() {
        for alarm in ALL_ALARM {
            for any_active in [false, true] {
                let trigger = Trigger::ImageClassified {
                    cat_detected: true,
                    any_active,
                };
                assert_eq!(
                    decide(ArmingStatus::ArmedHome, alarm, trigger),
                    Some(AlarmStatus::Alarm)
                );
            }
        }
    }

    #[test]
    fn should_ignore_cat_when_away_or_disarmed() {
        let trigger = Trigger::ImageClassified {
            cat_detected: true,
            any_active: true,
        };
        assert_eq!(
            decide(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm, trigger),
            None
        );
        assert_eq!(
            decide(ArmingStatus::Disarmed, AlarmStatus::NoAlarm, trigger),
            None
        );
    }

    #[test]
    fn should_clear_when_no_cat_and_no_active_sensor() {
        let trigger = Trigger::ImageClassified {
            cat_detected: false,
            any_active: false,
        };
        assert_eq!(
            decide(ArmingStatus::ArmedHome, AlarmStatus::Alarm, trigger),
            Some(AlarmStatus::NoAlarm)
        );
    }

    #[test]
    fn should_keep_status_when_no_cat_but_sensor_active() {
        let trigger = Trigger::ImageClassified {
            cat_detected: false,
            any_active: true,
        };
        assert_eq!(
            decide(ArmingStatus::ArmedHome, AlarmStatus::PendingAlarm, trigger),
            None
        );
    }
}
