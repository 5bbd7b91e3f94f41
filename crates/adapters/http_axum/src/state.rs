//! Shared application state for axum handlers.

use std::sync::Arc;

use catpoint_app::event_bus::InProcessEventBus;
use catpoint_app::ports::{EventPublisher, ImageClassifier, SecurityRepository};
use catpoint_app::services::alarm_controller::AlarmController;

/// Application state shared across all axum handlers.
///
/// Generic over the repository, classifier and publisher to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types do not
/// need to be `Clone`; only the `Arc`s are cloned.
pub struct AppState<R, C, P> {
    /// The alarm state machine.
    pub controller: Arc<AlarmController<R, C, P>>,
    /// Bus the controller publishes to, subscribed by the event stream.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<R, C, P> Clone for AppState<R, C, P> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<R, C, P> AppState<R, C, P>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state.
    ///
    /// `event_bus` should be the bus the controller publishes to, otherwise the
    /// event stream stays silent.
    pub fn new(controller: AlarmController<R, C, P>, event_bus: Arc<InProcessEventBus>) -> Self {
        Self {
            controller: Arc::new(controller),
            event_bus,
        }
    }
}
