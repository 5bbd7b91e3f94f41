//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod camera;
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod sensors;
#[allow(clippy::missing_errors_doc)]
pub mod status;

use axum::Router;
use axum::routing::{delete, get, post, put};

use catpoint_app::ports::{EventPublisher, ImageClassifier, SecurityRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, C, P>() -> Router<AppState<R, C, P>>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Status
        .route("/status", get(status::get::<R, C, P>))
        .route("/status/arming", put(status::set_arming::<R, C, P>))
        // Sensors
        .route(
            "/sensors",
            get(sensors::list::<R, C, P>).post(sensors::create::<R, C, P>),
        )
        .route("/sensors/check", post(sensors::check::<R, C, P>))
        .route(
            "/sensors/{sensor_type}/{name}",
            delete(sensors::delete::<R, C, P>),
        )
        .route(
            "/sensors/{sensor_type}/{name}/active",
            put(sensors::set_active::<R, C, P>),
        )
        // Camera
        .route("/camera/image", post(camera::process_image::<R, C, P>))
        // Notifications
        .route("/events", get(events::stream::<R, C, P>))
}
