//! JSON REST handlers for the arming and alarm statuses.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use catpoint_app::ports::{EventPublisher, ImageClassifier, SecurityRepository};
use catpoint_app::services::alarm_controller::SecuritySnapshot;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

use crate::error::ApiError;
use crate::state::AppState;

/// Whole security state as returned by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub arming_status: ArmingStatus,
    pub alarm_status: AlarmStatus,
    pub sensors: Vec<Sensor>,
}

impl From<SecuritySnapshot> for StatusBody {
    fn from(snapshot: SecuritySnapshot) -> Self {
        Self {
            arming_status: snapshot.arming_status,
            alarm_status: snapshot.alarm_status,
            sensors: snapshot.sensors,
        }
    }
}

/// Request body for changing the arming status.
#[derive(Deserialize)]
pub struct SetArmingRequest {
    pub arming_status: ArmingStatus,
}

/// Possible responses from the status endpoints.
pub enum StatusResponse {
    Ok(Json<StatusBody>),
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/status`
pub async fn get<R, C, P>(
    State(state): State<AppState<R, C, P>>,
) -> Result<StatusResponse, ApiError>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let snapshot = state.controller.snapshot().await?;
    Ok(StatusResponse::Ok(Json(snapshot.into())))
}

/// `PUT /api/status/arming`
pub async fn set_arming<R, C, P>(
    State(state): State<AppState<R, C, P>>,
    Json(req): Json<SetArmingRequest>,
) -> Result<StatusResponse, ApiError>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    state.controller.set_arming_status(req.arming_status).await?;
    let snapshot = state.controller.snapshot().await?;
    Ok(StatusResponse::Ok(Json(snapshot.into())))
}
