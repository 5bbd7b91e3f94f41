//! JSON REST handlers for sensors.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use catpoint_app::ports::{EventPublisher, ImageClassifier, SecurityRepository};
use catpoint_domain::sensor::{Sensor, SensorKey, SensorType};
use catpoint_domain::status::AlarmStatus;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a sensor.
#[derive(Deserialize)]
pub struct CreateSensorRequest {
    pub name: String,
    pub sensor_type: SensorType,
}

/// Request body for changing a sensor's activation.
#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// Alarm status after a sweep.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckBody {
    pub alarm_status: AlarmStatus,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Sensor>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Sensor>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the activation endpoint.
pub enum SetActiveResponse {
    Ok(Json<Sensor>),
}

impl IntoResponse for SetActiveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the check endpoint.
pub enum CheckResponse {
    Ok(Json<CheckBody>),
}

impl IntoResponse for CheckResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_key(sensor_type: &str, name: String) -> Result<SensorKey, ApiError> {
    let sensor_type = SensorType::from_str(sensor_type)?;
    Ok(SensorKey::new(name, sensor_type))
}

/// `GET /api/sensors`
pub async fn list<R, C, P>(
    State(state): State<AppState<R, C, P>>,
) -> Result<ListResponse, ApiError>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let sensors = state.controller.sensors().await?;
    Ok(ListResponse::Ok(Json(sensors)))
}

/// `POST /api/sensors`
pub async fn create<R, C, P>(
    State(state): State<AppState<R, C, P>>,
    Json(req): Json<CreateSensorRequest>,
) -> Result<CreateResponse, ApiError>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let sensor = Sensor::builder()
        .name(req.name)
        .sensor_type(req.sensor_type)
        .build()?;
    let created = state.controller.add_sensor(sensor).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/sensors/:sensor_type/:name/active`
pub async fn set_active<R, C, P>(
    State(state): State<AppState<R, C, P>>,
    Path((sensor_type, name)): Path<(String, String)>,
    Json(req): Json<SetActiveRequest>,
) -> Result<SetActiveResponse, ApiError>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let key = parse_key(&sensor_type, name)?;
    let sensor = state
        .controller
        .change_sensor_activation(key, req.active)
        .await?;
    Ok(SetActiveResponse::Ok(Json(sensor)))
}

/// `POST /api/sensors/check`
pub async fn check<R, C, P>(
    State(state): State<AppState<R, C, P>>,
) -> Result<CheckResponse, ApiError>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let alarm_status = state.controller.check_sensors().await?;
    Ok(CheckResponse::Ok(Json(CheckBody { alarm_status })))
}

/// `DELETE /api/sensors/:sensor_type/:name`
pub async fn delete<R, C, P>(
    State(state): State<AppState<R, C, P>>,
    Path((sensor_type, name)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let key = parse_key(&sensor_type, name)?;
    state.controller.remove_sensor(key).await?;
    Ok(DeleteResponse::NoContent)
}
