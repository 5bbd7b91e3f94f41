//! JSON REST handler for camera frames.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use catpoint_app::ports::{EventPublisher, ImageClassifier, SecurityRepository};
use catpoint_app::services::alarm_controller::ImageVerdict;
use catpoint_domain::image::CameraImage;
use catpoint_domain::status::AlarmStatus;

use crate::error::ApiError;
use crate::state::AppState;

/// Verdict for a submitted frame and the alarm status that followed.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageVerdictBody {
    pub cat_detected: bool,
    pub alarm_status: AlarmStatus,
}

impl From<ImageVerdict> for ImageVerdictBody {
    fn from(verdict: ImageVerdict) -> Self {
        Self {
            cat_detected: verdict.cat_detected,
            alarm_status: verdict.alarm_status,
        }
    }
}

/// Possible responses from the image endpoint.
pub enum ImageResponse {
    Ok(Json<ImageVerdictBody>),
}

impl IntoResponse for ImageResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/camera/image` — body is the raw encoded frame.
pub async fn process_image<R, C, P>(
    State(state): State<AppState<R, C, P>>,
    body: Bytes,
) -> Result<ImageResponse, ApiError>
where
    R: SecurityRepository + Send + Sync + 'static,
    C: ImageClassifier + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let image = CameraImage::new(body.to_vec());
    let verdict = state.controller.process_image(&image).await?;
    Ok(ImageResponse::Ok(Json(verdict.into())))
}
