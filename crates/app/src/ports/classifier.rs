//! Image classifier port — the camera's cat detector.

use std::future::Future;

use catpoint_domain::error::CatpointError;
use catpoint_domain::image::CameraImage;

/// Decides whether a camera frame shows a cat.
///
/// Timeouts and retries are the implementation's business. A failure is
/// reported as [`CatpointError::Classifier`]; callers treat it as "no
/// verdict" and change nothing.
pub trait ImageClassifier {
    /// Return `true` when the frame contains a cat with at least
    /// `confidence_threshold` percent confidence.
    fn image_contains_cat(
        &self,
        image: &CameraImage,
        confidence_threshold: f32,
    ) -> impl Future<Output = Result<bool, CatpointError>> + Send;
}
