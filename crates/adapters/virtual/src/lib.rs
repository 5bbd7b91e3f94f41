//! # catpoint-adapter-virtual
//!
//! Virtual/demo classifier standing in for a real vision service.
//!
//! It never talks to the network: the "confidence" that a frame shows a cat
//! is the share of bright bytes (value 128 or more) in the frame, as a
//! percentage. An all-white frame is a certain cat, an all-black frame is
//! certainly not, and the same frame always gets the same verdict.
//!
//! ## Dependency rule
//!
//! Depends on `catpoint-app` (port traits) and `catpoint-domain` only.

use std::future::Future;

use catpoint_app::ports::ImageClassifier;
use catpoint_domain::error::CatpointError;
use catpoint_domain::image::CameraImage;

const BRIGHT: u8 = 128;

/// Deterministic stand-in for the camera cat detector.
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualImageClassifier;

impl VirtualImageClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Pseudo-confidence in `0.0..=100.0` that `image` contains a cat.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn confidence(image: &CameraImage) -> f32 {
        if image.is_empty() {
            return 0.0;
        }
        let bright = image.as_bytes().iter().filter(|b| **b >= BRIGHT).count();
        bright as f32 * 100.0 / image.len() as f32
    }
}

impl ImageClassifier for VirtualImageClassifier {
    fn image_contains_cat(
        &self,
        image: &CameraImage,
        confidence_threshold: f32,
    ) -> impl Future<Output = Result<bool, CatpointError>> + Send {
        let confidence = Self::confidence(image);
        let verdict = confidence >= confidence_threshold;
        tracing::debug!(
            bytes = image.len(),
            confidence,
            threshold = confidence_threshold,
            verdict,
            "virtual classification"
        );
        async move { Ok(verdict) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catpoint_domain::image::CAT_CONFIDENCE_THRESHOLD;

    async fn classify(bytes: Vec<u8>) -> bool {
        VirtualImageClassifier::new()
            .image_contains_cat(&CameraImage::new(bytes), CAT_CONFIDENCE_THRESHOLD)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_see_cat_in_bright_frame() {
        assert!(classify(vec![255; 64]).await);
    }

    #[tokio::test]
    async fn should_see_nothing_in_dark_frame() {
        assert!(!classify(vec![0; 64]).await);
    }

    #[tokio::test]
    async fn should_see_nothing_in_empty_frame() {
        assert!(!classify(Vec::new()).await);
    }

    #[tokio::test]
    async fn should_accept_frame_exactly_at_threshold() {
        assert!(classify(vec![0, 200, 10, 130]).await);
    }

    #[test]
    fn should_compute_share_of_bright_bytes() {
        let image = CameraImage::new(vec![0, 0, 0, 255]);
        assert!((VirtualImageClassifier::confidence(&image) - 25.0).abs() < f32::EPSILON);
    }
}
