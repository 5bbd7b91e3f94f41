//! Camera frames handed to the image classifier.

/// Confidence (in percent) the classifier must reach before a frame counts
/// as containing a cat.
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// An encoded camera frame. The controller never looks inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraImage {
    bytes: Vec<u8>,
}

impl CameraImage {
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl From<Vec<u8>> for CameraImage {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}
