use async_trait::async_trait;
use thiserror::Error;

use crate::frame::Frame;
use crate::region::NormalizedRegion;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
    #[error("no detection result for frame {0}")]
    UnknownFrame(u64),
    #[error("engine error: {0}")]
    Engine(String),
}

/// Finds text in a frame. An empty vector means nothing was detected.
#[async_trait]
pub trait DetectionProvider: Send + Sync {
    async fn detect(&self, frame: &Frame) -> Result<Vec<NormalizedRegion>, DetectionError>;
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture interrupted: {0}")]
    Interrupted(String),
}

/// Produces frames until the stream ends (`Ok(None)`).
#[async_trait]
pub trait CaptureProvider: Send {
    async fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDetector(Vec<NormalizedRegion>);

    #[async_trait]
    impl DetectionProvider for FixedDetector {
        async fn detect(&self, frame: &Frame) -> Result<Vec<NormalizedRegion>, DetectionError> {
            if frame.width == 0 || frame.height == 0 {
                return Err(DetectionError::InvalidFrame("zero-sized frame".into()));
            }
            Ok(self.0.clone())
        }
    }

    struct CountdownCapture(u64);

    #[async_trait]
    impl CaptureProvider for CountdownCapture {
        async fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
            if self.0 == 0 {
                return Ok(None);
            }
            self.0 -= 1;
            Ok(Some(Frame::new(self.0, 4, 4, vec![0u8; 64])))
        }
    }

    #[tokio::test]
    async fn test_detector_trait_object() {
        let detector: Box<dyn DetectionProvider> =
            Box::new(FixedDetector(vec![NormalizedRegion::default()]));
        let regions = detector.detect(&Frame::new(0, 10, 10, Vec::<u8>::new())).await.unwrap();
        assert_eq!(regions.len(), 1);

        let err = detector.detect(&Frame::new(1, 0, 10, Vec::<u8>::new())).await.unwrap_err();
        assert!(err.to_string().contains("zero-sized"));
    }

    #[tokio::test]
    async fn test_capture_stream_ends_with_none() {
        let mut capture = CountdownCapture(2);
        assert!(capture.next_frame().await.unwrap().is_some());
        assert!(capture.next_frame().await.unwrap().is_some());
        assert!(capture.next_frame().await.unwrap().is_none());
    }
}
