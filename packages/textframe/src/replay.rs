//! Recorded sessions that stand in for a live camera and a vision service.
//!
//! A recording is a JSON file listing frames in capture order. Each frame
//! carries either the regions the detector reported for it or the error it
//! failed with.
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use textframe_vision::{
    CaptureError, CaptureProvider, DetectionError, DetectionProvider, Frame, Intrinsics,
    NormalizedRegion, Orientation,
};
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedFrame {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intrinsics: Option<Intrinsics>,
    #[serde(default)]
    pub regions: Vec<NormalizedRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecordedFrame {
    pub fn detection(&self) -> Result<&[NormalizedRegion], &str> {
        match &self.error {
            Some(error) => Err(error.as_str()),
            None => Ok(self.regions.as_slice()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read recording {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse recording {}", path.display()))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Frames paired with their sequence numbers, which start at 0.
    pub fn sequenced(&self) -> impl Iterator<Item = (u64, &RecordedFrame)> {
        self.frames.iter().enumerate().map(|(i, frame)| (i as u64, frame))
    }

    pub fn capture(&self) -> ReplayCapture {
        ReplayCapture {
            pending: self
                .sequenced()
                .map(|(sequence, frame)| {
                    Frame::new(sequence, frame.width, frame.height, Vec::<u8>::new())
                        .with_orientation(frame.orientation)
                        .with_intrinsics(frame.intrinsics)
                })
                .collect(),
        }
    }

    pub fn detector(&self) -> ReplayDetector {
        ReplayDetector {
            results: self
                .sequenced()
                .map(|(sequence, frame)| {
                    let result = frame
                        .detection()
                        .map(|regions| regions.to_vec())
                        .map_err(str::to_string);
                    (sequence, result)
                })
                .collect(),
        }
    }
}

/// Replays recorded frames in order, then ends the stream.
#[derive(Debug)]
pub struct ReplayCapture {
    pending: VecDeque<Frame>,
}

#[async_trait]
impl CaptureProvider for ReplayCapture {
    async fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
        Ok(self.pending.pop_front())
    }
}

/// Answers detection requests from the recording, keyed by frame sequence.
#[derive(Debug, Clone)]
pub struct ReplayDetector {
    results: HashMap<u64, Result<Vec<NormalizedRegion>, String>>,
}

#[async_trait]
impl DetectionProvider for ReplayDetector {
    async fn detect(&self, frame: &Frame) -> Result<Vec<NormalizedRegion>, DetectionError> {
        match self.results.get(&frame.sequence) {
            Some(Ok(regions)) => Ok(regions.clone()),
            Some(Err(message)) => Err(DetectionError::Engine(message.clone())),
            None => Err(DetectionError::UnknownFrame(frame.sequence)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "frames": [
            {
                "width": 1920,
                "height": 1080,
                "orientation": "right",
                "intrinsics": [[1400.0, 0.0, 960.0], [0.0, 1400.0, 540.0], [0.0, 0.0, 1.0]],
                "regions": [
                    {
                        "text": "EXIT",
                        "characterBoxes": [
                            {
                                "bottomLeft": {"x": 0.2, "y": 0.3},
                                "bottomRight": {"x": 0.3, "y": 0.3},
                                "topLeft": {"x": 0.2, "y": 0.4},
                                "topRight": {"x": 0.3, "y": 0.4}
                            }
                        ]
                    }
                ]
            },
            { "width": 1920, "height": 1080, "error": "request timed out" },
            { "width": 1920, "height": 1080 }
        ]
    }"#;

    #[test]
    fn test_parse_recording() {
        let recording = Recording::from_json(SAMPLE).unwrap();
        assert_eq!(recording.frames.len(), 3);
        assert_eq!(recording.frames[0].orientation, Orientation::Right);
        assert!(recording.frames[0].intrinsics.is_some());
        assert_eq!(recording.frames[1].detection(), Err("request timed out"));
        assert_eq!(recording.frames[2].orientation, Orientation::Up);
        assert!(recording.frames[2].detection().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_recording_is_an_error() {
        assert!(Recording::from_json(r#"{"frames": [{"width": "wide"}]}"#).is_err());
    }

    #[tokio::test]
    async fn test_capture_replays_in_order() {
        let recording = Recording::from_json(SAMPLE).unwrap();
        let mut capture = recording.capture();

        let mut sequences = Vec::new();
        while let Some(frame) = capture.next_frame().await.unwrap() {
            assert_eq!((frame.width, frame.height), (1920, 1080));
            sequences.push(frame.sequence);
        }
        assert_eq!(sequences, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_detector_results() {
        let recording = Recording::from_json(SAMPLE).unwrap();
        let detector = recording.detector();

        let regions = detector.detect(&Frame::new(0, 1920, 1080, Vec::<u8>::new())).await.unwrap();
        assert_eq!(regions[0].text.as_deref(), Some("EXIT"));

        let err = detector.detect(&Frame::new(1, 1920, 1080, Vec::<u8>::new())).await.unwrap_err();
        assert!(matches!(err, DetectionError::Engine(ref m) if m == "request timed out"));

        let regions = detector.detect(&Frame::new(2, 1920, 1080, Vec::<u8>::new())).await.unwrap();
        assert!(regions.is_empty());

        let err = detector.detect(&Frame::new(9, 1920, 1080, Vec::<u8>::new())).await.unwrap_err();
        assert!(matches!(err, DetectionError::UnknownFrame(9)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let recording = Recording::load(&path).await.unwrap();
        assert_eq!(recording.frames.len(), 3);

        let err = Recording::load(dir.path().join("missing.json")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read recording"));
    }
}
