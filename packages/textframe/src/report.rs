use crate::pipeline::{PipelineRun, PipelineStats};
use crate::replay::Recording;
use crate::surface::{PresentedFrame, RecordingSurface, RenderSurface};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use textframe_vision::{refresh_overlay_with, OverlayTheme, SurfaceSize};
use tokio::fs;
use tracing::{info, warn};

pub const REPORT_VERSION: &str = "1.0";

/// JSON document describing the overlays drawn for a recording
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayReport {
    pub version: String,
    pub generated_at: String,
    pub surface: SurfaceSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PipelineStats>,
    /// Frames whose detection failed and therefore drew nothing new
    #[serde(default)]
    pub skipped_frames: Vec<u64>,
    pub frames: Vec<PresentedFrame>,
}

impl OverlayReport {
    fn new(surface: SurfaceSize, frames: Vec<PresentedFrame>) -> Self {
        Self {
            version: REPORT_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            surface,
            stats: None,
            skipped_frames: Vec::new(),
            frames,
        }
    }

    /// Report for a finished pipeline run over a [`RecordingSurface`].
    pub fn from_run(run: PipelineRun<RecordingSurface>) -> Self {
        let surface = run.surface.surface_size();
        let mut report = Self::new(surface, run.surface.into_history());
        report.stats = Some(run.stats);
        report.skipped_frames = run.failed_frames;
        report
    }

    /// Maps every recorded frame directly, without the pipeline.
    pub fn map_recording(
        recording: &Recording,
        surface: SurfaceSize,
        theme: &OverlayTheme,
    ) -> Self {
        let mut frames = Vec::with_capacity(recording.frames.len());
        let mut skipped_frames = Vec::new();

        for (sequence, frame) in recording.sequenced() {
            match frame.detection() {
                Ok(regions) => frames.push(PresentedFrame {
                    sequence,
                    overlay: refresh_overlay_with(regions, surface, theme),
                }),
                Err(error) => {
                    warn!(sequence, error, "skipping frame with failed detection");
                    skipped_frames.push(sequence);
                }
            }
        }

        let mut report = Self::new(surface, frames);
        report.skipped_frames = skipped_frames;
        report
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report to `output`, or to stdout when no path is given.
    pub async fn write(&self, output: Option<&Path>) -> Result<()> {
        let json = self.to_json()?;
        match output {
            Some(path) => {
                fs::write(path, json)
                    .await
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                info!(path = %path.display(), frames = self.frames.len(), "overlay report written");
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{FramePipeline, PipelineOptions};
    use crate::config::FrameDelivery;
    use std::sync::Arc;

    const RECORDING: &str = r#"{
        "frames": [
            { "width": 100, "height": 100, "regions": [
                { "characterBoxes": [
                    { "bottomLeft": {"x": 0.1, "y": 0.1}, "bottomRight": {"x": 0.2, "y": 0.1},
                      "topLeft": {"x": 0.1, "y": 0.3}, "topRight": {"x": 0.2, "y": 0.3} }
                ] }
            ] },
            { "width": 100, "height": 100, "error": "vision request failed" },
            { "width": 100, "height": 100, "regions": [] }
        ]
    }"#;

    #[test]
    fn test_map_recording_skips_failed_frames() {
        let recording = Recording::from_json(RECORDING).unwrap();
        let surface = SurfaceSize::new(10.0, 10.0);
        let report = OverlayReport::map_recording(&recording, surface, &OverlayTheme::default());

        assert_eq!(report.version, REPORT_VERSION);
        assert!(report.stats.is_none());
        assert_eq!(report.skipped_frames, vec![1]);
        let sequences: Vec<u64> = report.frames.iter().map(|f| f.sequence).collect();
        assert_eq!(sequences, vec![0, 2]);
        assert_eq!(report.frames[0].overlay.len(), 2);
        assert!(report.frames[1].overlay.is_empty());
    }

    #[tokio::test]
    async fn test_report_from_run() {
        let recording = Recording::from_json(RECORDING).unwrap();
        let options = PipelineOptions {
            frame_delivery: FrameDelivery::Wait,
            ..PipelineOptions::default()
        };
        let run = FramePipeline::new(
            Box::new(recording.capture()),
            Arc::new(recording.detector()),
            RecordingSurface::new(SurfaceSize::new(10.0, 10.0)),
            options,
        )
        .run()
        .await
        .unwrap();

        let report = OverlayReport::from_run(run);
        let stats = report.stats.unwrap();
        assert_eq!(stats.frames_captured, 3);
        assert_eq!(stats.detection_failures, 1);
        assert_eq!(report.skipped_frames, vec![1]);
        assert_eq!(report.frames.len(), 2);

        let json = report.to_json().unwrap();
        assert!(json.contains("\"generatedAt\""));
        assert!(json.contains("\"framesCaptured\": 3"));
        assert!(json.contains("\"color\": \"red\""));
    }

    #[tokio::test]
    async fn test_write_to_file() {
        let recording = Recording::from_json(RECORDING).unwrap();
        let surface = SurfaceSize::new(10.0, 10.0);
        let report = OverlayReport::map_recording(&recording, surface, &OverlayTheme::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.json");
        report.write(Some(path.as_path())).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let written: OverlayReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(written.frames, report.frames);
        assert_eq!(written.skipped_frames, vec![1]);
    }
}
