//! Capture -> detection -> overlay -> surface.
//!
//! Three stages connected by channels:
//!
//! - a capture pump that pulls frames from the [`CaptureProvider`] and queues them,
//! - a single detection task that runs the [`DetectionProvider`] on each queued
//!   frame in order and maps the result into an [`Overlay`],
//! - the render loop, which owns the [`RenderSurface`] and presents each overlay.
//!
//! The surface size flows back from the render loop to the detection task over
//! a watch channel, so overlays are always mapped against the latest size.
use crate::config::{Config, FrameDelivery};
use crate::surface::RenderSurface;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use textframe_vision::{
    refresh_overlay_with, CaptureProvider, DetectionProvider, Frame, Overlay, OverlayTheme,
    SurfaceSize,
};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Options for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub channel_capacity: usize,
    pub frame_delivery: FrameDelivery,
    pub theme: OverlayTheme,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            channel_capacity: config.channel_capacity,
            frame_delivery: config.frame_delivery,
            theme: config.theme,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub frames_captured: u64,
    pub frames_dropped: u64,
    pub frames_detected: u64,
    pub detection_failures: u64,
    pub overlays_applied: u64,
}

/// What a finished run hands back: counters plus the surface it drew on.
#[derive(Debug)]
pub struct PipelineRun<S> {
    pub stats: PipelineStats,
    /// Sequences whose detection failed, in order
    pub failed_frames: Vec<u64>,
    pub surface: S,
}

struct FrameOverlay {
    sequence: u64,
    overlay: Overlay,
}

#[derive(Default)]
struct CaptureCounts {
    captured: u64,
    dropped: u64,
}

#[derive(Default)]
struct DetectionCounts {
    detected: u64,
    failed: Vec<u64>,
}

pub struct FramePipeline<S> {
    capture: Box<dyn CaptureProvider>,
    detector: Arc<dyn DetectionProvider>,
    surface: S,
    options: PipelineOptions,
}

impl<S: RenderSurface> FramePipeline<S> {
    pub fn new(
        capture: Box<dyn CaptureProvider>,
        detector: Arc<dyn DetectionProvider>,
        surface: S,
        options: PipelineOptions,
    ) -> Self {
        Self {
            capture,
            detector,
            surface,
            options,
        }
    }

    /// Runs until the capture stream ends and every queued frame is handled.
    pub async fn run(self) -> Result<PipelineRun<S>> {
        let FramePipeline {
            capture,
            detector,
            mut surface,
            options,
        } = self;

        let capacity = options.channel_capacity.max(1);
        let (frame_tx, frame_rx) = mpsc::channel::<Frame>(capacity);
        let (overlay_tx, mut overlay_rx) = mpsc::channel::<FrameOverlay>(capacity);
        let (size_tx, size_rx) = watch::channel(surface.surface_size());

        info!(
            capacity,
            delivery = ?options.frame_delivery,
            surface = %surface.surface_size(),
            "starting frame pipeline"
        );

        let capture_task = tokio::spawn(pump_frames(capture, frame_tx, options.frame_delivery));
        let detection_task = tokio::spawn(detect_frames(
            detector,
            frame_rx,
            overlay_tx,
            size_rx,
            options.theme,
        ));

        let mut overlays_applied = 0;
        while let Some(FrameOverlay { sequence, overlay }) = overlay_rx.recv().await {
            debug!(
                sequence,
                words = overlay.word_count(),
                characters = overlay.character_count(),
                "presenting overlay"
            );
            surface.present(sequence, overlay);
            overlays_applied += 1;
            size_tx.send_if_modified(|size| {
                let latest = surface.surface_size();
                let changed = *size != latest;
                *size = latest;
                changed
            });
        }

        let capture_counts = capture_task.await.context("Capture task panicked")?;
        let detection_counts = detection_task.await.context("Detection task panicked")?;

        let stats = PipelineStats {
            frames_captured: capture_counts.captured,
            frames_dropped: capture_counts.dropped,
            frames_detected: detection_counts.detected,
            detection_failures: detection_counts.failed.len() as u64,
            overlays_applied,
        };
        info!(?stats, "frame pipeline finished");

        Ok(PipelineRun {
            stats,
            failed_frames: detection_counts.failed,
            surface,
        })
    }
}

async fn pump_frames(
    mut capture: Box<dyn CaptureProvider>,
    frames: mpsc::Sender<Frame>,
    delivery: FrameDelivery,
) -> CaptureCounts {
    let mut counts = CaptureCounts::default();

    loop {
        let frame = match capture.next_frame().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                debug!("capture stream ended");
                break;
            }
            Err(e) => {
                warn!(error = %e, "capture failed; stopping");
                break;
            }
        };
        counts.captured += 1;

        match delivery {
            FrameDelivery::Wait => {
                if frames.send(frame).await.is_err() {
                    break;
                }
            }
            FrameDelivery::DropWhenFull => match frames.try_send(frame) {
                Ok(()) => {}
                Err(TrySendError::Full(frame)) => {
                    counts.dropped += 1;
                    debug!(sequence = frame.sequence, "detection busy; dropping frame");
                }
                Err(TrySendError::Closed(_)) => break,
            },
        }
    }

    counts
}

async fn detect_frames(
    detector: Arc<dyn DetectionProvider>,
    mut frames: mpsc::Receiver<Frame>,
    overlays: mpsc::Sender<FrameOverlay>,
    surface_size: watch::Receiver<SurfaceSize>,
    theme: OverlayTheme,
) -> DetectionCounts {
    let mut counts = DetectionCounts::default();

    while let Some(frame) = frames.recv().await {
        debug!(
            sequence = frame.sequence,
            width = frame.width,
            height = frame.height,
            orientation = frame.orientation.exif_value(),
            focal_length = ?frame.intrinsics.map(|k| k.focal_length()),
            principal_point = ?frame.intrinsics.map(|k| k.principal_point()),
            "detecting text"
        );
        let regions = match detector.detect(&frame).await {
            Ok(regions) => regions,
            Err(e) => {
                counts.failed.push(frame.sequence);
                warn!(
                    sequence = frame.sequence,
                    error = %e,
                    "text detection failed; keeping previous overlay"
                );
                continue;
            }
        };
        counts.detected += 1;

        let size = *surface_size.borrow();
        let overlay = refresh_overlay_with(&regions, size, &theme);
        debug!(
            sequence = frame.sequence,
            regions = regions.len(),
            items = overlay.len(),
            "mapped detections"
        );

        let message = FrameOverlay {
            sequence: frame.sequence,
            overlay,
        };
        if overlays.send(message).await.is_err() {
            break;
        }
    }

    counts
}
