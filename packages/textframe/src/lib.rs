//! # textframe
//!
//! Draws boxes around text found in camera frames.
//!
//! Frames come from a [`CaptureProvider`], text comes from a
//! [`DetectionProvider`], and every detection result is turned into an
//! [`Overlay`] of word and character rectangles in surface pixels, which then
//! replaces whatever the [`RenderSurface`] showed before.
//!
//! ## Features
//!
//! - **Overlay mapping**: normalized, bottom-left-origin detection boxes to top-left-origin pixel rectangles
//! - **Frame pipeline**: capture, detection and rendering on separate tasks joined by channels
//! - **Recording replay**: JSON recordings stand in for a live camera and vision service
//! - **Reports**: the overlay presented for every frame, as JSON
//!
//! ## Quick Start
//!
//! ```ignore
//! use textframe::prelude::*;
//! use std::sync::Arc;
//!
//! let recording = Recording::load("session.json").await?;
//! let run = FramePipeline::new(
//!     Box::new(recording.capture()),
//!     Arc::new(recording.detector()),
//!     RecordingSurface::new(SurfaceSize::new(1080.0, 1920.0)),
//!     PipelineOptions::default(),
//! )
//! .run()
//! .await?;
//! println!("{} overlays drawn", run.stats.overlays_applied);
//! ```

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod replay;
pub mod report;
pub mod surface;

// Re-export commonly used types at the root level
pub use config::{Config, FrameDelivery};
pub use pipeline::{FramePipeline, PipelineOptions, PipelineRun, PipelineStats};
pub use replay::{RecordedFrame, Recording, ReplayCapture, ReplayDetector};
pub use report::OverlayReport;
pub use surface::{PresentedFrame, RecordingSurface, RenderSurface};
pub use textframe_vision::{
    map_character_box, map_word_box, refresh_overlay, refresh_overlay_with, BoxKind, CaptureError,
    CaptureProvider, CharacterBox, DetectionError, DetectionProvider, DisplayRect, Frame,
    Intrinsics, NormalizedRegion, Orientation, OutlineColor, Overlay, OverlayItem, OverlayStyle,
    OverlayTheme, Point, SurfaceSize,
};

/// Prelude module for convenient imports
///
/// ```ignore
/// use textframe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        map_character_box, map_word_box, refresh_overlay, refresh_overlay_with, BoxKind,
        CaptureProvider, CharacterBox, Config, DetectionProvider, DisplayRect, FramePipeline,
        NormalizedRegion, Overlay, OverlayReport, OverlayTheme, PipelineOptions, Point, Recording,
        RecordingSurface, RenderSurface, SurfaceSize,
    };
}
