//! The drawing side of the pipeline. Only the render loop touches a surface.
use serde::{Deserialize, Serialize};
use textframe_vision::{Overlay, OverlayItem, SurfaceSize};

/// Something bordered rectangles can be drawn on.
pub trait RenderSurface: Send {
    fn surface_size(&self) -> SurfaceSize;

    fn clear(&mut self);

    fn add(&mut self, item: OverlayItem);

    /// Drops everything drawn so far and draws `overlay` instead.
    fn replace(&mut self, overlay: Overlay) {
        self.clear();
        for item in overlay {
            self.add(item);
        }
    }

    /// Called by the render loop once per overlay, in frame order.
    fn present(&mut self, _sequence: u64, overlay: Overlay) {
        self.replace(overlay);
    }
}

/// An overlay as it was shown for a given frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedFrame {
    pub sequence: u64,
    pub overlay: Overlay,
}

/// In-memory surface that remembers every overlay it presented.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    current: Vec<OverlayItem>,
    history: Vec<PresentedFrame>,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            current: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    /// Items currently drawn.
    pub fn current(&self) -> &[OverlayItem] {
        &self.current
    }

    pub fn history(&self) -> &[PresentedFrame] {
        &self.history
    }

    pub fn into_history(self) -> Vec<PresentedFrame> {
        self.history
    }
}

impl RenderSurface for RecordingSurface {
    fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.current.clear();
    }

    fn add(&mut self, item: OverlayItem) {
        self.current.push(item);
    }

    fn present(&mut self, sequence: u64, overlay: Overlay) {
        self.replace(overlay.clone());
        self.history.push(PresentedFrame { sequence, overlay });
    }
}
