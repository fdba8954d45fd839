use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// EXIF-style orientation of the pixel buffer relative to the upright image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

impl Orientation {
    /// The EXIF tag value (1..=8).
    pub fn exif_value(self) -> u8 {
        match self {
            Orientation::Up => 1,
            Orientation::UpMirrored => 2,
            Orientation::Down => 3,
            Orientation::DownMirrored => 4,
            Orientation::LeftMirrored => 5,
            Orientation::Right => 6,
            Orientation::RightMirrored => 7,
            Orientation::Left => 8,
        }
    }
}

/// Row-major 3x3 camera intrinsic matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics(pub [[f32; 3]; 3]);

impl Intrinsics {
    pub fn focal_length(&self) -> (f32, f32) {
        (self.0[0][0], self.0[1][1])
    }

    pub fn principal_point(&self) -> (f32, f32) {
        (self.0[0][2], self.0[1][2])
    }
}

/// A single captured frame as handed from capture to detection.
#[derive(Debug, Clone)]
pub struct Frame {
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
    pub orientation: Orientation,
    pub intrinsics: Option<Intrinsics>,
    pub captured_at: DateTime<Utc>,
}

impl Frame {
    pub fn new(sequence: u64, width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            sequence,
            width,
            height,
            pixels: pixels.into(),
            orientation: Orientation::default(),
            intrinsics: None,
            captured_at: Utc::now(),
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_intrinsics(mut self, intrinsics: Option<Intrinsics>) -> Self {
        self.intrinsics = intrinsics;
        self
    }
}
