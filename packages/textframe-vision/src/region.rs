use serde::{Deserialize, Serialize};

/// A point in normalized image space: `0.0..=1.0` on both axes, origin at the
/// bottom-left corner of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The four corners of a single detected character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterBox {
    pub bottom_left: Point,
    pub bottom_right: Point,
    pub top_left: Point,
    pub top_right: Point,
}

impl CharacterBox {
    pub fn new(bottom_left: Point, bottom_right: Point, top_left: Point, top_right: Point) -> Self {
        Self {
            bottom_left,
            bottom_right,
            top_left,
            top_right,
        }
    }

    /// Axis-aligned box spanning `left..right` horizontally and `bottom..top`
    /// vertically.
    pub fn from_extents(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            bottom_left: Point::new(left, bottom),
            bottom_right: Point::new(right, bottom),
            top_left: Point::new(left, top),
            top_right: Point::new(right, top),
        }
    }
}

/// A word-level observation and the character boxes it was built from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRegion {
    #[serde(default)]
    pub character_boxes: Vec<CharacterBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl NormalizedRegion {
    pub fn new(character_boxes: Vec<CharacterBox>) -> Self {
        Self {
            character_boxes,
            text: None,
            confidence: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn has_characters(&self) -> bool {
        !self.character_boxes.is_empty()
    }
}
