//! Maps normalized text observations onto a pixel-space drawing surface.
//!
//! Detection results use a bottom-left origin in `0..1` space, while the
//! surface uses a top-left origin in pixels, so every mapping flips the y axis.
//! Nothing here validates geometry: inverted or degenerate boxes come out as
//! zero-area or negative-sized rectangles and are left to the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::region::{CharacterBox, NormalizedRegion};

/// Starting value for the left/bottom scans of [`map_word_box`].
const WORD_SCAN_SENTINEL: f64 = 9999.0;

/// Pixel dimensions of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Rectangle in surface pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineColor {
    Red,
    Blue,
}

impl fmt::Display for OutlineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineColor::Red => f.write_str("red"),
            OutlineColor::Blue => f.write_str("blue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    pub stroke_width: f64,
    pub color: OutlineColor,
}

impl OverlayStyle {
    pub const WORD: OverlayStyle = OverlayStyle {
        stroke_width: 2.0,
        color: OutlineColor::Red,
    };

    pub const CHARACTER: OverlayStyle = OverlayStyle {
        stroke_width: 1.0,
        color: OutlineColor::Blue,
    };
}

/// Styles applied per granularity by [`refresh_overlay_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayTheme {
    pub word: OverlayStyle,
    pub character: OverlayStyle,
}

impl Default for OverlayTheme {
    fn default() -> Self {
        Self {
            word: OverlayStyle::WORD,
            character: OverlayStyle::CHARACTER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    Word,
    Character,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayItem {
    pub kind: BoxKind,
    pub rect: DisplayRect,
    pub style: OverlayStyle,
}

/// Everything drawn for one frame. Replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Overlay {
    pub items: Vec<OverlayItem>,
}

impl Overlay {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn word_count(&self) -> usize {
        self.count(BoxKind::Word)
    }

    pub fn character_count(&self) -> usize {
        self.count(BoxKind::Character)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayItem> {
        self.items.iter()
    }

    fn count(&self, kind: BoxKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }
}

impl IntoIterator for Overlay {
    type Item = OverlayItem;
    type IntoIter = std::vec::IntoIter<OverlayItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Box enclosing every character of `region`, or `None` when it has none.
///
/// Left and bottom come from the smallest `bottom_left.x` and
/// `bottom_right.y`, right and top from the largest `bottom_right.x` and
/// `top_right.y`. Right and top start at 0.0, so they never go negative.
pub fn map_word_box(region: &NormalizedRegion, surface: SurfaceSize) -> Option<DisplayRect> {
    if region.character_boxes.is_empty() {
        return None;
    }

    let mut left = WORD_SCAN_SENTINEL;
    let mut right = 0.0;
    let mut bottom = WORD_SCAN_SENTINEL;
    let mut top = 0.0;

    for character in &region.character_boxes {
        if character.bottom_left.x < left {
            left = character.bottom_left.x;
        }
        if character.bottom_right.x > right {
            right = character.bottom_right.x;
        }
        if character.bottom_right.y < bottom {
            bottom = character.bottom_right.y;
        }
        if character.top_right.y > top {
            top = character.top_right.y;
        }
    }

    Some(DisplayRect {
        x: left * surface.width,
        y: (1.0 - top) * surface.height,
        width: (right - left) * surface.width,
        height: (top - bottom) * surface.height,
    })
}

pub fn map_character_box(character: &CharacterBox, surface: SurfaceSize) -> DisplayRect {
    DisplayRect {
        x: character.top_left.x * surface.width,
        y: (1.0 - character.top_left.y) * surface.height,
        width: (character.top_right.x - character.bottom_left.x) * surface.width,
        height: (character.top_left.y - character.bottom_left.y) * surface.height,
    }
}

/// Builds the overlay for one frame with the default word/character styles.
pub fn refresh_overlay(regions: &[NormalizedRegion], surface: SurfaceSize) -> Overlay {
    refresh_overlay_with(regions, surface, &OverlayTheme::default())
}

/// Each region contributes its word box (if it has characters) followed by
/// its character boxes in input order.
pub fn refresh_overlay_with(
    regions: &[NormalizedRegion],
    surface: SurfaceSize,
    theme: &OverlayTheme,
) -> Overlay {
    let capacity = regions.iter().map(|r| r.character_boxes.len() + 1).sum();
    let mut items = Vec::with_capacity(capacity);

    for region in regions {
        if let Some(rect) = map_word_box(region, surface) {
            items.push(OverlayItem {
                kind: BoxKind::Word,
                rect,
                style: theme.word,
            });
        }
        items.extend(region.character_boxes.iter().map(|character| OverlayItem {
            kind: BoxKind::Character,
            rect: map_character_box(character, surface),
            style: theme.character,
        }));
    }

    Overlay { items }
}
