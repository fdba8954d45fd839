pub mod engine;
pub mod frame;
pub mod overlay;
pub mod region;

pub use engine::{CaptureError, CaptureProvider, DetectionError, DetectionProvider};
pub use frame::{Frame, Intrinsics, Orientation};
pub use overlay::{
    map_character_box, map_word_box, refresh_overlay, refresh_overlay_with, BoxKind, DisplayRect,
    OutlineColor, Overlay, OverlayItem, OverlayStyle, OverlayTheme, SurfaceSize,
};
pub use region::{CharacterBox, NormalizedRegion, Point};
