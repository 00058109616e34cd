mod input;
mod overlay;
mod scene;
mod ui;

pub use input::{PointerButton, ViewerEvent};
pub use overlay::{OverlayCollector, OverlayPainter, OverlayShape};
pub use scene::{FaceShade, face_shades, paint_scene};
pub use ui::{Align2, Color32, Point2, Rect, Stroke, Vec2, pos2, vec2};
