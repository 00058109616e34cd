use serde::{Deserialize, Serialize};

use super::ui::Point2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Window-independent input, in viewport pixels with a top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewerEvent {
    PointerMove { pos: Point2 },
    ButtonPress { button: PointerButton, pos: Point2 },
    ButtonRelease { button: PointerButton, pos: Point2 },
    /// Positive notches zoom in.
    Scroll { notches: f32 },
    Resize { width: f32, height: f32 },
}
