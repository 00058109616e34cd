use super::ui::{Align2, Color32, Point2, Rect, Stroke};

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayShape {
    Gradient {
        rect: Rect,
        top: Color32,
        bottom: Color32,
    },
    Line {
        start: Point2,
        end: Point2,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point2>,
        fill: Color32,
        stroke: Stroke,
    },
    Text {
        pos: Point2,
        align: Align2,
        text: String,
        size: f32,
        color: Color32,
    },
    /// Text centred on `center`, its baseline turned by `angle` radians
    /// clockwise on screen.
    RotatedText {
        center: Point2,
        angle: f32,
        text: String,
        size: f32,
        color: Color32,
    },
}

pub trait OverlayPainter {
    fn rect_gradient(&mut self, rect: Rect, top: Color32, bottom: Color32);
    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke);
    /// `points` must describe a convex polygon.
    fn polygon(&mut self, points: Vec<Point2>, fill: Color32, stroke: Stroke);
    fn text(&mut self, pos: Point2, align: Align2, text: String, size: f32, color: Color32);
    fn rotated_text(&mut self, center: Point2, angle: f32, text: String, size: f32, color: Color32);
}

/// Records every call, for tests and for headless inspection of a frame.
#[derive(Default)]
pub struct OverlayCollector {
    pub shapes: Vec<OverlayShape>,
}

impl OverlayCollector {
    pub fn polygons(&self) -> impl Iterator<Item = (&[Point2], Color32)> {
        self.shapes.iter().filter_map(|shape| match shape {
            OverlayShape::Polygon { points, fill, .. } => Some((points.as_slice(), *fill)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|shape| match shape {
            OverlayShape::Text { text, .. } | OverlayShape::RotatedText { text, .. } => {
                Some(text.as_str())
            }
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point2, Point2, Stroke)> + '_ {
        self.shapes.iter().filter_map(|shape| match shape {
            OverlayShape::Line { start, end, stroke } => Some((*start, *end, *stroke)),
            _ => None,
        })
    }
}

impl OverlayPainter for OverlayCollector {
    fn rect_gradient(&mut self, rect: Rect, top: Color32, bottom: Color32) {
        self.shapes.push(OverlayShape::Gradient { rect, top, bottom });
    }

    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke) {
        self.shapes.push(OverlayShape::Line { start, end, stroke });
    }

    fn polygon(&mut self, points: Vec<Point2>, fill: Color32, stroke: Stroke) {
        self.shapes.push(OverlayShape::Polygon {
            points,
            fill,
            stroke,
        });
    }

    fn text(&mut self, pos: Point2, align: Align2, text: String, size: f32, color: Color32) {
        self.shapes.push(OverlayShape::Text {
            pos,
            align,
            text,
            size,
            color,
        });
    }

    fn rotated_text(&mut self, center: Point2, angle: f32, text: String, size: f32, color: Color32) {
        self.shapes.push(OverlayShape::RotatedText {
            center,
            angle,
            text,
            size,
            color,
        });
    }
}
