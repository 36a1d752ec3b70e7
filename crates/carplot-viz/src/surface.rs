use carplot_core::{Scalar, Vec2};

use crate::primitive::{ArrowStyle, Color, Stroke};

/// Drawing backend. Points arrive already mapped through the scene's axis
/// convention, in world length units.
pub trait DrawSurface {
    fn polyline(&mut self, points: &[Vec2], stroke: &Stroke);
    fn filled_polygon(&mut self, points: &[Vec2], color: Color);
    fn circle(&mut self, center: Vec2, radius: Scalar, stroke: &Stroke);
    fn arrow(&mut self, tail: Vec2, tip: Vec2, style: &ArrowStyle, color: Color);
    fn text(&mut self, pos: Vec2, text: &str, color: Color, size: Scalar);
}
