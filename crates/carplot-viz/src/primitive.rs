use carplot_core::{AxisConvention, Scalar, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color { Black, Blue, Red, Green }

impl Color {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::Black => [0, 0, 0],
            Color::Blue  => [0, 0, 255],
            Color::Red   => [255, 0, 0],
            Color::Green => [0, 128, 0],
        }
    }
    pub fn code(self) -> u8 { self as u8 }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: Scalar,
    pub dashed: bool,
}

impl Stroke {
    pub const fn solid(color: Color) -> Self { Self { color, width: 1.0, dashed: false } }
    pub const fn dashed(color: Color) -> Self { Self { color, width: 1.0, dashed: true } }
    pub fn with_width(mut self, width: Scalar) -> Self { self.width = width; self }
}

/// Arrow shaft/head dimensions in world length units.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowStyle {
    pub width: Scalar,
    pub head_width: Scalar,
    pub head_length: Scalar,
    /// Head drawn inside the `tail→tip` segment (true) or appended past the tip.
    pub includes_head: bool,
}

impl ArrowStyle {
    /// Force/velocity vectors.
    pub const VECTOR: Self = Self { width: 0.01, head_width: 0.05, head_length: 0.1, includes_head: true };
    /// Yaw-rate arc head.
    pub const ARC_HEAD: Self = Self { width: 0.001, head_width: 0.05, head_length: 0.1, includes_head: false };
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Polyline { points: Vec<Vec2>, stroke: Stroke },
    FilledPolygon { points: Vec<Vec2>, color: Color },
    Circle { center: Vec2, radius: Scalar, stroke: Stroke },
    Arrow { tail: Vec2, tip: Vec2, style: ArrowStyle, color: Color },
    Text { pos: Vec2, text: String, color: Color, size: Scalar },
}

impl Primitive {
    /// Applies `f` to every point the primitive carries (circle centre included).
    pub fn map_points(&mut self, mut f: impl FnMut(Vec2) -> Vec2) {
        match self {
            Primitive::Polyline { points, .. } | Primitive::FilledPolygon { points, .. } => {
                for p in points.iter_mut() { *p = f(*p); }
            }
            Primitive::Circle { center, .. } => *center = f(*center),
            Primitive::Arrow { tail, tip, .. } => { *tail = f(*tail); *tip = f(*tip); }
            Primitive::Text { pos, .. } => *pos = f(*pos),
        }
    }

    pub fn points(&self) -> Vec<Vec2> {
        match self {
            Primitive::Polyline { points, .. } | Primitive::FilledPolygon { points, .. } => points.clone(),
            Primitive::Circle { center, .. } => vec![*center],
            Primitive::Arrow { tail, tip, .. } => vec![*tail, *tip],
            Primitive::Text { pos, .. } => vec![*pos],
        }
    }

    pub fn with_convention(mut self, convention: AxisConvention) -> Self {
        self.map_points(|p| convention.apply(p));
        self
    }

    /// Swaps the two channels of every point.
    pub fn transposed(self) -> Self { self.with_convention(AxisConvention::ZDown) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transposed_touches_every_point() {
        let a = Primitive::Arrow {
            tail: Vec2::new(1.0, 2.0), tip: Vec2::new(3.0, 4.0),
            style: ArrowStyle::VECTOR, color: Color::Red,
        };
        match a.transposed() {
            Primitive::Arrow { tail, tip, .. } => {
                assert_eq!(tail, Vec2::new(2.0, 1.0));
                assert_eq!(tip, Vec2::new(4.0, 3.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn z_up_leaves_points_alone() {
        let c = Primitive::Circle { center: Vec2::new(0.5, -1.0), radius: 0.1, stroke: Stroke::solid(Color::Black) };
        assert_eq!(c.clone().with_convention(AxisConvention::ZUp), c);
    }
}
