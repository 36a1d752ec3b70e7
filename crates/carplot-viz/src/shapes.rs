//! Reusable diagram glyphs: arcs, filled sectors, the CG sign, the curved
//! yaw arrow and labelled vectors. All output is in world coordinates.

use carplot_core::{Scalar, Vec2};

use crate::primitive::{ArrowStyle, Color, Primitive, Stroke};

pub const ARC_RESOLUTION: usize = 50;

/// `resolution` evenly spaced points from `theta1_deg` to `theta2_deg`, both ends included.
pub fn arc_points(center: Vec2, radius: Scalar, theta1_deg: Scalar, theta2_deg: Scalar, resolution: usize) -> Vec<Vec2> {
    let n = resolution.max(2);
    let (t1, t2) = (theta1_deg.to_radians(), theta2_deg.to_radians());
    (0..n)
        .map(|i| {
            let t = t1 + (t2 - t1) * (i as Scalar / (n - 1) as Scalar);
            center + radius * Vec2::from_angle(t)
        })
        .collect()
}

/// Pie slice: the arc plus the centre, closed.
pub fn arc_sector(center: Vec2, radius: Scalar, theta1_deg: Scalar, theta2_deg: Scalar, color: Color) -> Primitive {
    let mut points = arc_points(center, radius, theta1_deg, theta2_deg, ARC_RESOLUTION);
    points.push(center);
    Primitive::FilledPolygon { points, color }
}

/// Centre-of-gravity symbol at the origin: outlined circle with the second
/// and fourth quadrants filled.
pub fn cg_sign(radius: Scalar) -> Vec<Primitive> {
    vec![
        Primitive::Circle { center: Vec2::ZERO, radius, stroke: Stroke::solid(Color::Black).with_width(0.5) },
        arc_sector(Vec2::ZERO, radius, 90.0, 180.0, Color::Black),
        arc_sector(Vec2::ZERO, radius, 270.0, 360.0, Color::Black),
    ]
}

/// Arc with an arrow head on its last segment.
pub fn arc_arrow(center: Vec2, radius: Scalar, theta1_deg: Scalar, theta2_deg: Scalar, line_width: Scalar) -> Vec<Primitive> {
    let points = arc_points(center, radius, theta1_deg, theta2_deg, ARC_RESOLUTION);
    let n = points.len();
    let (tail, tip) = (points[n - 2], points[n - 1]);
    vec![
        Primitive::Polyline { points, stroke: Stroke::solid(Color::Black).with_width(line_width) },
        Primitive::Arrow { tail, tip, style: ArrowStyle::ARC_HEAD, color: Color::Black },
    ]
}

/// Arrow `tail → tip` with a label past the tip. The label sits `offset` away
/// from the tip along the arrow direction turned by `turn` radians, so it
/// doubles back beside the head instead of covering it.
pub fn vector_with_label(tail: Vec2, tip: Vec2, text: &str, offset: Scalar, turn: Scalar, color: Color) -> Vec<Primitive> {
    let d = tip - tail;
    let angle = d.y.atan2(d.x);
    let pos = tip + offset * Vec2::from_angle(angle + turn);
    vec![
        Primitive::Arrow { tail, tip, style: ArrowStyle::VECTOR, color },
        Primitive::Text { pos, text: text.to_string(), color, size: 10.0 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn arc_spans_requested_angles() {
        let pts = arc_points(Vec2::ZERO, 2.0, 0.0, 180.0, ARC_RESOLUTION);
        assert_eq!(pts.len(), ARC_RESOLUTION);
        assert_relative_eq!(pts[0].x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(pts[ARC_RESOLUTION - 1].x, -2.0, epsilon = 1e-5);
        assert!(pts[ARC_RESOLUTION / 2].y > 1.9);
    }

    #[test]
    fn sector_closes_on_center() {
        match arc_sector(Vec2::new(1.0, 1.0), 0.1, 90.0, 180.0, Color::Black) {
            Primitive::FilledPolygon { points, .. } => {
                assert_eq!(points.len(), ARC_RESOLUTION + 1);
                assert_eq!(*points.last().unwrap(), Vec2::new(1.0, 1.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cg_sign_fills_opposite_quadrants() {
        let prims = cg_sign(0.1);
        assert_eq!(prims.len(), 3);
        let quadrant_mid = |p: &Primitive| match p {
            Primitive::FilledPolygon { points, .. } => points[ARC_RESOLUTION / 2],
            other => panic!("unexpected {other:?}"),
        };
        let q2 = quadrant_mid(&prims[1]);
        let q4 = quadrant_mid(&prims[2]);
        assert!(q2.x < 0.0 && q2.y > 0.0);
        assert!(q4.x > 0.0 && q4.y < 0.0);
    }

    #[test]
    fn label_turns_back_from_tip() {
        let prims = vector_with_label(Vec2::ZERO, Vec2::new(1.0, 0.0), "V", 0.3, 5.0 / 6.0 * PI, Color::Black);
        match &prims[1] {
            Primitive::Text { pos, text, .. } => {
                assert_eq!(text, "V");
                assert_relative_eq!(pos.x, 1.0 + 0.3 * (5.0 / 6.0 * PI).cos(), epsilon = 1e-6);
                assert_relative_eq!(pos.y, 0.3 * (5.0 / 6.0 * PI).sin(), epsilon = 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
