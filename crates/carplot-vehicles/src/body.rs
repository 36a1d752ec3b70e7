//! Body-frame glyphs. The CG sits at the world origin.

use carplot_core::{check_ratio, rotate, rotate_translate, PlotError, Scalar, Vec2};
use carplot_viz::{arc_arrow, cg_sign, vector_with_label, Color, Primitive};
use serde::{Deserialize, Serialize};

/// Body box in metres, centred on the CG.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySize {
    /// Along body x.
    pub length: Scalar,
    /// Along body y.
    pub width: Scalar,
}

impl Default for BodySize {
    fn default() -> Self { Self { length: 4.5, width: 1.8 } }
}

/// Closed body rectangle rotated by `heading` about the CG.
pub fn body_outline(size: BodySize, heading: Scalar) -> [Vec2; 5] {
    let (hl, hw) = (size.length * 0.5, size.width * 0.5);
    let local = [
        Vec2::new(hl, hw),
        Vec2::new(hl, -hw),
        Vec2::new(-hl, -hw),
        Vec2::new(-hl, hw),
        Vec2::new(hl, hw),
    ];
    let w = rotate_translate(&local, heading, Vec2::ZERO);
    [w[0], w[1], w[2], w[3], w[4]]
}

/// Half-filled CG symbol at the origin. Independent of heading.
pub fn cg_marker(radius: Scalar) -> Vec<Primitive> { cg_sign(radius) }

/// Curved arrow around the CG: 0→180° for positive yaw rate, 0→-180°
/// otherwise. Only the sign of `yaw_rate` matters.
pub fn yaw_rate_arc(yaw_rate: Scalar, radius: Scalar) -> Vec<Primitive> {
    let end = if yaw_rate > 0.0 { 180.0 } else { -180.0 };
    arc_arrow(Vec2::ZERO, radius, 0.0, end, 0.5)
}

/// The `r` label placed next to the yaw arc.
pub fn yaw_label(radius: Scalar) -> Primitive {
    Primitive::Text { pos: Vec2::new(0.0, 2.0 * radius), text: "r".to_string(), color: Color::Black, size: 10.0 }
}

/// Body velocity arrow from the CG plus its `V` label.
///
/// `vel_body_frame / velocity_length_ratio` is rotated into the world frame;
/// the label sits `label_offset` past the tip, turned `label_turn` from the
/// arrow direction.
pub fn body_velocity_vector(
    vel_body_frame: Vec2,
    heading: Scalar,
    velocity_length_ratio: Scalar,
    label_offset: Scalar,
    label_turn: Scalar,
) -> Result<Vec<Primitive>, PlotError> {
    let ratio = check_ratio("velocity_length_ratio", velocity_length_ratio)?;
    let tip = rotate(vel_body_frame / ratio, heading);
    Ok(vector_with_label(Vec2::ZERO, tip, "V", label_offset, label_turn, Color::Black))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use carplot_viz::ARC_RESOLUTION;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn arc_end(prims: &[Primitive]) -> Vec2 {
        match &prims[0] {
            Primitive::Polyline { points, .. } => points[points.len() - 1],
            other => panic!("unexpected {other:?}"),
        }
    }

    fn arc_mid(prims: &[Primitive]) -> Vec2 {
        match &prims[0] {
            Primitive::Polyline { points, .. } => points[ARC_RESOLUTION / 2],
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn outline_turns_with_heading() {
        let o = body_outline(BodySize::default(), FRAC_PI_2);
        assert_eq!(o[0], o[4]);
        assert_relative_eq!(o[0].x, -0.9, epsilon = 1e-5);
        assert_relative_eq!(o[0].y, 2.25, epsilon = 1e-5);
    }

    #[test]
    fn yaw_arc_direction_follows_sign_only() {
        let pos = yaw_rate_arc(0.5, 0.2);
        let neg = yaw_rate_arc(-0.5, 0.2);
        assert!(arc_mid(&pos).y > 0.0);
        assert!(arc_mid(&neg).y < 0.0);
        assert_relative_eq!(arc_end(&pos).x, -0.2, epsilon = 1e-5);
        assert_relative_eq!(arc_end(&neg).x, -0.2, epsilon = 1e-5);
        assert_eq!(yaw_rate_arc(0.5, 0.2), yaw_rate_arc(50.0, 0.2));
        assert_eq!(yaw_rate_arc(-0.5, 0.2), yaw_rate_arc(-0.001, 0.2));
    }

    #[test]
    fn velocity_vector_is_scaled_and_rotated() {
        let prims = body_velocity_vector(Vec2::new(10.0, 0.0), FRAC_PI_2, 10.0, 0.3, 5.0 / 6.0 * PI).unwrap();
        match &prims[0] {
            Primitive::Arrow { tail, tip, .. } => {
                assert_eq!(*tail, Vec2::ZERO);
                assert_relative_eq!(tip.x, 0.0, epsilon = 1e-6);
                assert_relative_eq!(tip.y, 1.0, epsilon = 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(body_velocity_vector(Vec2::X, 0.0, 0.0, 0.3, 1.0).is_err());
    }
}
