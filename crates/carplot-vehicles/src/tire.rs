//! Single tire geometry, built in the tire frame (x = rolling direction)
//! and moved into the world frame with the tire's own pose.

use carplot_core::{check_ratio, rotate, rotate_translate, PlotError, Pose2, Scalar, Vec2};
use carplot_viz::{ArrowStyle, Color, Primitive, Scene, Stroke, Tag};
use serde::{Deserialize, Serialize};

use crate::options::RenderOptions;

/// Tire footprint in metres.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TireSize {
    /// Across the tread (tire-frame y).
    pub width: Scalar,
    /// Along the rolling direction (tire-frame x).
    pub length: Scalar,
}

impl Default for TireSize {
    fn default() -> Self { Self { width: 0.3, length: 0.6 } }
}

/// Tire-frame force pair in newtons.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TireForce {
    /// Along the rolling direction.
    pub longitudinal: Scalar,
    /// Perpendicular to the rolling direction.
    pub lateral: Scalar,
}

impl TireForce {
    /// Convenience constructor.
    pub const fn new(longitudinal: Scalar, lateral: Scalar) -> Self { Self { longitudinal, lateral } }
    /// The pair as a tire-frame vector.
    pub fn as_vec2(&self) -> Vec2 { Vec2::new(self.longitudinal, self.lateral) }
}

/// Per-tire data carried by the vehicle. Forces and slip angle are supplied
/// from outside (no tire model here) and always replaced together.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TireState {
    size: TireSize,
    force: TireForce,
    slip_angle: Scalar,
}

impl TireState {
    /// New tire with an initial force pair and slip angle (radians).
    pub fn new(size: TireSize, force: TireForce, slip_angle: Scalar) -> Self {
        Self { size, force, slip_angle }
    }

    /// Replaces force pair and slip angle in one step.
    pub fn update_force(&mut self, force: TireForce, slip_angle: Scalar) {
        self.force = force;
        self.slip_angle = slip_angle;
    }

    /// Footprint.
    pub fn size(&self) -> TireSize { self.size }
    /// Current tire-frame force pair.
    pub fn force(&self) -> TireForce { self.force }
    /// Tire-frame longitudinal force.
    pub fn longitudinal_force(&self) -> Scalar { self.force.longitudinal }
    /// Tire-frame lateral force.
    pub fn lateral_force(&self) -> Scalar { self.force.lateral }
    /// Slip angle in radians (carried as data only).
    pub fn slip_angle(&self) -> Scalar { self.slip_angle }

    /// Pushes this tire's primitives into `scene`: outline, then the force
    /// arrows when `draw_force` is set, then the reference dash when enabled.
    pub fn draw(&self, index: usize, pose: &Pose2, draw_force: bool, opts: &RenderOptions, scene: &mut Scene) -> Result<(), PlotError> {
        scene.push(Tag::TireOutline(index), Primitive::Polyline {
            points: tire_outline(self.size, pose).to_vec(),
            stroke: Stroke::solid(Color::Black),
        });

        if draw_force {
            let (long, lat) = tire_force_vectors(self, pose, opts.force_length_ratio)?;
            scene.push(Tag::TireForceLongitudinal(index), Primitive::Arrow {
                tail: long[0], tip: long[1], style: ArrowStyle::VECTOR, color: Color::Red,
            });
            scene.push(Tag::TireForceLateral(index), Primitive::Arrow {
                tail: lat[0], tip: lat[1], style: ArrowStyle::VECTOR, color: Color::Green,
            });
        }

        if opts.draw_tire_axis {
            scene.push(Tag::TireAxis(index), Primitive::Polyline {
                points: tire_reference_axis(pose, opts.axis_dash_length).to_vec(),
                stroke: Stroke::dashed(Color::Black).with_width(0.5),
            });
        }
        tracing::trace!(index, x = pose.pos.x, y = pose.pos.y, heading = pose.heading, "tire drawn");
        Ok(())
    }
}

impl Default for TireState {
    fn default() -> Self { Self::new(TireSize::default(), TireForce::new(100.0, 1000.0), 0.05) }
}

/// Closed rectangle (4 corners + first corner again) centred on the tire.
pub fn tire_outline(size: TireSize, pose: &Pose2) -> [Vec2; 5] {
    let (hl, hw) = (size.length * 0.5, size.width * 0.5);
    let local = [
        Vec2::new(hl, hw),
        Vec2::new(hl, -hw),
        Vec2::new(-hl, -hw),
        Vec2::new(-hl, hw),
        Vec2::new(hl, hw),
    ];
    let w = rotate_translate(&local, pose.heading, pose.pos);
    [w[0], w[1], w[2], w[3], w[4]]
}

/// Longitudinal and lateral force segments from the tire centre, scaled by
/// `force_length_ratio` (newtons per metre of arrow).
pub fn tire_force_vectors(tire: &TireState, pose: &Pose2, force_length_ratio: Scalar) -> Result<([Vec2; 2], [Vec2; 2]), PlotError> {
    let ratio = check_ratio("force_length_ratio", force_length_ratio)?;
    let long = rotate(Vec2::new(tire.longitudinal_force() / ratio, 0.0), pose.heading);
    let lat = rotate(Vec2::new(0.0, tire.lateral_force() / ratio), pose.heading);
    Ok(([pose.pos, pose.pos + long], [pose.pos, pose.pos + lat]))
}

/// Dash of `dash_length` along the tire's x axis, centred on the tire.
pub fn tire_reference_axis(pose: &Pose2, dash_length: Scalar) -> [Vec2; 2] {
    let half = pose.forward() * (0.5 * dash_length);
    [pose.pos + half, pose.pos - half]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use carplot_core::pose2;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn outline_is_closed_for_any_pose() {
        for k in 0..8 {
            let pose = pose2(k as f32 - 3.0, 2.0, k as f32 * PI / 7.0);
            let o = tire_outline(TireSize { width: 0.25, length: 0.7 }, &pose);
            assert_eq!(o.len(), 5);
            assert_eq!(o[0], o[4]);
        }
    }

    #[test]
    fn outline_length_runs_along_heading() {
        let o = tire_outline(TireSize::default(), &pose2(1.0, 1.0, FRAC_PI_2));
        // first corner is (+length/2, +width/2) turned a quarter
        assert_relative_eq!(o[0].x, 1.0 - 0.15, epsilon = 1e-5);
        assert_relative_eq!(o[0].y, 1.0 + 0.3, epsilon = 1e-5);
    }

    #[test]
    fn force_vectors_scale_and_rotate() {
        let tire = TireState::new(TireSize::default(), TireForce::new(2000.0, -1000.0), 0.0);
        let (long, lat) = tire_force_vectors(&tire, &pose2(0.0, 0.0, FRAC_PI_2), 2000.0).unwrap();
        assert_eq!(long[0], Vec2::ZERO);
        assert_relative_eq!(long[1].x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(long[1].y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(lat[1].x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(lat[1].y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn non_positive_ratio_is_rejected() {
        let tire = TireState::default();
        for r in [0.0, -5.0] {
            assert!(matches!(
                tire_force_vectors(&tire, &Pose2::IDENTITY, r),
                Err(PlotError::InvalidScale { what: "force_length_ratio", .. })
            ));
        }
    }

    #[test]
    fn reference_axis_ignores_tire_size() {
        let axis = tire_reference_axis(&pose2(2.0, -1.0, 0.0), 2.0);
        assert_eq!(axis, [Vec2::new(3.0, -1.0), Vec2::new(1.0, -1.0)]);
    }

    #[test]
    fn update_force_replaces_pair_and_slip() {
        let mut t = TireState::default();
        t.update_force(TireForce::new(-10.0, 20.0), 0.12);
        assert_eq!(t.force(), TireForce::new(-10.0, 20.0));
        assert_eq!(t.slip_angle(), 0.12);
    }
}
