//! Every overlay switch and scale the renderer understands.

use carplot_core::{check_ratio, AxisConvention, PlotError, Scalar};
use serde::{Deserialize, Serialize};

/// Render settings passed down to every draw call. Missing fields fall back to
/// their defaults when deserialised.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Axis convention applied to the finished scene.
    pub convention: AxisConvention,
    /// Newtons per metre of force arrow.
    pub force_length_ratio: Scalar,
    /// (m/s) per metre of velocity arrow.
    pub velocity_length_ratio: Scalar,
    /// Draw the `V` arrow from the CG.
    pub draw_body_velocity: bool,
    /// Force arrows on the front tire(s).
    pub draw_front_tire_force: bool,
    /// Force arrows on the rear tire(s).
    pub draw_rear_tire_force: bool,
    /// Dashed line along each tire's rolling direction.
    pub draw_tire_axis: bool,
    /// `V_f`/`V_r` arrows at the axle centres.
    pub draw_wheel_velocity: bool,
    /// Length of the tire reference dash (m).
    pub axis_dash_length: Scalar,
    /// CG symbol radius (m).
    pub cg_radius: Scalar,
    /// Yaw arc radius (m).
    pub yaw_arc_radius: Scalar,
    /// Distance from an arrow tip to its label (m).
    pub label_offset: Scalar,
    /// Label direction relative to the arrow direction (rad).
    pub label_turn_angle: Scalar,
}

impl RenderOptions {
    /// Rejects non-positive or non-finite arrow scales.
    pub fn validate(&self) -> Result<(), PlotError> {
        check_ratio("force_length_ratio", self.force_length_ratio)?;
        check_ratio("velocity_length_ratio", self.velocity_length_ratio)?;
        Ok(())
    }

    /// Same options under another convention.
    pub fn with_convention(mut self, convention: AxisConvention) -> Self {
        self.convention = convention;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            convention: AxisConvention::default(),
            force_length_ratio: 2000.0,
            velocity_length_ratio: 10.0,
            draw_body_velocity: true,
            draw_front_tire_force: true,
            draw_rear_tire_force: true,
            draw_tire_axis: true,
            draw_wheel_velocity: false,
            axis_dash_length: 2.0,
            cg_radius: 0.1,
            yaw_arc_radius: 0.2,
            label_offset: 0.3,
            label_turn_angle: 5.0 / 6.0 * std::f32::consts::PI,
        }
    }
}
