//! The vehicle composite: fixed geometry, per-frame dynamic state and the
//! owned tire states, rendered into one tagged [`Scene`].

use carplot_core::{check_len, rotate, PlotError, Pose2, Scalar, Vec2};
use carplot_viz::{vector_with_label, Axle, Color, Primitive, Scene, Stroke, Tag};
use serde::{Deserialize, Serialize};

use crate::body::{body_outline, body_velocity_vector, cg_marker, yaw_label, yaw_rate_arc};
use crate::layout::{axle_centers, axle_velocities, tire_centers_dual, tire_centers_single, tire_headings, AxleVelocities, VehicleGeometry};
use crate::options::RenderOptions;
use crate::tire::{TireForce, TireState};

/// Heading, body-frame velocity and yaw rate for the current frame.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Radians, right-handed about the up axis.
    pub heading: Scalar,
    /// (Vx, Vy) in the body frame.
    pub vel_body_frame: Vec2,
    /// rad/s.
    pub yaw_rate: Scalar,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self { heading: std::f32::consts::FRAC_PI_6, vel_body_frame: Vec2::new(10.0, 4.0), yaw_rate: 0.5 }
    }
}

/// Tire arrangement. Arrays are front tires first, then rear.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum TireLayout {
    /// One tire per axle: `[front, rear]`.
    SingleTrack {
        /// Tire states.
        tires: [TireState; 2],
        /// Steer angles (rad).
        steer: [Scalar; 2],
    },
    /// Two tires per axle: `[FL, FR, RL, RR]`.
    DualTrack {
        /// Tire states.
        tires: [TireState; 4],
        /// Steer angles (rad).
        steer: [Scalar; 4],
    },
}

impl TireLayout {
    /// Total tire count.
    pub fn tire_count(&self) -> usize { self.tires().len() }

    /// Tires on the front axle.
    pub fn front_count(&self) -> usize {
        match self {
            TireLayout::SingleTrack { .. } => 1,
            TireLayout::DualTrack { .. } => 2,
        }
    }

    /// All tire states in layout order.
    pub fn tires(&self) -> &[TireState] {
        match self {
            TireLayout::SingleTrack { tires, .. } => tires,
            TireLayout::DualTrack { tires, .. } => tires,
        }
    }

    fn tires_mut(&mut self) -> &mut [TireState] {
        match self {
            TireLayout::SingleTrack { tires, .. } => tires,
            TireLayout::DualTrack { tires, .. } => tires,
        }
    }

    /// Steer angles in layout order.
    pub fn steer(&self) -> &[Scalar] {
        match self {
            TireLayout::SingleTrack { steer, .. } => steer,
            TireLayout::DualTrack { steer, .. } => steer,
        }
    }

    fn steer_mut(&mut self) -> &mut [Scalar] {
        match self {
            TireLayout::SingleTrack { steer, .. } => steer,
            TireLayout::DualTrack { steer, .. } => steer,
        }
    }
}

/// Lifecycle marker. There is no terminal phase.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum VehiclePhase {
    /// Still holding construction defaults.
    Constructed,
    /// At least one `update_body_pose` has been applied.
    Posed,
}

/// A drawable vehicle. Updates only store data; geometry is recomputed on
/// every [`Vehicle::render`].
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    geometry: VehicleGeometry,
    state: VehicleState,
    layout: TireLayout,
    phase: VehiclePhase,
}

impl Vehicle {
    /// Four tires, each starting at (500 N, 500 N) with 0.05 rad slip.
    pub fn dual_track(geometry: VehicleGeometry) -> Self {
        let tire = TireState::new(geometry.tire_size, TireForce::new(500.0, 500.0), 0.05);
        Self::with_layout(geometry, TireLayout::DualTrack { tires: [tire; 4], steer: [0.0; 4] })
    }

    /// Bicycle model: one tire per axle.
    pub fn single_track(geometry: VehicleGeometry) -> Self {
        let front = TireState::new(geometry.tire_size, TireForce::new(100.0, 1000.0), 0.05);
        let rear = TireState::new(geometry.tire_size, TireForce::new(3000.0, 1000.0), 0.0);
        Self::with_layout(geometry, TireLayout::SingleTrack { tires: [front, rear], steer: [0.0; 2] })
    }

    fn with_layout(geometry: VehicleGeometry, layout: TireLayout) -> Self {
        Self { geometry, state: VehicleState::default(), layout, phase: VehiclePhase::Constructed }
    }

    /// Fixed geometry.
    pub fn geometry(&self) -> &VehicleGeometry { &self.geometry }
    /// Current dynamic state.
    pub fn state(&self) -> &VehicleState { &self.state }
    /// Tire arrangement and steer angles.
    pub fn layout(&self) -> &TireLayout { &self.layout }
    /// Lifecycle phase.
    pub fn phase(&self) -> VehiclePhase { self.phase }
    /// Tire states in layout order.
    pub fn tires(&self) -> &[TireState] { self.layout.tires() }
    /// 2 or 4.
    pub fn tire_count(&self) -> usize { self.layout.tire_count() }

    /// Stores heading and body-frame velocity.
    pub fn update_body_pose(&mut self, heading: Scalar, vel_body_frame: Vec2) {
        self.state.heading = heading;
        self.state.vel_body_frame = vel_body_frame;
        self.phase = VehiclePhase::Posed;
    }

    /// Stores the yaw rate (rad/s). Only its sign shows in the diagram.
    pub fn update_yaw_rate(&mut self, yaw_rate: Scalar) { self.state.yaw_rate = yaw_rate; }

    /// Accepts either one angle per front tire or one per tire. Rear angles
    /// are stored but never steer the drawing.
    pub fn update_wheel_angles(&mut self, angles: &[Scalar]) -> Result<(), PlotError> {
        let (front, total) = (self.layout.front_count(), self.layout.tire_count());
        if angles.len() != front {
            check_len("wheel angles", total, angles.len())?;
        }
        if angles.iter().skip(front).any(|a| *a != 0.0) {
            tracing::warn!(?angles, "rear wheel angles are ignored; rear tires follow the body heading");
        }
        self.layout.steer_mut()[..angles.len()].copy_from_slice(angles);
        Ok(())
    }

    /// Replaces every tire's force pair and slip angle. Both slices must match
    /// the tire count; nothing is written otherwise.
    pub fn update_tire_forces(&mut self, forces: &[TireForce], slip_angles: &[Scalar]) -> Result<(), PlotError> {
        let n = self.layout.tire_count();
        check_len("tire forces", n, forces.len())?;
        check_len("slip angles", n, slip_angles.len())?;
        for ((tire, f), s) in self.layout.tires_mut().iter_mut().zip(forces).zip(slip_angles) {
            tire.update_force(*f, *s);
        }
        Ok(())
    }

    /// Front steer angles (one per front tire).
    pub fn front_steer(&self) -> &[Scalar] { &self.layout.steer()[..self.layout.front_count()] }

    /// World pose of every tire in layout order.
    pub fn tire_poses(&self) -> Vec<Pose2> {
        let h = self.state.heading;
        let centers: Vec<Vec2> = match self.layout {
            TireLayout::SingleTrack { .. } => tire_centers_single(&self.geometry, h).to_vec(),
            TireLayout::DualTrack { .. } => tire_centers_dual(&self.geometry, h).to_vec(),
        };
        let rear = self.layout.tire_count() - self.layout.front_count();
        centers
            .into_iter()
            .zip(tire_headings(h, self.front_steer(), rear))
            .map(|(pos, heading)| Pose2::new(pos, heading))
            .collect()
    }

    /// Body-frame velocity of each axle centre.
    pub fn axle_velocities(&self) -> AxleVelocities {
        axle_velocities(self.state.vel_body_frame, self.state.yaw_rate, &self.geometry)
    }

    /// Builds the full diagram for the current state under `opts.convention`.
    pub fn render(&self, opts: &RenderOptions) -> Result<Scene, PlotError> {
        opts.validate()?;
        let h = self.state.heading;
        let mut scene = Scene::new();

        scene.push(Tag::BodyOutline, Primitive::Polyline {
            points: body_outline(self.geometry.body_size, h).to_vec(),
            stroke: Stroke::dashed(Color::Blue),
        });
        scene.extend(Tag::CgMarker, cg_marker(opts.cg_radius));
        scene.extend(Tag::YawIndicator, yaw_rate_arc(self.state.yaw_rate, opts.yaw_arc_radius));
        scene.push(Tag::YawIndicator, yaw_label(opts.yaw_arc_radius));

        if opts.draw_body_velocity {
            let prims = body_velocity_vector(
                self.state.vel_body_frame,
                h,
                opts.velocity_length_ratio,
                opts.label_offset,
                opts.label_turn_angle,
            )?;
            scene.extend(Tag::BodyVelocity, prims);
        }

        if opts.draw_wheel_velocity {
            let (front_center, rear_center) = axle_centers(&self.geometry, h);
            let vel = self.axle_velocities();
            for (axle, center, v, label) in [
                (Axle::Front, front_center, vel.front, "V_f"),
                (Axle::Rear, rear_center, vel.rear, "V_r"),
            ] {
                let tip = center + rotate(v / opts.velocity_length_ratio, h);
                scene.extend(
                    Tag::AxleVelocity(axle),
                    vector_with_label(center, tip, label, opts.label_offset, opts.label_turn_angle, Color::Black),
                );
            }
        }

        let front = self.layout.front_count();
        for (i, (tire, pose)) in self.tires().iter().zip(self.tire_poses()).enumerate() {
            let draw_force = if i < front { opts.draw_front_tire_force } else { opts.draw_rear_tire_force };
            tire.draw(i, &pose, draw_force, opts, &mut scene)?;
        }

        tracing::debug!(items = scene.len(), heading = h, convention = ?opts.convention, "vehicle rendered");
        Ok(scene.into_convention(opts.convention))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_pose_moves_to_posed() {
        let mut v = Vehicle::dual_track(VehicleGeometry::default());
        assert_eq!(v.phase(), VehiclePhase::Constructed);
        v.update_body_pose(0.3, Vec2::new(5.0, 0.0));
        assert_eq!(v.phase(), VehiclePhase::Posed);
        v.update_body_pose(0.4, Vec2::new(5.0, 0.0));
        assert_eq!(v.phase(), VehiclePhase::Posed);
        assert_eq!(v.state().heading, 0.4);
    }

    #[test]
    fn bad_force_count_changes_nothing() {
        let mut v = Vehicle::dual_track(VehicleGeometry::default());
        let before = v.clone();
        let f = [TireForce::new(1.0, 2.0); 3];
        let err = v.update_tire_forces(&f, &[0.0; 3]).unwrap_err();
        assert_eq!(err, PlotError::ShapeMismatch { what: "tire forces", expected: 4, found: 3 });
        assert_eq!(v, before);
        assert!(v.update_tire_forces(&[TireForce::default(); 4], &[0.0; 2]).is_err());
        assert_eq!(v, before);
    }

    #[test]
    fn wheel_angles_accept_front_or_full_count() {
        let mut v = Vehicle::single_track(VehicleGeometry::default());
        v.update_wheel_angles(&[0.1]).unwrap();
        assert_eq!(v.front_steer(), &[0.1]);
        v.update_wheel_angles(&[0.2, 0.0]).unwrap();
        assert_eq!(v.front_steer(), &[0.2]);
        assert!(matches!(
            v.update_wheel_angles(&[0.1, 0.2, 0.3]),
            Err(PlotError::ShapeMismatch { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn rear_tires_ignore_steer() {
        let mut v = Vehicle::dual_track(VehicleGeometry::default());
        v.update_body_pose(0.2, Vec2::ZERO);
        v.update_wheel_angles(&[0.1, 0.1, 0.3, 0.3]).unwrap();
        let poses = v.tire_poses();
        assert_relative_eq!(poses[0].heading, 0.3);
        assert_relative_eq!(poses[1].heading, 0.3);
        assert_eq!(poses[2].heading, 0.2);
        assert_eq!(poses[3].heading, 0.2);
    }

    #[test]
    fn overlays_follow_options() {
        let v = Vehicle::single_track(VehicleGeometry::default());
        let opts = RenderOptions {
            draw_body_velocity: false,
            draw_rear_tire_force: false,
            draw_tire_axis: false,
            draw_wheel_velocity: true,
            ..Default::default()
        };
        let scene = v.render(&opts).unwrap();
        assert_eq!(scene.with_tag(Tag::BodyVelocity).count(), 0);
        assert_eq!(scene.with_tag(Tag::TireForceLongitudinal(0)).count(), 1);
        assert_eq!(scene.with_tag(Tag::TireForceLongitudinal(1)).count(), 0);
        assert_eq!(scene.with_tag(Tag::TireAxis(0)).count(), 0);
        assert_eq!(scene.with_tag(Tag::AxleVelocity(Axle::Front)).count(), 2);
        assert_eq!(scene.with_tag(Tag::AxleVelocity(Axle::Rear)).count(), 2);
    }

    #[test]
    fn render_rejects_zero_ratio() {
        let v = Vehicle::dual_track(VehicleGeometry::default());
        let opts = RenderOptions { force_length_ratio: 0.0, ..Default::default() };
        assert!(matches!(v.render(&opts), Err(PlotError::InvalidScale { .. })));
    }
}
