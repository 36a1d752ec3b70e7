//! Where the axles and tires sit for the current heading, and how fast each
//! axle moves in the body frame.

use carplot_core::{rotate, rotate_translate, Scalar, Vec2};
use serde::{Deserialize, Serialize};

use crate::body::BodySize;
use crate::tire::TireSize;

/// Front/rear track widths in metres (dual-track only).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackWidths {
    /// Front axle track.
    pub front: Scalar,
    /// Rear axle track.
    pub rear: Scalar,
}

impl Default for TrackWidths {
    fn default() -> Self { Self { front: 1.5, rear: 1.5 } }
}

/// Fixed physical description of the vehicle. Every vehicle owns its own copy.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleGeometry {
    /// Front axle to rear axle (m).
    pub wheel_base: Scalar,
    /// Front axle to CG (m); expected below `wheel_base`.
    pub front_to_cg: Scalar,
    /// Body box.
    pub body_size: BodySize,
    /// Default footprint for every tire.
    pub tire_size: TireSize,
    /// Track widths, used by the dual-track layout.
    pub track_widths: TrackWidths,
}

impl VehicleGeometry {
    /// Rear axle to CG (m).
    pub fn rear_to_cg(&self) -> Scalar { self.wheel_base - self.front_to_cg }
}

impl Default for VehicleGeometry {
    fn default() -> Self {
        Self {
            wheel_base: 3.075,
            front_to_cg: 1.392,
            body_size: BodySize::default(),
            tire_size: TireSize::default(),
            track_widths: TrackWidths::default(),
        }
    }
}

/// Body-frame axle velocities.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxleVelocities {
    /// Front axle centre.
    pub front: Vec2,
    /// Rear axle centre.
    pub rear: Vec2,
}

/// World positions of the front and rear axle centres (CG at the origin).
pub fn axle_centers(geometry: &VehicleGeometry, heading: Scalar) -> (Vec2, Vec2) {
    let front = rotate(Vec2::new(geometry.front_to_cg, 0.0), heading);
    let rear = rotate(Vec2::new(-geometry.rear_to_cg(), 0.0), heading);
    (front, rear)
}

/// World tire centres in FL, FR, RL, RR order.
///
/// The rear pair is offset as `RL = -track/2`, `RR = +track/2`; the logs this
/// draws from use that ordering.
pub fn tire_centers_dual(geometry: &VehicleGeometry, heading: Scalar) -> [Vec2; 4] {
    let a = geometry.front_to_cg;
    let b = geometry.rear_to_cg();
    let (tf, tr) = (geometry.track_widths.front * 0.5, geometry.track_widths.rear * 0.5);
    let local = [Vec2::new(a, tf), Vec2::new(a, -tf), Vec2::new(-b, -tr), Vec2::new(-b, tr)];
    let w = rotate_translate(&local, heading, Vec2::ZERO);
    [w[0], w[1], w[2], w[3]]
}

/// World tire centres (front, rear) with no lateral offset.
pub fn tire_centers_single(geometry: &VehicleGeometry, heading: Scalar) -> [Vec2; 2] {
    let (front, rear) = axle_centers(geometry, heading);
    [front, rear]
}

/// Tire headings: `heading + steer` for each front tire, `heading` for each
/// of the `rear_count` rear tires.
pub fn tire_headings(heading: Scalar, front_steer: &[Scalar], rear_count: usize) -> Vec<Scalar> {
    front_steer
        .iter()
        .map(|s| heading + s)
        .chain(std::iter::repeat(heading).take(rear_count))
        .collect()
}

/// `Vx` carries over unchanged; `Vy` picks up the yaw-rate lever arm:
/// `Vyf = Vy + r·a`, `Vyr = Vy - r·b`. A body-frame relation, so it does not
/// depend on the axis convention.
pub fn axle_velocities(vel_body_frame: Vec2, yaw_rate: Scalar, geometry: &VehicleGeometry) -> AxleVelocities {
    AxleVelocities {
        front: Vec2::new(vel_body_frame.x, vel_body_frame.y + yaw_rate * geometry.front_to_cg),
        rear: Vec2::new(vel_body_frame.x, vel_body_frame.y - yaw_rate * geometry.rear_to_cg()),
    }
}
