#![deny(missing_docs)]
//! Vehicle body and tire diagrams (single-track and dual-track).
//!
//! Usage:
//! - build a [`Vehicle`] with [`Vehicle::dual_track`] or [`Vehicle::single_track`].
//! - every frame, push the logged state with `update_body_pose`,
//!   `update_wheel_angles` and `update_tire_forces`.
//! - call [`Vehicle::render`] and hand the returned `Scene` to a `DrawSurface`.
//!
//! The CG is the drawing origin. Body and tire shapes are built in their own
//! local frames and rotated/translated into the world frame; the chosen
//! [`AxisConvention`](carplot_core::AxisConvention) is applied last.

pub mod tire;
pub mod body;
pub mod layout;
pub mod options;
pub mod vehicle;
pub mod stats;

pub use tire::{TireForce, TireSize, TireState, tire_force_vectors, tire_outline, tire_reference_axis};
pub use body::{BodySize, body_outline, body_velocity_vector, cg_marker, yaw_rate_arc, yaw_label};
pub use layout::{
    AxleVelocities, TrackWidths, VehicleGeometry,
    axle_centers, axle_velocities, tire_centers_dual, tire_centers_single, tire_headings,
};
pub use options::RenderOptions;
pub use vehicle::{TireLayout, Vehicle, VehiclePhase, VehicleState};
pub use stats::{AxleForces, SideslipTerms, axle_forces_body_frame, sideslip_terms};
