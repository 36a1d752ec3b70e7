//! Axle-level force bookkeeping and the sideslip-rate breakdown shown next
//! to the diagram.

use carplot_core::{check_ratio, rotate, PlotError, Scalar, Vec2};
use serde::{Deserialize, Serialize};

use crate::tire::TireState;
use crate::vehicle::Vehicle;

/// Per-axle forces `(Fxf, Fyf)` and `(Fxr, Fyr)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxleForces {
    /// Front axle.
    pub front: Vec2,
    /// Rear axle.
    pub rear: Vec2,
}

/// Right-hand-side terms of the sideslip-rate equation, in plotting order.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideslipTerms {
    /// Front steer angle δ.
    pub delta: Scalar,
    /// Sideslip angle β = atan2(Vy, Vx).
    pub beta: Scalar,
    /// δ - β.
    pub delta_minus_beta: Scalar,
    /// Fyf·cos(δ-β)/mV.
    pub front_lateral: Scalar,
    /// Fxf·sin(δ-β)/mV.
    pub front_longitudinal: Scalar,
    /// Fyr·cos(β)/mV.
    pub rear_lateral: Scalar,
    /// -Fxr·sin(β)/mV.
    pub rear_longitudinal: Scalar,
    /// -r.
    pub neg_yaw_rate: Scalar,
}

impl SideslipTerms {
    /// Display labels matching [`SideslipTerms::values`].
    pub const LABELS: [&'static str; 8] = [
        "delta", "beta", "delta-beta",
        "Fyft*cos(delta-beta)/mV", "Fxft*sin(delta-beta)/mV",
        "Fyrt*cos(beta)/mV", "-Fxrt*sin(beta)/mV", "-r",
    ];

    /// The eight terms as an array.
    pub fn values(&self) -> [Scalar; 8] {
        [
            self.delta, self.beta, self.delta_minus_beta,
            self.front_lateral, self.front_longitudinal,
            self.rear_lateral, self.rear_longitudinal, self.neg_yaw_rate,
        ]
    }
}

fn sum_forces(tires: &[TireState]) -> Vec2 {
    tires.iter().map(|t| t.force().as_vec2()).sum()
}

/// Tire-frame force totals per axle as `(front, rear)`.
fn axle_tire_forces(vehicle: &Vehicle) -> (Vec2, Vec2) {
    let (front, rear) = vehicle.tires().split_at(vehicle.layout().front_count());
    (sum_forces(front), sum_forces(rear))
}

/// Axle forces in the body frame. Tires on one axle are summed.
///
/// The front total is rotated by the body heading rather than the steer
/// angle; the rear total is taken as-is. Kept that way so the numbers line
/// up with the logs they are compared against.
pub fn axle_forces_body_frame(vehicle: &Vehicle) -> AxleForces {
    let (front, rear) = axle_tire_forces(vehicle);
    AxleForces { front: rotate(front, vehicle.state().heading), rear }
}

/// Sideslip-rate terms for a vehicle of `mass` (kg) at `speed` (m/s).
///
/// δ is the mean front steer angle (the single front angle for a
/// single-track vehicle).
pub fn sideslip_terms(vehicle: &Vehicle, mass: Scalar, speed: Scalar) -> Result<SideslipTerms, PlotError> {
    let mass = check_ratio("mass", mass)?;
    let speed = check_ratio("speed", speed)?;
    let mv = mass * speed;

    let steer = vehicle.front_steer();
    let delta = steer.iter().sum::<Scalar>() / steer.len().max(1) as Scalar;
    let v = vehicle.state().vel_body_frame;
    let beta = v.y.atan2(v.x);
    let dmb = delta - beta;
    let (front, rear) = axle_tire_forces(vehicle);

    Ok(SideslipTerms {
        delta,
        beta,
        delta_minus_beta: dmb,
        front_lateral: front.y * dmb.cos() / mv,
        front_longitudinal: front.x * dmb.sin() / mv,
        rear_lateral: rear.y * beta.cos() / mv,
        rear_longitudinal: -rear.x * beta.sin() / mv,
        neg_yaw_rate: -vehicle.state().yaw_rate,
    })
}
