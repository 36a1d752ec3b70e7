use serde::{Deserialize, Serialize};

pub use glam::Vec2;

pub type Scalar = f32;

#[inline] pub fn vec2(x: Scalar, y: Scalar) -> Vec2 { Vec2::new(x, y) }
#[inline] pub fn pose2(x: Scalar, y: Scalar, heading: Scalar) -> Pose2 { Pose2 { pos: vec2(x, y), heading } }

/// World-frame position plus heading (radians, right-handed about the up axis).
///
/// Recomputed every frame; never mutated in place by the geometry code.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose2 {
    pub pos: Vec2,
    pub heading: Scalar,
}

impl Pose2 {
    pub const IDENTITY: Self = Self { pos: Vec2::ZERO, heading: 0.0 };

    #[inline] pub fn new(pos: Vec2, heading: Scalar) -> Self { Self { pos, heading } }

    /// Unit vector along the pose's own x axis, in world frame.
    #[inline] pub fn forward(&self) -> Vec2 { Vec2::from_angle(self.heading) }
}

impl Default for Pose2 {
    fn default() -> Self { Self::IDENTITY }
}
