use crate::types::{Pose2, Scalar, Vec2};

/// Rotates a local-frame vector into the world frame for a frame whose x axis
/// points along `heading`.
///
/// Equivalent to multiplying by `[[cos(-h), sin(-h)], [-sin(-h), cos(-h)]]`.
#[inline]
pub fn rotate(v: Vec2, heading: Scalar) -> Vec2 {
    Vec2::from_angle(heading).rotate(v)
}

#[inline]
pub fn transform_point(p: Vec2, pose: &Pose2) -> Vec2 {
    rotate(p, pose.heading) + pose.pos
}

/// Local points → world points: rotate by the frame heading, then translate by
/// `origin`. Count and order are preserved. `heading` needs no normalisation.
pub fn rotate_translate(local: &[Vec2], heading: Scalar, origin: Vec2) -> Vec<Vec2> {
    let rot = Vec2::from_angle(heading);
    local.iter().map(|p| rot.rotate(*p) + origin).collect()
}

/// Inverse of [`rotate_translate`] for the same heading and origin.
pub fn inverse_rotate_translate(world: &[Vec2], heading: Scalar, origin: Vec2) -> Vec<Vec2> {
    let rot = Vec2::from_angle(-heading);
    world.iter().map(|p| rot.rotate(*p - origin)).collect()
}
