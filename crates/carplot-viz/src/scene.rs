use carplot_core::{hash_scalar, hash_vec2, AxisConvention, FrameHasher, Vec2};
use serde::{Deserialize, Serialize};

use crate::primitive::Primitive;
use crate::surface::DrawSurface;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axle { Front, Rear }

/// What a primitive depicts. Tire indices follow the vehicle's tire order
/// (FL, FR, RL, RR for dual-track; front, rear for single-track).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "part", content = "index", rename_all = "snake_case")]
pub enum Tag {
    BodyOutline,
    CgMarker,
    YawIndicator,
    BodyVelocity,
    TireOutline(usize),
    TireForceLongitudinal(usize),
    TireForceLateral(usize),
    TireAxis(usize),
    AxleVelocity(Axle),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds { pub min: Vec2, pub max: Vec2 }

impl Bounds {
    pub fn size(&self) -> Vec2 { self.max - self.min }
    pub fn center(&self) -> Vec2 { (self.min + self.max) * 0.5 }
}

/// Ordered set of tagged primitives, all expressed under one axis convention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    convention: AxisConvention,
    items: Vec<(Tag, Primitive)>,
}

impl Scene {
    /// Empty scene in plain world coordinates (`ZUp`).
    pub fn new() -> Self { Self { convention: AxisConvention::ZUp, items: Vec::new() } }

    pub fn convention(&self) -> AxisConvention { self.convention }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn items(&self) -> &[(Tag, Primitive)] { &self.items }

    /// Points are always pushed in world coordinates; pushing into a scene
    /// that was already converted maps them to the same convention.
    pub fn push(&mut self, tag: Tag, prim: Primitive) {
        self.items.push((tag, prim.with_convention(self.convention)));
    }

    pub fn extend(&mut self, tag: Tag, prims: impl IntoIterator<Item = Primitive>) {
        for p in prims { self.push(tag, p); }
    }

    pub fn with_tag(&self, tag: Tag) -> impl Iterator<Item = &Primitive> + '_ {
        self.items.iter().filter(move |(t, _)| *t == tag).map(|(_, p)| p)
    }

    /// Re-expresses every primitive under `target`. Both conventions are
    /// channel permutations, so switching is a swap or a no-op.
    pub fn into_convention(mut self, target: AxisConvention) -> Self {
        if target != self.convention {
            for (_, p) in &mut self.items {
                p.map_points(|v| Vec2::new(v.y, v.x));
            }
            tracing::debug!(from = ?self.convention, to = ?target, items = self.items.len(), "scene transposed");
            self.convention = target;
        }
        self
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut out: Option<Bounds> = None;
        let mut grow = |lo: Vec2, hi: Vec2| {
            out = Some(match out {
                None => Bounds { min: lo, max: hi },
                Some(b) => Bounds { min: b.min.min(lo), max: b.max.max(hi) },
            });
        };
        for (_, p) in &self.items {
            match p {
                Primitive::Circle { center, radius, .. } => {
                    let r = Vec2::splat(radius.abs());
                    grow(*center - r, *center + r);
                }
                other => for v in other.points() { grow(v, v); },
            }
        }
        out
    }

    /// Stable blake3 digest of tags, geometry and style.
    pub fn digest(&self) -> [u8; 32] {
        let mut h = FrameHasher::new();
        h.update_bytes(b"CARPLOTv1\0");
        h.update_bytes(&[self.convention.sign() as u8]);
        for (tag, p) in &self.items {
            h.update_bytes(format!("{tag:?}").as_bytes());
            match p {
                Primitive::Polyline { points, stroke } => {
                    h.update_bytes(&[0, stroke.color.code(), stroke.dashed as u8]);
                    hash_scalar(&mut h, stroke.width);
                    hash_points(&mut h, points);
                }
                Primitive::FilledPolygon { points, color } => {
                    h.update_bytes(&[1, color.code()]);
                    hash_points(&mut h, points);
                }
                Primitive::Circle { center, radius, stroke } => {
                    h.update_bytes(&[2, stroke.color.code(), stroke.dashed as u8]);
                    hash_scalar(&mut h, stroke.width);
                    hash_vec2(&mut h, center);
                    hash_scalar(&mut h, *radius);
                }
                Primitive::Arrow { tail, tip, style, color } => {
                    h.update_bytes(&[3, color.code(), style.includes_head as u8]);
                    for s in [style.width, style.head_width, style.head_length] { hash_scalar(&mut h, s); }
                    hash_vec2(&mut h, tail);
                    hash_vec2(&mut h, tip);
                }
                Primitive::Text { pos, text, color, size } => {
                    h.update_bytes(&[4, color.code()]);
                    hash_vec2(&mut h, pos);
                    hash_scalar(&mut h, *size);
                    h.update_bytes(&(text.len() as u64).to_le_bytes());
                    h.update_bytes(text.as_bytes());
                }
            }
        }
        h.finalize()
    }

    /// Hands every primitive, in order, to the backend.
    pub fn draw_on(&self, surface: &mut dyn DrawSurface) {
        for (_, p) in &self.items {
            match p {
                Primitive::Polyline { points, stroke } => surface.polyline(points, stroke),
                Primitive::FilledPolygon { points, color } => surface.filled_polygon(points, *color),
                Primitive::Circle { center, radius, stroke } => surface.circle(*center, *radius, stroke),
                Primitive::Arrow { tail, tip, style, color } => surface.arrow(*tail, *tip, style, *color),
                Primitive::Text { pos, text, color, size } => surface.text(*pos, text, *color, *size),
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self { Self::new() }
}

fn hash_points(h: &mut FrameHasher, points: &[Vec2]) {
    h.update_bytes(&(points.len() as u64).to_le_bytes());
    for p in points { hash_vec2(h, p); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Color, Stroke};

    fn line(a: Vec2, b: Vec2) -> Primitive {
        Primitive::Polyline { points: vec![a, b], stroke: Stroke::solid(Color::Black) }
    }

    #[test]
    fn convention_switch_is_an_involution() {
        let mut s = Scene::new();
        s.push(Tag::BodyOutline, line(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)));
        let down = s.clone().into_convention(AxisConvention::ZDown);
        assert_eq!(down.convention(), AxisConvention::ZDown);
        assert_eq!(down.items()[0].1.points(), vec![Vec2::new(2.0, 1.0), Vec2::new(4.0, 3.0)]);
        assert_eq!(down.into_convention(AxisConvention::ZUp), s);
    }

    #[test]
    fn push_after_conversion_keeps_one_convention() {
        let mut s = Scene::new().into_convention(AxisConvention::ZDown);
        s.push(Tag::CgMarker, line(Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)));
        assert_eq!(s.items()[0].1.points()[0], Vec2::new(0.0, 1.0));
    }

    #[test]
    fn bounds_cover_circles() {
        let mut s = Scene::new();
        s.push(Tag::CgMarker, Primitive::Circle { center: Vec2::ZERO, radius: 0.5, stroke: Stroke::solid(Color::Black) });
        s.push(Tag::BodyOutline, line(Vec2::new(2.0, 0.0), Vec2::new(2.0, 1.0)));
        let b = s.bounds().unwrap();
        assert_eq!(b.min, Vec2::new(-0.5, -0.5));
        assert_eq!(b.max, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn digest_tracks_geometry() {
        let mut a = Scene::new();
        a.push(Tag::BodyOutline, line(Vec2::ZERO, Vec2::X));
        let b = a.clone();
        assert_eq!(a.digest(), b.digest());
        let mut c = Scene::new();
        c.push(Tag::BodyOutline, line(Vec2::ZERO, Vec2::Y));
        assert_ne!(a.digest(), c.digest());
    }
}
