use blake3::Hasher;

use crate::types::{Scalar, Vec2};

/// Deterministic digest over rendered geometry. Two frames built from the
/// same state hash identically.
pub struct FrameHasher(Hasher);

impl FrameHasher {
    pub fn new() -> Self { FrameHasher(Hasher::new()) }
    pub fn update_bytes(&mut self, bytes: &[u8]) { self.0.update(bytes); }
    pub fn finalize(self) -> [u8; 32] { *self.0.finalize().as_bytes() }
}

impl Default for FrameHasher {
    fn default() -> Self { Self::new() }
}

#[inline]
pub fn hash_scalar(h: &mut FrameHasher, s: Scalar) {
    h.update_bytes(&s.to_le_bytes());
}

#[inline]
pub fn hash_vec2(h: &mut FrameHasher, v: &Vec2) {
    for c in [v.x, v.y] { h.update_bytes(&c.to_le_bytes()); }
}
