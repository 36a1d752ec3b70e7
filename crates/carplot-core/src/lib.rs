//! Shared primitives for the 2D vehicle diagram pipeline.
//!
//! Everything here is pure math over small values: poses, the axis convention
//! used when handing points to a renderer, the body→world frame transform, the
//! error taxonomy shared by the other crates and a deterministic frame digest.

pub mod types;
pub mod convention;
pub mod transform;
pub mod error;
pub mod hash;

pub use types::{Scalar, Vec2, Pose2, pose2, vec2};
pub use convention::AxisConvention;
pub use transform::{rotate, rotate_translate, inverse_rotate_translate, transform_point};
pub use error::{PlotError, check_ratio, check_len};
pub use hash::{FrameHasher, hash_vec2, hash_scalar};
