//! Drawable primitives and the renderer boundary.
//!
//! Geometry code produces a [`Scene`] of world-frame primitives; a backend
//! implementing [`DrawSurface`] turns it into pixels, vectors or anything
//! else. No global "current figure": the surface is always passed in.

pub mod primitive;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod svg;

pub use primitive::{ArrowStyle, Color, Primitive, Stroke};
pub use scene::{Axle, Bounds, Scene, Tag};
pub use shapes::{arc_arrow, arc_points, arc_sector, cg_sign, vector_with_label, ARC_RESOLUTION};
pub use surface::DrawSurface;
pub use svg::{Cam, SvgSurface};
