//! Polygon decomposition used by the triangulation pass.

pub use self::ear_clipping::triangulate_ear_clipping;

mod ear_clipping;
