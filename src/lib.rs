/*!
meshprep
========

**meshprep** is a set of post-processing passes rewriting the meshes of an
in-memory 3D scene so they satisfy the invariants renderers and exporters
rely on: unique vertices, triangle-only faces, single-primitive meshes and
topologically valid faces.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg_attr(test, macro_use)]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod partitioning;
pub mod process;
pub mod scene;
pub mod transformation;
pub mod utils;

pub use crate::process::{PostProcessConfig, PostProcessError, PostProcessor, ProcessFlags};
pub use crate::scene::Scene;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Matrix4, Point2, Point3, SVector, Vector2, Vector3, Vector4};

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The homogeneous transformation matrix type of nodes and bones.
    pub type Matrix<N> = Matrix4<N>;

    /// An RGBA vertex color.
    pub type Color<N> = Vector4<N>;
}
