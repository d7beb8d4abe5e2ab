//! Post-processing passes rewriting the meshes of a [`Scene`] in place.
//!
//! Each pass implements [`PostProcess`]. The [`PostProcessor`] runs the passes enabled by
//! a set of [`ProcessFlags`] in their dependency order:
//! degenerate removal, vertex welding, triangulation and primitive sorting.

pub use self::compute_spatial_sort::ComputeSpatialSortProcess;
pub use self::config::{PostProcessConfig, DEFAULT_JOIN_EPSILON};
pub use self::error::{PostProcessError, ValidationError};
pub use self::find_degenerates::{
    find_degenerates, FindDegeneratesProcess, DEGENERATE_AREA_EPSILON,
};
pub use self::join_vertices::{join_identical_vertices, position_epsilon, JoinVerticesProcess};
pub use self::ngon_encoder::NgonEncoder;
pub use self::post_processor::PostProcessor;
pub use self::sort_by_ptype::{split_by_primitive_type, SortByPTypeProcess};
pub use self::triangulate::{triangulate_mesh, TriangulateProcess};
pub use self::validate::{validate_scene, ValidateDataStructureProcess};

use crate::partitioning::SpatialSortCache;
use crate::scene::{Mesh, Scene};

mod compute_spatial_sort;
mod config;
mod error;
mod find_degenerates;
mod join_vertices;
mod ngon_encoder;
mod post_processor;
mod sort_by_ptype;
mod triangulate;
mod validate;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// Selects the post-processing passes to run.
pub struct ProcessFlags(u32);

bitflags::bitflags! {
    impl ProcessFlags: u32 {
        /// Checks the invariants of the scene before and after the other passes.
        const VALIDATE_DATA_STRUCTURE = 1;
        /// Collapses the vertices of faces that share the exact same position.
        const FIND_DEGENERATES = 1 << 1;
        /// Merges vertices with near-identical attributes.
        const JOIN_IDENTICAL_VERTICES = 1 << 2;
        /// Splits every polygon into triangles.
        const TRIANGULATE = 1 << 3;
        /// Splits meshes so that each one holds a single kind of primitive.
        const SORT_BY_PTYPE = 1 << 4;
    }
}

/// Data shared by the passes of a single post-processing run.
#[derive(Clone, Debug, Default)]
pub struct SharedPostProcessInfo {
    /// Spatial indices of the mesh positions, built once and read by the geometry passes.
    ///
    /// An entry must be invalidated by any pass changing the vertices of its mesh.
    pub spatial_sorts: Option<SpatialSortCache>,
}

/// A post-processing pass.
pub trait PostProcess: Send + Sync {
    /// A short human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Is this pass enabled by `flags`?
    fn is_active(&self, flags: ProcessFlags) -> bool;

    /// Runs this pass on `scene`.
    ///
    /// This is a no-op if the preconditions of the pass are not met, e.g., when
    /// triangulating a scene without any polygon.
    fn execute(
        &self,
        scene: &mut Scene,
        shared: &mut SharedPostProcessInfo,
    ) -> Result<(), PostProcessError>;
}

/// Applies `f` to each mesh with its index, in parallel if the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub(crate) fn map_meshes<R: Send>(
    meshes: &mut [Mesh],
    f: impl Fn(usize, &mut Mesh) -> R + Send + Sync,
) -> Vec<R> {
    use rayon::prelude::*;
    meshes
        .par_iter_mut()
        .enumerate()
        .map(|(i, mesh)| f(i, mesh))
        .collect()
}

/// Applies `f` to each mesh with its index, in parallel if the `parallel` feature is enabled.
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_meshes<R: Send>(
    meshes: &mut [Mesh],
    f: impl Fn(usize, &mut Mesh) -> R + Send + Sync,
) -> Vec<R> {
    meshes
        .iter_mut()
        .enumerate()
        .map(|(i, mesh)| f(i, mesh))
        .collect()
}

/// Consumes each mesh with its index, in parallel if the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub(crate) fn map_meshes_owned<R: Send>(
    meshes: Vec<Mesh>,
    f: impl Fn(usize, Mesh) -> R + Send + Sync,
) -> Vec<R> {
    use rayon::prelude::*;
    meshes
        .into_par_iter()
        .enumerate()
        .map(|(i, mesh)| f(i, mesh))
        .collect()
}

/// Consumes each mesh with its index, in parallel if the `parallel` feature is enabled.
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_meshes_owned<R: Send>(
    meshes: Vec<Mesh>,
    f: impl Fn(usize, Mesh) -> R + Send + Sync,
) -> Vec<R> {
    meshes
        .into_iter()
        .enumerate()
        .map(|(i, mesh)| f(i, mesh))
        .collect()
}
