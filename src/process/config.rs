use crate::math::Real;
use crate::scene::PrimitiveTypes;

/// The default welding radius, relative to the diagonal of the bounding box of a mesh.
pub const DEFAULT_JOIN_EPSILON: Real = 1.0e-4;

/// Settings of the post-processing passes.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PostProcessConfig {
    /// Vertices closer than `join_epsilon` times the bounding box diagonal of their
    /// mesh are candidates for welding.
    pub join_epsilon: Real,
    /// Primitive kinds deleted outright instead of being split into their own mesh.
    pub sort_by_ptype_remove: PrimitiveTypes,
    /// Delete degenerate faces instead of collapsing their duplicate vertices.
    ///
    /// Meshes left without faces are deleted too.
    pub find_degenerates_remove: bool,
    /// Also consider triangles with a near-zero area as degenerate.
    pub find_degenerates_check_area: bool,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            join_epsilon: DEFAULT_JOIN_EPSILON,
            sort_by_ptype_remove: PrimitiveTypes::empty(),
            find_degenerates_remove: false,
            find_degenerates_check_area: false,
        }
    }
}
