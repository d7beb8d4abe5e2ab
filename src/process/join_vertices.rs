use crate::math::{Real, SVector};
use crate::partitioning::SpatialSort;
use crate::process::{
    PostProcess, PostProcessConfig, PostProcessError, ProcessFlags, SharedPostProcessInfo,
};
use crate::scene::{
    AnimMesh, Mesh, Scene, MAX_NUMBER_OF_COLOR_SETS, MAX_NUMBER_OF_TEXTURECOORDS,
};

/// Attributes other than the positions of the mesh are compared with this tolerance.
const ATTRIBUTE_EPSILON: Real = 1.0e-5;
const SQUARED_ATTRIBUTE_EPSILON: Real = ATTRIBUTE_EPSILON * ATTRIBUTE_EPSILON;

/// What happened to an original vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Replacement {
    /// Not referenced by any face. Dropped.
    Unused,
    /// Kept as the given new vertex.
    New(u32),
    /// Merged into the given new vertex, created earlier by another original vertex.
    Joined(u32),
}

impl Replacement {
    fn target(self) -> Option<u32> {
        match self {
            Replacement::Unused => None,
            Replacement::New(i) | Replacement::Joined(i) => Some(i),
        }
    }
}

/// Merges vertices whose attributes are all near-identical.
///
/// See [`join_identical_vertices`] for details.
#[derive(Copy, Clone, Debug)]
pub struct JoinVerticesProcess {
    epsilon_rel: Real,
}

impl JoinVerticesProcess {
    /// Creates the pass with the welding tolerance of `config`.
    pub fn new(config: &PostProcessConfig) -> Self {
        Self {
            epsilon_rel: config.join_epsilon,
        }
    }
}

impl PostProcess for JoinVerticesProcess {
    fn name(&self) -> &'static str {
        "JoinVerticesProcess"
    }

    fn is_active(&self, flags: ProcessFlags) -> bool {
        flags.contains(ProcessFlags::JOIN_IDENTICAL_VERTICES)
    }

    fn execute(
        &self,
        scene: &mut Scene,
        shared: &mut SharedPostProcessInfo,
    ) -> Result<(), PostProcessError> {
        log::debug!("JoinVerticesProcess begin");

        let cache = shared.spatial_sorts.as_ref();
        let counts = super::map_meshes(&mut scene.meshes, |i, mesh| {
            let num_before = mesh.num_vertices();
            let num_after =
                join_identical_vertices(mesh, self.epsilon_rel, cache.and_then(|c| c.get(i)));

            if num_after != num_before {
                log::debug!(
                    "Mesh {} ({:?}) | Verts in: {} out: {} | ~{:.1}%",
                    i,
                    mesh.name,
                    num_before,
                    num_after,
                    reduction_percent(num_before, num_after)
                );
            }

            (num_before, num_after)
        });

        if let Some(cache) = &mut shared.spatial_sorts {
            for (i, (num_before, num_after)) in counts.iter().enumerate() {
                if num_before != num_after {
                    cache.invalidate(i);
                }
            }
        }

        let (total_before, total_after) = counts
            .iter()
            .fold((0, 0), |(b, a), (num_before, num_after)| {
                (b + num_before, a + num_after)
            });

        if total_before != total_after {
            log::info!(
                "JoinVerticesProcess finished | Verts in: {} out: {} | ~{:.1}%",
                total_before,
                total_after,
                reduction_percent(total_before, total_after)
            );
        } else {
            log::debug!("JoinVerticesProcess finished. No vertex was joined.");
        }

        Ok(())
    }
}

fn reduction_percent(before: usize, after: usize) -> f64 {
    if before == 0 {
        0.0
    } else {
        (before - after) as f64 / before as f64 * 100.0
    }
}

/// The absolute welding radius of `mesh`: `epsilon_rel` times the diagonal of its bounding box.
pub fn position_epsilon(mesh: &Mesh, epsilon_rel: Real) -> Real {
    mesh.aabb().diagonal_length() * epsilon_rel
}

/// Welds the vertices of `mesh` that share the same attributes, and drops unused vertices.
///
/// Two vertices are welded when their positions are within [`position_epsilon`] of each
/// other and all their other attributes (normals, tangents, bitangents, first texture
/// coordinate channel, and morph target attributes) are within a fixed tolerance of `1e-5`.
/// The other texture coordinate channels and the vertex colors are only compared for
/// meshes with a texture coordinate channel past the first slot or with any vertex color.
///
/// Each vertex is compared with the already kept vertices only, in index order, and joins
/// the first one matching. The new vertices keep the relative order of their first
/// original. Bone weights are kept for those first originals only, and bones left without
/// any weight are deleted.
///
/// `cached` is a spatial index of the current positions of `mesh` together with the
/// radius to query it with. It is rebuilt from `epsilon_rel` when `None`.
///
/// Meshes without vertices or faces are left untouched. Returns the number of vertices
/// after welding. The mesh is not modified when no vertex is joined nor dropped.
///
/// # Panics
/// Panics if a face index is out of bounds, or if a per-vertex array is shorter than the
/// positions.
pub fn join_identical_vertices(
    mesh: &mut Mesh,
    epsilon_rel: Real,
    cached: Option<(&SpatialSort, Real)>,
) -> usize {
    let num_vertices = mesh.num_vertices();

    if num_vertices == 0 || !mesh.has_faces() {
        return num_vertices;
    }

    let mut used = vec![false; num_vertices];
    for face in &mesh.faces {
        for &i in &face.indices {
            if let Some(used) = used.get_mut(i as usize) {
                *used = true;
            }
        }
    }

    let local_sort;
    let (sort, epsilon) = match cached {
        Some(cached) => cached,
        None => {
            local_sort = SpatialSort::new(&mesh.positions);
            (&local_sort, position_epsilon(mesh, epsilon_rel))
        }
    };

    let complex = has_extra_channels(mesh);
    let mut replacements = vec![Replacement::Unused; num_vertices];
    let mut kept: Vec<u32> = Vec::with_capacity(num_vertices);
    let mut candidates = Vec::new();

    for a in 0..num_vertices {
        if !used[a] {
            continue;
        }

        sort.find_positions(&mesh.positions[a], epsilon, &mut candidates);

        // Candidates are sorted by index, so the earliest kept vertex wins.
        let joined = candidates.iter().find_map(|&b| match replacements[b as usize] {
            Replacement::New(new) if are_vertices_equal(mesh, a, b as usize, complex) => {
                Some(new)
            }
            _ => None,
        });

        replacements[a] = match joined {
            Some(new) => Replacement::Joined(new),
            None => {
                kept.push(a as u32);
                Replacement::New(kept.len() as u32 - 1)
            }
        };
    }

    if kept.len() == num_vertices {
        return num_vertices;
    }

    let mut welded = mesh.gather_vertices(&kept);

    welded.faces = std::mem::take(&mut mesh.faces);
    for face in &mut welded.faces {
        for i in &mut face.indices {
            if let Some(new) = replacements[*i as usize].target() {
                *i = new;
            }
        }
    }

    for bone in &mesh.bones {
        let remapped = bone.remap_weights(|id| match replacements.get(id as usize) {
            Some(Replacement::New(new)) => Some(*new),
            _ => None,
        });

        match remapped {
            Some(remapped) => welded.bones.push(remapped),
            None => log::warn!(
                "Removing bone {:?} from mesh {:?}: no weight left after joining vertices",
                bone.name,
                mesh.name
            ),
        }
    }

    *mesh = welded;
    kept.len()
}

/// Does `mesh` have texture coordinates outside of the first slot, or vertex colors?
///
/// Slots may be sparse: a single channel in slot 1 still needs comparing.
fn has_extra_channels(mesh: &Mesh) -> bool {
    mesh.texture_coords[1..].iter().any(Option::is_some) || mesh.num_color_channels() > 0
}

fn differs<const D: usize>(values: Option<&[SVector<Real, D>]>, a: usize, b: usize) -> bool {
    values
        .map(|values| (values[a] - values[b]).norm_squared() > SQUARED_ATTRIBUTE_EPSILON)
        .unwrap_or(false)
}

/// Compares every attribute but the positions, already matched by the spatial query.
fn are_vertices_equal(mesh: &Mesh, a: usize, b: usize, complex: bool) -> bool {
    let uv = |k: usize| {
        mesh.texture_coords[k]
            .as_ref()
            .map(|channel| channel.coords.as_slice())
    };

    if differs(mesh.normals.as_deref(), a, b)
        || differs(mesh.tangents.as_deref(), a, b)
        || differs(mesh.bitangents.as_deref(), a, b)
        || differs(uv(0), a, b)
    {
        return false;
    }

    if complex {
        if (1..MAX_NUMBER_OF_TEXTURECOORDS).any(|k| differs(uv(k), a, b)) {
            return false;
        }

        if (0..MAX_NUMBER_OF_COLOR_SETS).any(|k| differs(mesh.colors[k].as_deref(), a, b)) {
            return false;
        }
    }

    mesh.anim_meshes
        .iter()
        .all(|anim| are_anim_vertices_equal(anim, a, b, complex))
}

fn are_anim_vertices_equal(anim: &AnimMesh, a: usize, b: usize, complex: bool) -> bool {
    if let Some(positions) = &anim.positions {
        if na::distance_squared(&positions[a], &positions[b]) > SQUARED_ATTRIBUTE_EPSILON {
            return false;
        }
    }

    if differs(anim.normals.as_deref(), a, b)
        || differs(anim.tangents.as_deref(), a, b)
        || differs(anim.bitangents.as_deref(), a, b)
        || differs(anim.texture_coords[0].as_deref(), a, b)
    {
        return false;
    }

    !complex
        || !((1..MAX_NUMBER_OF_TEXTURECOORDS)
            .any(|k| differs(anim.texture_coords[k].as_deref(), a, b))
            || (0..MAX_NUMBER_OF_COLOR_SETS).any(|k| differs(anim.colors[k].as_deref(), a, b)))
}
