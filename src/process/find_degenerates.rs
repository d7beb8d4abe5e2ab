use crate::math::{Point, Real};
use crate::process::{
    PostProcess, PostProcessConfig, PostProcessError, ProcessFlags, SharedPostProcessInfo,
};
use crate::scene::{Mesh, MeshRemap, Scene};
use smallvec::{smallvec, SmallVec};

/// Triangles with an area smaller than this are degenerate when area checks are enabled.
pub const DEGENERATE_AREA_EPSILON: Real = 1.0e-6;

/// Finds faces referencing several vertices at the same position.
///
/// See [`find_degenerates`] for details.
#[derive(Copy, Clone, Debug, Default)]
pub struct FindDegeneratesProcess {
    remove: bool,
    check_area: bool,
}

impl FindDegeneratesProcess {
    /// Creates the pass with the degenerate-related settings of `config`.
    pub fn new(config: &PostProcessConfig) -> Self {
        Self {
            remove: config.find_degenerates_remove,
            check_area: config.find_degenerates_check_area,
        }
    }
}

impl PostProcess for FindDegeneratesProcess {
    fn name(&self) -> &'static str {
        "FindDegeneratesProcess"
    }

    fn is_active(&self, flags: ProcessFlags) -> bool {
        flags.contains(ProcessFlags::FIND_DEGENERATES)
    }

    fn execute(
        &self,
        scene: &mut Scene,
        shared: &mut SharedPostProcessInfo,
    ) -> Result<(), PostProcessError> {
        log::debug!("FindDegeneratesProcess begin");

        let counts = super::map_meshes(&mut scene.meshes, |_, mesh| {
            find_degenerates(mesh, self.remove, self.check_area)
        });
        let num_degenerates: usize = counts.iter().sum();

        if self.remove {
            let num_removed = remove_meshes_without_faces(scene);
            if num_removed > 0 {
                // Cached spatial indices are keyed by mesh index.
                shared.spatial_sorts = None;
                log::debug!("FindDegeneratesProcess removed {} empty meshes", num_removed);
            }

            if scene.meshes.is_empty() {
                log::warn!("FindDegeneratesProcess removed every mesh of the scene");
            }
        }

        if num_degenerates > 0 {
            log::info!(
                "FindDegeneratesProcess finished. Found {} degenerated primitives.",
                num_degenerates
            );
        } else {
            log::debug!("FindDegeneratesProcess finished. There are no degenerated primitives.");
        }

        Ok(())
    }
}

/// Handles the faces of `mesh` referencing several vertices at the same position.
///
/// Positions are compared bit-for-bit. When `remove` is `false`, the later duplicates of a
/// position are erased from each face, which may turn a triangle into a line or a point.
/// When `remove` is `true`, degenerate faces are deleted altogether.
///
/// With `check_area`, triangles with an area below [`DEGENERATE_AREA_EPSILON`] are also
/// counted as degenerate. They are only deleted when `remove` is `true`.
///
/// The primitive types of `mesh` are recomputed. Returns the number of degenerate faces,
/// each counted once however many vertices it lost.
///
/// # Panics
/// Panics if a face index is out of the bounds of the vertex positions.
pub fn find_degenerates(mesh: &mut Mesh, remove: bool, check_area: bool) -> usize {
    let Mesh {
        positions, faces, ..
    } = mesh;
    let positions: &[Point<Real>] = positions;
    let mut num_degenerates = 0;

    faces.retain_mut(|face| {
        let mut degenerate = if remove {
            has_coincident_vertices(positions, &face.indices)
        } else {
            collapse_coincident_vertices(positions, &mut face.indices)
        };

        if !degenerate && check_area && face.len() == 3 {
            let [a, b, c] = [face.indices[0], face.indices[1], face.indices[2]];
            let area = triangle_area(
                &positions[a as usize],
                &positions[b as usize],
                &positions[c as usize],
            );
            degenerate = area < DEGENERATE_AREA_EPSILON;
        }

        if degenerate {
            num_degenerates += 1;
        }

        !(remove && degenerate)
    });

    mesh.primitive_types = mesh.compute_primitive_types();
    num_degenerates
}

fn same_position(a: &Point<Real>, b: &Point<Real>) -> bool {
    a.coords
        .iter()
        .zip(b.coords.iter())
        .all(|(x, y)| x.to_bits() == y.to_bits())
}

fn has_coincident_vertices(positions: &[Point<Real>], indices: &[u32]) -> bool {
    indices.iter().enumerate().any(|(i, &a)| {
        indices[i + 1..]
            .iter()
            .any(|&b| same_position(&positions[a as usize], &positions[b as usize]))
    })
}

/// Erases every index whose position already appeared earlier in the face.
fn collapse_coincident_vertices(
    positions: &[Point<Real>],
    indices: &mut SmallVec<[u32; 4]>,
) -> bool {
    let mut collapsed = false;
    let mut i = 0;

    while i < indices.len() {
        let reference = positions[indices[i] as usize];
        let mut j = i + 1;

        while j < indices.len() {
            if same_position(&reference, &positions[indices[j] as usize]) {
                let _ = indices.remove(j);
                collapsed = true;
            } else {
                j += 1;
            }
        }

        i += 1;
    }

    collapsed
}

fn triangle_area(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Real {
    (b - a).cross(&(c - a)).norm() * 0.5
}

/// Deletes the meshes without faces and patches the node references accordingly.
fn remove_meshes_without_faces(scene: &mut Scene) -> usize {
    let mut remap: Vec<MeshRemap> = Vec::with_capacity(scene.meshes.len());
    let mut num_kept = 0;

    for mesh in &scene.meshes {
        if mesh.has_faces() {
            remap.push(smallvec![num_kept]);
            num_kept += 1;
        } else {
            remap.push(MeshRemap::new());
        }
    }

    let num_removed = scene.meshes.len() - num_kept as usize;

    if num_removed > 0 {
        scene.meshes.retain(Mesh::has_faces);
        scene.patch_mesh_references(&remap);
    }

    num_removed
}
