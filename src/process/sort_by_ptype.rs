use crate::process::{
    PostProcess, PostProcessConfig, PostProcessError, ProcessFlags, SharedPostProcessInfo,
};
use crate::scene::{Mesh, MeshRemap, PrimitiveKind, PrimitiveTypes, Scene};
use arrayvec::ArrayVec;

/// Splits meshes so that each one holds a single kind of primitive.
///
/// See [`split_by_primitive_type`] for details.
#[derive(Copy, Clone, Debug, Default)]
pub struct SortByPTypeProcess {
    remove: PrimitiveTypes,
}

impl SortByPTypeProcess {
    /// Creates the pass with the primitive kinds to delete from `config`.
    pub fn new(config: &PostProcessConfig) -> Self {
        Self {
            remove: config.sort_by_ptype_remove,
        }
    }
}

impl PostProcess for SortByPTypeProcess {
    fn name(&self) -> &'static str {
        "SortByPTypeProcess"
    }

    fn is_active(&self, flags: ProcessFlags) -> bool {
        flags.contains(ProcessFlags::SORT_BY_PTYPE)
    }

    fn execute(
        &self,
        scene: &mut Scene,
        shared: &mut SharedPostProcessInfo,
    ) -> Result<(), PostProcessError> {
        log::debug!("SortByPTypeProcess begin");

        if split_by_primitive_type(scene, self.remove)? {
            // Cached spatial indices are keyed by mesh index.
            shared.spatial_sorts = None;
        } else {
            log::debug!("SortByPTypeProcess finished. There was nothing to be done.");
        }

        Ok(())
    }
}

/// The meshes built out of one input mesh, with the kind of their faces.
type SplitMeshes = ArrayVec<(PrimitiveKind, Mesh), 4>;

/// Splits every mesh of `scene` into one mesh per primitive kind among its faces.
///
/// The sub-meshes of a mesh are ordered by kind (points, lines, triangles, polygons) and
/// take its place in the mesh list. Each one only keeps the vertices its faces reference,
/// in order of first reference, along with the matching bone weights. Bones left without
/// any weight are deleted. Faces of a kind contained in `remove` are deleted, and so are
/// meshes without faces. Node references are patched to point at the sub-meshes.
///
/// Returns `false` if no mesh was split nor deleted, in which case only the primitive types
/// of the meshes may have been tightened.
///
/// # Errors
/// - [`PostProcessError::UnknownPrimitiveTypes`] if a mesh has no primitive types. The scene
///   is left untouched.
/// - [`PostProcessError::NoMeshesLeft`] if every mesh was deleted. The scene is left
///   without any mesh.
///
/// # Panics
/// Panics if a face index is out of the bounds of the vertex arrays of its mesh.
pub fn split_by_primitive_type(
    scene: &mut Scene,
    remove: PrimitiveTypes,
) -> Result<bool, PostProcessError> {
    if let Some((i, mesh)) = scene
        .meshes
        .iter()
        .enumerate()
        .find(|(_, mesh)| mesh.primitive_types.is_empty())
    {
        return Err(PostProcessError::UnknownPrimitiveTypes {
            mesh: i,
            name: mesh.name.clone(),
        });
    }

    let num_meshes = scene.meshes.len();
    let meshes = std::mem::take(&mut scene.meshes);
    let splits = super::map_meshes_owned(meshes, |i, mesh| split_mesh(i, mesh, remove));

    let mut changed = false;
    let mut remap: Vec<MeshRemap> = Vec::with_capacity(num_meshes);
    let mut num_per_kind = [0; 4];

    for (split, split_changed) in splits {
        changed |= split_changed;

        let mut new_indices = MeshRemap::new();
        for (kind, mesh) in split {
            new_indices.push(scene.meshes.len() as u32);
            num_per_kind[kind.bucket()] += 1;
            scene.meshes.push(mesh);
        }
        remap.push(new_indices);
    }

    if scene.meshes.is_empty() {
        return Err(PostProcessError::NoMeshesLeft);
    }

    if changed {
        scene.patch_mesh_references(&remap);
    }

    log::info!(
        "SortByPTypeProcess finished. Points: {}, Lines: {}, Triangles: {}, Polygons: {} (Meshes, X = removed)",
        count_or_removed(num_per_kind[0], remove, PrimitiveTypes::POINT),
        count_or_removed(num_per_kind[1], remove, PrimitiveTypes::LINE),
        count_or_removed(num_per_kind[2], remove, PrimitiveTypes::TRIANGLE),
        count_or_removed(num_per_kind[3], remove, PrimitiveTypes::POLYGON),
    );

    Ok(changed)
}

fn count_or_removed(count: usize, remove: PrimitiveTypes, flag: PrimitiveTypes) -> String {
    if remove.contains(flag) {
        "X".to_string()
    } else {
        count.to_string()
    }
}

/// Splits a single mesh. Also returns whether it was split or deleted.
fn split_mesh(index: usize, mut mesh: Mesh, remove: PrimitiveTypes) -> (SplitMeshes, bool) {
    let mut buckets: [Vec<usize>; 4] = Default::default();
    for (i, face) in mesh.faces.iter().enumerate() {
        if let Some(kind) = face.kind() {
            buckets[kind.bucket()].push(i);
        }
    }

    let mut result = SplitMeshes::new();
    let mut kinds = PrimitiveKind::ALL
        .into_iter()
        .filter(|kind| !buckets[kind.bucket()].is_empty());

    match (kinds.next(), kinds.next()) {
        (None, _) => {
            log::warn!("Mesh {} ({:?}) has no face, removing it", index, mesh.name);
            (result, true)
        }
        (Some(kind), None) if remove.contains(kind.flag()) => {
            log::debug!("Removing mesh {} ({:?}) made of {:?}s", index, mesh.name, kind);
            (result, true)
        }
        (Some(kind), None) => {
            // Already single-kind: keep it as is.
            mesh.primitive_types = kind.flag();
            result.push((kind, mesh));
            (result, false)
        }
        _ => {
            for kind in PrimitiveKind::ALL {
                let faces = &buckets[kind.bucket()];
                if !faces.is_empty() && !remove.contains(kind.flag()) {
                    result.push((kind, extract_submesh(&mesh, kind, faces)));
                }
            }
            (result, true)
        }
    }
}

/// Builds a mesh from the `faces`-th faces of `mesh`, all of the given `kind`.
fn extract_submesh(mesh: &Mesh, kind: PrimitiveKind, faces: &[usize]) -> Mesh {
    let mut old_to_new: Vec<Option<u32>> = vec![None; mesh.num_vertices()];
    let mut order = Vec::new();
    let mut new_faces = Vec::with_capacity(faces.len());

    for &f in faces {
        let mut face = mesh.faces[f].clone();
        for i in &mut face.indices {
            let old = *i;
            *i = *old_to_new[old as usize].get_or_insert_with(|| {
                order.push(old);
                order.len() as u32 - 1
            });
        }
        new_faces.push(face);
    }

    let mut submesh = mesh.gather_vertices(&order);
    submesh.faces = new_faces;
    submesh.primitive_types = kind.flag();

    for bone in &mesh.bones {
        match bone.remap_weights(|id| old_to_new.get(id as usize).copied().flatten()) {
            Some(bone) => submesh.bones.push(bone),
            None => log::debug!(
                "Bone {:?} doesn't influence the {:?}s of mesh {:?}, dropping it",
                bone.name,
                kind,
                mesh.name
            ),
        }
    }

    submesh
}
