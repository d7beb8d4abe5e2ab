use crate::process::{
    PostProcess, PostProcessError, ProcessFlags, SharedPostProcessInfo, ValidationError,
};
use crate::scene::{AnimMesh, Mesh, Scene};

/// Checks the invariants of the scene data model.
///
/// See [`validate_scene`] for details.
#[derive(Copy, Clone, Debug, Default)]
pub struct ValidateDataStructureProcess;

impl PostProcess for ValidateDataStructureProcess {
    fn name(&self) -> &'static str {
        "ValidateDataStructureProcess"
    }

    fn is_active(&self, flags: ProcessFlags) -> bool {
        flags.contains(ProcessFlags::VALIDATE_DATA_STRUCTURE)
    }

    fn execute(
        &self,
        scene: &mut Scene,
        _: &mut SharedPostProcessInfo,
    ) -> Result<(), PostProcessError> {
        log::debug!("ValidateDataStructureProcess begin");

        validate_scene(scene).map_err(|err| {
            log::error!("Validation failed: {}", err);
            err
        })?;

        log::debug!("ValidateDataStructureProcess end");
        Ok(())
    }
}

/// Checks that `scene` satisfies the invariants every pass relies on.
///
/// For each mesh:
/// - it has vertex positions, and every other per-vertex array (including those of its
///   morph targets) has one element per vertex;
/// - its texture coordinate channels have between one and three components;
/// - its faces are non-empty, index existing vertices, and have a kind contained in its
///   primitive types (unless those are empty, which is left for the passes to report);
/// - its bone weights reference existing vertices;
/// - its material exists, if the scene has any material.
///
/// Every node must also reference existing meshes. The first violation found is returned.
pub fn validate_scene(scene: &Scene) -> Result<(), ValidationError> {
    for (i, mesh) in scene.meshes.iter().enumerate() {
        validate_mesh(i, mesh, scene.materials.len())?;
    }

    let num_meshes = scene.meshes.len();
    let mut result = Ok(());
    scene.root.visit(&mut |node| {
        if result.is_err() {
            return;
        }

        if let Some(&index) = node.meshes.iter().find(|&&m| m as usize >= num_meshes) {
            result = Err(ValidationError::NodeMeshOutOfRange {
                node: node.name.clone(),
                index,
                num_meshes,
            });
        }
    });

    result
}

fn validate_mesh(index: usize, mesh: &Mesh, num_materials: usize) -> Result<(), ValidationError> {
    let name = || mesh.name.clone();
    let num_vertices = mesh.num_vertices();

    if num_vertices == 0 {
        return Err(ValidationError::MissingPositions {
            mesh: index,
            name: name(),
        });
    }

    let check_len = |attribute: &dyn Fn() -> String, len: Option<usize>| match len {
        Some(len) if len != num_vertices => Err(ValidationError::AttributeLengthMismatch {
            mesh: index,
            name: name(),
            attribute: attribute(),
            len,
            expected: num_vertices,
        }),
        _ => Ok(()),
    };

    check_len(&|| "normals".to_string(), mesh.normals.as_ref().map(Vec::len))?;
    check_len(&|| "tangents".to_string(), mesh.tangents.as_ref().map(Vec::len))?;
    check_len(&|| "bitangents".to_string(), mesh.bitangents.as_ref().map(Vec::len))?;

    for (k, channel) in mesh.texture_coords.iter().enumerate() {
        let Some(channel) = channel else {
            continue;
        };

        check_len(
            &|| format!("texture coordinate channel {}", k),
            Some(channel.coords.len()),
        )?;

        if !(1..=3).contains(&channel.num_components) {
            return Err(ValidationError::InvalidUvComponents {
                mesh: index,
                name: name(),
                channel: k,
                num_components: channel.num_components,
            });
        }
    }

    for (k, colors) in mesh.colors.iter().enumerate() {
        check_len(
            &|| format!("color channel {}", k),
            colors.as_ref().map(Vec::len),
        )?;
    }

    for (j, anim) in mesh.anim_meshes.iter().enumerate() {
        for (attribute, len) in anim_attribute_lengths(anim) {
            check_len(&|| format!("morph target {} {}", j, attribute), Some(len))?;
        }
    }

    for (f, face) in mesh.faces.iter().enumerate() {
        let Some(kind) = face.kind() else {
            return Err(ValidationError::EmptyFace {
                mesh: index,
                name: name(),
                face: f,
            });
        };

        if let Some(&i) = face.indices.iter().find(|&&i| i as usize >= num_vertices) {
            return Err(ValidationError::FaceIndexOutOfRange {
                mesh: index,
                name: name(),
                face: f,
                index: i,
                num_vertices,
            });
        }

        if !mesh.primitive_types.is_empty() && !mesh.primitive_types.contains(kind.flag()) {
            return Err(ValidationError::PrimitiveTypeMismatch {
                mesh: index,
                name: name(),
                face: f,
                kind,
                primitive_types: mesh.primitive_types,
            });
        }
    }

    for bone in &mesh.bones {
        if let Some(w) = bone
            .weights
            .iter()
            .find(|w| w.vertex_id as usize >= num_vertices)
        {
            return Err(ValidationError::BoneWeightOutOfRange {
                mesh: index,
                name: name(),
                bone: bone.name.clone(),
                vertex_id: w.vertex_id,
                num_vertices,
            });
        }
    }

    if num_materials > 0 && mesh.material_index as usize >= num_materials {
        return Err(ValidationError::MaterialIndexOutOfRange {
            mesh: index,
            name: name(),
            material_index: mesh.material_index,
            num_materials,
        });
    }

    Ok(())
}

/// The lengths of the arrays present on a morph target, with a printable name.
fn anim_attribute_lengths(anim: &AnimMesh) -> Vec<(String, usize)> {
    let mut result = Vec::new();
    let mut add = |attribute: String, len: Option<usize>| {
        if let Some(len) = len {
            result.push((attribute, len));
        }
    };

    add("positions".to_string(), anim.positions.as_ref().map(Vec::len));
    add("normals".to_string(), anim.normals.as_ref().map(Vec::len));
    add("tangents".to_string(), anim.tangents.as_ref().map(Vec::len));
    add("bitangents".to_string(), anim.bitangents.as_ref().map(Vec::len));
    for (k, coords) in anim.texture_coords.iter().enumerate() {
        add(
            format!("texture coordinate channel {}", k),
            coords.as_ref().map(Vec::len),
        );
    }
    for (k, colors) in anim.colors.iter().enumerate() {
        add(format!("color channel {}", k), colors.as_ref().map(Vec::len));
    }

    result
}
