use crate::scene::{PrimitiveKind, PrimitiveTypes};

/// A violation of the invariants of the scene data model.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A mesh has no vertex position.
    #[error("mesh {mesh} ({name:?}) has no vertex positions")]
    MissingPositions {
        /// Index of the mesh.
        mesh: usize,
        /// Name of the mesh.
        name: String,
    },
    /// A per-vertex array doesn't have one element per vertex.
    #[error("mesh {mesh} ({name:?}): {attribute} has {len} elements instead of {expected}")]
    AttributeLengthMismatch {
        /// Index of the mesh.
        mesh: usize,
        /// Name of the mesh.
        name: String,
        /// The faulty attribute.
        attribute: String,
        /// Length of the faulty array.
        len: usize,
        /// Number of vertices of the mesh.
        expected: usize,
    },
    /// A texture coordinate channel with an unsupported number of components.
    #[error("mesh {mesh} ({name:?}): texture coordinate channel {channel} has {num_components} components")]
    InvalidUvComponents {
        /// Index of the mesh.
        mesh: usize,
        /// Name of the mesh.
        name: String,
        /// The faulty channel.
        channel: usize,
        /// Its number of components.
        num_components: u8,
    },
    /// A face without any index.
    #[error("mesh {mesh} ({name:?}): face {face} has no index")]
    EmptyFace {
        /// Index of the mesh.
        mesh: usize,
        /// Name of the mesh.
        name: String,
        /// Index of the face.
        face: usize,
    },
    /// A face index past the end of the vertex arrays.
    #[error("mesh {mesh} ({name:?}): face {face} references vertex {index} but the mesh has {num_vertices} vertices")]
    FaceIndexOutOfRange {
        /// Index of the mesh.
        mesh: usize,
        /// Name of the mesh.
        name: String,
        /// Index of the face.
        face: usize,
        /// The faulty vertex index.
        index: u32,
        /// Number of vertices of the mesh.
        num_vertices: usize,
    },
    /// A face whose kind is missing from the primitive types of its mesh.
    #[error("mesh {mesh} ({name:?}): face {face} is a {kind:?} but the mesh primitive types are {primitive_types:?}")]
    PrimitiveTypeMismatch {
        /// Index of the mesh.
        mesh: usize,
        /// Name of the mesh.
        name: String,
        /// Index of the face.
        face: usize,
        /// Kind of the face.
        kind: PrimitiveKind,
        /// Primitive types of the mesh.
        primitive_types: PrimitiveTypes,
    },
    /// A bone weight referencing a vertex past the end of the vertex arrays.
    #[error("mesh {mesh} ({name:?}): bone {bone:?} weights vertex {vertex_id} but the mesh has {num_vertices} vertices")]
    BoneWeightOutOfRange {
        /// Index of the mesh.
        mesh: usize,
        /// Name of the mesh.
        name: String,
        /// Name of the bone.
        bone: String,
        /// The faulty vertex index.
        vertex_id: u32,
        /// Number of vertices of the mesh.
        num_vertices: usize,
    },
    /// A mesh referencing a material past the end of the material list.
    #[error("mesh {mesh} ({name:?}) uses material {material_index} but the scene has {num_materials} materials")]
    MaterialIndexOutOfRange {
        /// Index of the mesh.
        mesh: usize,
        /// Name of the mesh.
        name: String,
        /// The faulty material index.
        material_index: u32,
        /// Number of materials of the scene.
        num_materials: usize,
    },
    /// A node referencing a mesh past the end of the mesh list.
    #[error("node {node:?} references mesh {index} but the scene has {num_meshes} meshes")]
    NodeMeshOutOfRange {
        /// Name of the node.
        node: String,
        /// The faulty mesh index.
        index: u32,
        /// Number of meshes of the scene.
        num_meshes: usize,
    },
}

/// Errors aborting a post-processing run.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum PostProcessError {
    /// A mesh reached primitive sorting without any primitive type.
    ///
    /// Its faces can't be classified. Enabling [`ProcessFlags::FIND_DEGENERATES`]
    /// recomputes the primitive types of every mesh beforehand.
    ///
    /// [`ProcessFlags::FIND_DEGENERATES`]: crate::process::ProcessFlags::FIND_DEGENERATES
    #[error("mesh {mesh} ({name:?}) has no primitive types set")]
    UnknownPrimitiveTypes {
        /// Index of the mesh.
        mesh: usize,
        /// Name of the mesh.
        name: String,
    },
    /// Sorting by primitive type removed every mesh of the scene.
    #[error("no mesh is left after sorting by primitive type")]
    NoMeshesLeft,
    /// The scene violates the invariants of the data model.
    #[error("invalid scene: {0}")]
    InvalidScene(ValidationError),
}

impl From<ValidationError> for PostProcessError {
    fn from(value: ValidationError) -> Self {
        PostProcessError::InvalidScene(value)
    }
}
