use crate::scene::{Mesh, Node};
use smallvec::SmallVec;

/// A material. The passes never look into materials, meshes only refer to them by index.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Material {
    /// The name of the material.
    pub name: String,
}

/// The new mesh indices an old mesh index maps to, once a pass rebuilt the mesh list.
///
/// An empty list means that the old mesh did not survive.
pub type MeshRemap = SmallVec<[u32; 4]>;

/// An imported scene: a node hierarchy and the meshes and materials it refers to.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// The root of the node hierarchy.
    pub root: Node,
    /// All the meshes of the scene, referenced by index from the nodes.
    pub meshes: Vec<Mesh>,
    /// All the materials of the scene, referenced by index from the meshes.
    pub materials: Vec<Material>,
}

impl Scene {
    /// Creates a scene from its node hierarchy and meshes.
    pub fn new(root: Node, meshes: Vec<Mesh>) -> Self {
        Self {
            root,
            meshes,
            materials: Vec::new(),
        }
    }

    /// Rewrites the mesh references of every node after the mesh list was rebuilt.
    ///
    /// Each old index `i` is replaced by the indices listed in `remap[i]`, in order.
    /// References to meshes that did not survive are dropped, and so are indices
    /// out of the range of `remap`. A node whose list ends up empty releases its storage.
    pub fn patch_mesh_references(&mut self, remap: &[MeshRemap]) {
        self.root.visit_mut(&mut |node| {
            if node.meshes.is_empty() {
                return;
            }

            let patched: Vec<u32> = node
                .meshes
                .iter()
                .filter_map(|&old| remap.get(old as usize))
                .flat_map(|new| new.iter().copied())
                .collect();

            node.meshes = if patched.is_empty() {
                Vec::new()
            } else {
                patched
            };
        });
    }
}
