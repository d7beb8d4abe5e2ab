use crate::math::{Matrix, Real};

/// A node of the scene hierarchy.
///
/// A node exclusively owns its children. Meshes are referenced by their index in
/// [`Scene::meshes`](crate::scene::Scene::meshes), never owned.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// The name of this node.
    pub name: String,
    /// The transformation of this node relative to its parent.
    pub transformation: Matrix<Real>,
    /// Indices of the meshes drawn by this node.
    pub meshes: Vec<u32>,
    /// The children of this node.
    pub children: Vec<Node>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: String::new(),
            transformation: Matrix::identity(),
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl Node {
    /// Creates an empty node with an identity transformation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper setting the mesh indices of this node.
    pub fn with_meshes(mut self, meshes: Vec<u32>) -> Self {
        self.meshes = meshes;
        self
    }

    /// Builder-style helper appending a child to this node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Calls `f` on this node and all its descendants, parents first.
    pub fn visit(&self, f: &mut impl FnMut(&Node)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Calls `f` on this node and all its descendants, parents first.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Finds the first node named `name` in this subtree (depth-first, parents first).
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }

        self.children
            .iter()
            .find_map(|child| child.find_by_name(name))
    }

    /// The number of nodes below this one.
    pub fn num_descendants(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.num_descendants())
            .sum()
    }
}
