use crate::math::{Matrix, Real};

/// The influence of a bone on a single vertex.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexWeight {
    /// Index of the influenced vertex in the vertex arrays of the owning mesh.
    pub vertex_id: u32,
    /// The strength of the influence, in `[0, 1]`.
    pub weight: Real,
}

impl VertexWeight {
    /// Creates a new vertex weight.
    #[inline]
    pub fn new(vertex_id: u32, weight: Real) -> Self {
        Self { vertex_id, weight }
    }
}

/// A bone of a skinned mesh.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Bone {
    /// The name of the bone, matching the name of the node animating it.
    pub name: String,
    /// Transforms from mesh space to the bind-pose space of the bone.
    pub offset_matrix: Matrix<Real>,
    /// The vertices influenced by this bone.
    pub weights: Vec<VertexWeight>,
}

impl Bone {
    /// Creates a bone with an identity offset matrix.
    pub fn new(name: impl Into<String>, weights: Vec<VertexWeight>) -> Self {
        Self {
            name: name.into(),
            offset_matrix: Matrix::identity(),
            weights,
        }
    }

    /// Builds a copy of this bone whose weights are remapped through `remap`.
    ///
    /// Weights for which `remap` returns `None` are dropped. Returns `None` if no
    /// weight survives, since a bone without influence must not be kept.
    pub fn remap_weights(&self, mut remap: impl FnMut(u32) -> Option<u32>) -> Option<Bone> {
        let weights: Vec<_> = self
            .weights
            .iter()
            .filter_map(|w| remap(w.vertex_id).map(|id| VertexWeight::new(id, w.weight)))
            .collect();

        if weights.is_empty() {
            None
        } else {
            Some(Bone {
                name: self.name.clone(),
                offset_matrix: self.offset_matrix,
                weights,
            })
        }
    }
}
