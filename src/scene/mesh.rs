use crate::bounding_volume::Aabb;
use crate::math::{Color, Point, Real, Vector};
use crate::scene::{Bone, Face, PrimitiveTypes};

/// The maximum number of texture coordinate channels of a mesh.
pub const MAX_NUMBER_OF_TEXTURECOORDS: usize = 8;
/// The maximum number of vertex color channels of a mesh.
pub const MAX_NUMBER_OF_COLOR_SETS: usize = 8;

/// A channel of texture coordinates.
///
/// Coordinates are always stored with three components; `num_components` tells
/// how many of them are meaningful (2 for usual UVs, 3 for volume textures).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TextureCoords {
    /// The number of meaningful components of each coordinate.
    pub num_components: u8,
    /// One coordinate per vertex.
    pub coords: Vec<Vector<Real>>,
}

impl TextureCoords {
    /// A channel of two-component coordinates.
    pub fn uv(coords: Vec<Vector<Real>>) -> Self {
        Self {
            num_components: 2,
            coords,
        }
    }

    /// A channel of three-component coordinates.
    pub fn uvw(coords: Vec<Vector<Real>>) -> Self {
        Self {
            num_components: 3,
            coords,
        }
    }
}

/// A mesh: parallel per-vertex attribute arrays plus the faces indexing them.
///
/// Every per-vertex array, when present, has exactly [`Mesh::num_vertices`] elements.
/// An absent optional attribute means that the feature is not present on this mesh.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// The name of this mesh. Carried through splits, exporters use it as an adjacency hint.
    pub name: String,
    /// Index of the material of this mesh in the materials of the scene.
    pub material_index: u32,
    /// The kinds of primitives among the faces of this mesh.
    pub primitive_types: PrimitiveTypes,
    /// The vertex positions.
    pub positions: Vec<Point<Real>>,
    /// The vertex normals.
    pub normals: Option<Vec<Vector<Real>>>,
    /// The vertex tangents.
    pub tangents: Option<Vec<Vector<Real>>>,
    /// The vertex bitangents.
    pub bitangents: Option<Vec<Vector<Real>>>,
    /// The texture coordinate channels.
    pub texture_coords: [Option<TextureCoords>; MAX_NUMBER_OF_TEXTURECOORDS],
    /// The vertex color channels.
    pub colors: [Option<Vec<Color<Real>>>; MAX_NUMBER_OF_COLOR_SETS],
    /// The faces of this mesh.
    pub faces: Vec<Face>,
    /// The bones skinning this mesh.
    pub bones: Vec<Bone>,
    /// The morph targets of this mesh.
    pub anim_meshes: Vec<AnimMesh>,
}

impl Mesh {
    /// Creates a mesh from its positions and faces, with primitive types computed from the faces.
    pub fn new(positions: Vec<Point<Real>>, faces: Vec<Face>) -> Self {
        let mut result = Self {
            positions,
            faces,
            ..Default::default()
        };
        result.primitive_types = result.compute_primitive_types();
        result
    }

    /// The number of vertices of this mesh.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Does this mesh have any face?
    #[inline]
    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    /// Does this mesh have vertex normals?
    #[inline]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Does this mesh have both tangents and bitangents?
    #[inline]
    pub fn has_tangents_and_bitangents(&self) -> bool {
        self.tangents.is_some() && self.bitangents.is_some()
    }

    /// Does this mesh have the `channel`-th texture coordinate channel?
    #[inline]
    pub fn has_texture_coords(&self, channel: usize) -> bool {
        self.texture_coords
            .get(channel)
            .map(Option::is_some)
            .unwrap_or(false)
    }

    /// Does this mesh have the `channel`-th vertex color channel?
    #[inline]
    pub fn has_vertex_colors(&self, channel: usize) -> bool {
        self.colors
            .get(channel)
            .map(Option::is_some)
            .unwrap_or(false)
    }

    /// The number of texture coordinate channels present on this mesh.
    pub fn num_uv_channels(&self) -> usize {
        self.texture_coords.iter().filter(|c| c.is_some()).count()
    }

    /// The number of vertex color channels present on this mesh.
    pub fn num_color_channels(&self) -> usize {
        self.colors.iter().filter(|c| c.is_some()).count()
    }

    /// Does this mesh have bones?
    #[inline]
    pub fn has_bones(&self) -> bool {
        !self.bones.is_empty()
    }

    /// The primitive types of the faces of this mesh, computed from scratch.
    pub fn compute_primitive_types(&self) -> PrimitiveTypes {
        self.faces
            .iter()
            .fold(PrimitiveTypes::empty(), |acc, face| {
                acc | PrimitiveTypes::from_index_count(face.len())
            })
    }

    /// The bounding box of the vertex positions.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points_ref(&self.positions)
    }

    /// Builds a mesh whose `i`-th vertex is the `order[i]`-th vertex of `self`.
    ///
    /// Every per-vertex array, including those of the morph targets, is gathered
    /// through `order`. The name, material and primitive types are copied while the
    /// faces and bones of the result are left empty for the caller to rebuild.
    pub fn gather_vertices(&self, order: &[u32]) -> Mesh {
        Mesh {
            name: self.name.clone(),
            material_index: self.material_index,
            primitive_types: self.primitive_types,
            positions: gather(&self.positions, order),
            normals: gather_opt(&self.normals, order),
            tangents: gather_opt(&self.tangents, order),
            bitangents: gather_opt(&self.bitangents, order),
            texture_coords: std::array::from_fn(|k| {
                self.texture_coords[k]
                    .as_ref()
                    .map(|channel| TextureCoords {
                        num_components: channel.num_components,
                        coords: gather(&channel.coords, order),
                    })
            }),
            colors: std::array::from_fn(|k| gather_opt(&self.colors[k], order)),
            faces: Vec::new(),
            bones: Vec::new(),
            anim_meshes: self
                .anim_meshes
                .iter()
                .map(|anim| anim.gather_vertices(order))
                .collect(),
        }
    }
}

/// A morph target: a per-vertex snapshot of a subset of the attributes of its mesh.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimMesh {
    /// The name of this morph target.
    pub name: String,
    /// The default blend weight of this morph target.
    pub weight: Real,
    /// Replacement vertex positions.
    pub positions: Option<Vec<Point<Real>>>,
    /// Replacement vertex normals.
    pub normals: Option<Vec<Vector<Real>>>,
    /// Replacement vertex tangents.
    pub tangents: Option<Vec<Vector<Real>>>,
    /// Replacement vertex bitangents.
    pub bitangents: Option<Vec<Vector<Real>>>,
    /// Replacement texture coordinates, per channel.
    pub texture_coords: [Option<Vec<Vector<Real>>>; MAX_NUMBER_OF_TEXTURECOORDS],
    /// Replacement vertex colors, per channel.
    pub colors: [Option<Vec<Color<Real>>>; MAX_NUMBER_OF_COLOR_SETS],
}

impl AnimMesh {
    /// Builds a morph target whose `i`-th vertex is the `order[i]`-th vertex of `self`.
    pub fn gather_vertices(&self, order: &[u32]) -> AnimMesh {
        AnimMesh {
            name: self.name.clone(),
            weight: self.weight,
            positions: gather_opt(&self.positions, order),
            normals: gather_opt(&self.normals, order),
            tangents: gather_opt(&self.tangents, order),
            bitangents: gather_opt(&self.bitangents, order),
            texture_coords: std::array::from_fn(|k| gather_opt(&self.texture_coords[k], order)),
            colors: std::array::from_fn(|k| gather_opt(&self.colors[k], order)),
        }
    }
}

fn gather<T: Copy>(values: &[T], order: &[u32]) -> Vec<T> {
    order.iter().map(|&i| values[i as usize]).collect()
}

fn gather_opt<T: Copy>(values: &Option<Vec<T>>, order: &[u32]) -> Option<Vec<T>> {
    values.as_ref().map(|values| gather(values, order))
}
