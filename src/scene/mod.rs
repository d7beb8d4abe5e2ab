//! The in-memory scene representation rewritten by the post-processing passes.

pub use self::bone::{Bone, VertexWeight};
pub use self::mesh::{
    AnimMesh, Mesh, TextureCoords, MAX_NUMBER_OF_COLOR_SETS, MAX_NUMBER_OF_TEXTURECOORDS,
};
pub use self::node::Node;
pub use self::primitive::{Face, PrimitiveKind, PrimitiveTypes};
pub use self::scene::{Material, MeshRemap, Scene};

mod bone;
mod mesh;
mod node;
mod primitive;
mod scene;
