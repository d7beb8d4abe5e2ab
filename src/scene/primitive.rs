use smallvec::SmallVec;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// The set of primitive kinds found among the faces of a mesh.
pub struct PrimitiveTypes(u8);

bitflags::bitflags! {
    impl PrimitiveTypes: u8 {
        /// Faces with a single index.
        const POINT = 1;
        /// Faces with two indices.
        const LINE = 1 << 1;
        /// Faces with three indices.
        const TRIANGLE = 1 << 2;
        /// Faces with four indices or more.
        const POLYGON = 1 << 3;
    }
}

impl PrimitiveTypes {
    /// The flag matching a face with `num_indices` indices.
    ///
    /// Empty for a face without any index.
    #[inline]
    pub fn from_index_count(num_indices: usize) -> Self {
        PrimitiveKind::from_index_count(num_indices)
            .map(PrimitiveKind::flag)
            .unwrap_or_else(Self::empty)
    }
}

/// The topological class of a face, given by its number of indices.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PrimitiveKind {
    /// One index.
    Point,
    /// Two indices.
    Line,
    /// Three indices.
    Triangle,
    /// Four indices or more.
    Polygon,
}

impl PrimitiveKind {
    /// All the primitive kinds, in bucket order.
    pub const ALL: [PrimitiveKind; 4] = [
        PrimitiveKind::Point,
        PrimitiveKind::Line,
        PrimitiveKind::Triangle,
        PrimitiveKind::Polygon,
    ];

    /// The kind of a face with `num_indices` indices, or `None` for an empty face.
    #[inline]
    pub fn from_index_count(num_indices: usize) -> Option<Self> {
        match num_indices {
            0 => None,
            1 => Some(PrimitiveKind::Point),
            2 => Some(PrimitiveKind::Line),
            3 => Some(PrimitiveKind::Triangle),
            _ => Some(PrimitiveKind::Polygon),
        }
    }

    /// The position of this kind in [`PrimitiveKind::ALL`].
    #[inline]
    pub fn bucket(self) -> usize {
        self as usize
    }

    /// The single flag representing this kind.
    #[inline]
    pub fn flag(self) -> PrimitiveTypes {
        match self {
            PrimitiveKind::Point => PrimitiveTypes::POINT,
            PrimitiveKind::Line => PrimitiveTypes::LINE,
            PrimitiveKind::Triangle => PrimitiveTypes::TRIANGLE,
            PrimitiveKind::Polygon => PrimitiveTypes::POLYGON,
        }
    }
}

/// A face of a mesh: an ordered list of indices into the vertex arrays of its mesh.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Face {
    /// The vertex indices of this face.
    pub indices: SmallVec<[u32; 4]>,
}

impl Face {
    /// Creates a face from its vertex indices.
    pub fn new(indices: &[u32]) -> Self {
        Self {
            indices: SmallVec::from_slice(indices),
        }
    }

    /// Creates a three-index face.
    #[inline]
    pub fn triangle(indices: [u32; 3]) -> Self {
        Self::new(&indices)
    }

    /// The number of indices of this face.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Does this face have no index at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The primitive kind of this face, or `None` if it is empty.
    #[inline]
    pub fn kind(&self) -> Option<PrimitiveKind> {
        PrimitiveKind::from_index_count(self.indices.len())
    }
}

impl From<Vec<u32>> for Face {
    fn from(indices: Vec<u32>) -> Self {
        Self {
            indices: SmallVec::from_vec(indices),
        }
    }
}

impl<const N: usize> From<[u32; N]> for Face {
    fn from(indices: [u32; N]) -> Self {
        Self::new(&indices)
    }
}
