use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::utils::hashmap::HashMap;
use ordered_float::OrderedFloat;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
struct Entry {
    index: u32,
    position: Point<Real>,
    projection: Real,
}

/// A set of positions sorted along one axis, for fast radius queries.
///
/// Positions are projected on the axis of largest spread of their bounding box and sorted
/// by projection. A radius query binary-searches the slab of projections within the radius,
/// then filters it by actual 3D distance.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct SpatialSort {
    axis: usize,
    entries: Vec<Entry>,
}

impl SpatialSort {
    /// Builds the sorted index of `positions`. Index `i` refers to `positions[i]`.
    pub fn new(positions: &[Point<Real>]) -> Self {
        let axis = Aabb::from_points_ref(positions).largest_extent_axis();
        let mut entries: Vec<_> = positions
            .iter()
            .enumerate()
            .map(|(i, position)| Entry {
                index: i as u32,
                position: *position,
                projection: position[axis],
            })
            .collect();

        // Ties are broken by index so equal projections keep a reproducible order.
        entries.sort_unstable_by_key(|e| (OrderedFloat(e.projection), e.index));

        Self { axis, entries }
    }

    /// The number of indexed positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is this index empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The axis positions are sorted along.
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// Collects into `out` the indices of all positions within `radius` of `point`.
    ///
    /// `out` is cleared first. The results are sorted by increasing index and include
    /// `point` itself if it is indexed. A negative or NaN radius yields no result.
    pub fn find_positions(&self, point: &Point<Real>, radius: Real, out: &mut Vec<u32>) {
        out.clear();

        let projection = point[self.axis];
        let min_proj = projection - radius;
        let max_proj = projection + radius;
        let sq_radius = radius * radius;

        let first = self
            .entries
            .partition_point(|e| OrderedFloat(e.projection) < OrderedFloat(min_proj));

        for entry in &self.entries[first..] {
            if !(entry.projection <= max_proj) {
                break;
            }

            if na::distance_squared(&entry.position, point) <= sq_radius {
                out.push(entry.index);
            }
        }

        out.sort_unstable();
    }
}

/// Spatial indices built once per mesh and shared by the geometry passes of one run.
///
/// Each entry also stores the position tolerance computed for its mesh. An entry becomes
/// stale as soon as the vertices of its mesh change and must be invalidated.
#[derive(Clone, Debug, Default)]
pub struct SpatialSortCache {
    entries: HashMap<usize, (SpatialSort, Real)>,
}

impl SpatialSortCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the index and position tolerance of the `mesh`-th mesh.
    pub fn insert(&mut self, mesh: usize, sort: SpatialSort, epsilon: Real) {
        let _ = self.entries.insert(mesh, (sort, epsilon));
    }

    /// The index and position tolerance of the `mesh`-th mesh, if cached.
    pub fn get(&self, mesh: usize) -> Option<(&SpatialSort, Real)> {
        self.entries.get(&mesh).map(|(sort, eps)| (sort, *eps))
    }

    /// Drops the entry of the `mesh`-th mesh.
    pub fn invalidate(&mut self, mesh: usize) {
        let _ = self.entries.remove(&mesh);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The number of cached meshes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is this cache empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
