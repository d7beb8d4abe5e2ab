//! Spatial partitioning tools.

pub use self::spatial_sort::{SpatialSort, SpatialSortCache};

mod spatial_sort;
