//! Axis-aligned bounding boxes of vertex sets.

use crate::math::{Point, Real, Vector, DIM};

/// An Axis-Aligned Bounding Box (AABB).
///
/// Defined by its minimum and maximum corners. The passes of this crate use it to
/// scale position tolerances to the size of a mesh and to pick the axis with the
/// largest spread when sorting vertices spatially.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use meshprep::bounding_volume::Aabb;
/// use meshprep::math::Point;
///
/// let aabb = Aabb::from_points([Point::new(0.0, 0.0, 0.0), Point::new(3.0, 4.0, 0.0)]);
/// assert_eq!(aabb.diagonal_length(), 5.0);
/// assert_eq!(aabb.largest_extent_axis(), 1);
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// The point with the smallest coordinates on each axis.
    pub mins: Point<Real>,
    /// The point with the largest coordinates on each axis.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its two extreme corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with inverted bounds.
    ///
    /// This is the neutral element when growing an AABB with [`Aabb::take_point`].
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new AABB that tightly encloses a set of points.
    ///
    /// Returns an invalid AABB if the iterator is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.take_point(pt);
        }

        result
    }

    /// Creates a new AABB that tightly encloses a set of point references.
    pub fn from_points_ref<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        Self::from_points(pts.into_iter().copied())
    }

    /// Is this AABB valid, i.e., are its `mins` smaller than or equal to its `maxs`?
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..DIM).all(|i| self.mins[i] <= self.maxs[i])
    }

    /// The extents of this AABB, i.e., its dimensions along each axis.
    ///
    /// Zero for an invalid AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        if self.is_valid() {
            self.maxs - self.mins
        } else {
            Vector::zeros()
        }
    }

    /// The length of the diagonal joining `mins` to `maxs`.
    ///
    /// Zero for an invalid AABB.
    #[inline]
    pub fn diagonal_length(&self) -> Real {
        self.extents().norm()
    }

    /// The index of the axis along which this AABB is the widest.
    ///
    /// Ties are resolved in favor of the smallest axis index.
    pub fn largest_extent_axis(&self) -> usize {
        let extents = self.extents();
        let mut best = 0;

        for i in 1..DIM {
            if extents[i] > extents[best] {
                best = i;
            }
        }

        best
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }
}
