use crate::math::{Point, Real, Vector};

/// Computes the (non-normalized) normal of a polygon with Newell's method.
///
/// The result is twice the vector area of the polygon: it points toward the side from
/// which the polygon appears counter-clockwise, and remains meaningful for concave or
/// slightly non-planar polygons. It is zero for a degenerate polygon.
pub fn newell_normal<'a, I>(pts: I) -> Vector<Real>
where
    I: IntoIterator<Item = &'a Point<Real>>,
    I::IntoIter: Clone,
{
    let pts = pts.into_iter();
    let mut result = Vector::zeros();

    for (a, b) in pts.clone().zip(pts.cycle().skip(1)) {
        result.x += (a.y - b.y) * (a.z + b.z);
        result.y += (a.z - b.z) * (a.x + b.x);
        result.z += (a.x - b.x) * (a.y + b.y);
    }

    result
}
