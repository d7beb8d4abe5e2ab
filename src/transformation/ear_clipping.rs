//! Ear clipping of simple polygons, after <https://github.com/ivanfratric/polypartition>.

use crate::math::{Point2, Real};
use crate::utils::{is_point_in_triangle, Orientation};

/// A polygon corner, linked to the neighbors that remain after previous clips.
#[derive(Copy, Clone, Debug)]
struct Corner {
    prev: usize,
    next: usize,
    clipped: bool,
    /// The cosine of the corner angle if the corner is an ear.
    ear: Option<Real>,
}

/// The remaining outline of a polygon being clipped.
struct Ring<'a> {
    points: &'a [Point2<Real>],
    corners: Vec<Corner>,
}

impl<'a> Ring<'a> {
    fn new(points: &'a [Point2<Real>]) -> Self {
        let n = points.len();
        let corners = (0..n)
            .map(|i| Corner {
                prev: (i + n - 1) % n,
                next: (i + 1) % n,
                clipped: false,
                ear: None,
            })
            .collect();

        let mut ring = Self { points, corners };
        for i in 0..n {
            ring.classify(i);
        }
        ring
    }

    /// Updates whether the corner `i` is an ear given its current neighbors.
    ///
    /// An ear is a convex corner whose triangle contains no other point of the polygon.
    /// Points sharing the position of one of the triangle corners are ignored.
    fn classify(&mut self, i: usize) {
        let Corner { prev, next, .. } = self.corners[i];
        let (a, b, c) = (self.points[prev], self.points[i], self.points[next]);

        // NaN if `b` shares its position with a neighbor.
        let sharpness = (a - b).normalize().dot(&(c - b).normalize());

        let is_ear = !sharpness.is_nan()
            && Orientation::of(&a, &b, &c) == Orientation::Ccw
            && self.points.iter().enumerate().all(|(k, p)| {
                k == prev
                    || k == i
                    || k == next
                    || *p == a
                    || *p == b
                    || *p == c
                    || is_point_in_triangle(p, &a, &b, &c) != Some(true)
            });

        self.corners[i].ear = is_ear.then_some(sharpness);
    }

    /// The remaining ear with the smallest angle. Ties go to the last one.
    fn sharpest_ear(&self) -> Option<usize> {
        let mut best: Option<(usize, Real)> = None;

        for (i, corner) in self.corners.iter().enumerate() {
            match corner.ear {
                Some(sharpness) if !corner.clipped => {
                    if best.map_or(true, |(_, best_sharpness)| sharpness >= best_sharpness) {
                        best = Some((i, sharpness));
                    }
                }
                _ => {}
            }
        }

        best.map(|(i, _)| i)
    }

    /// Removes the corner `i` from the ring and returns its triangle.
    fn clip(&mut self, i: usize) -> [u32; 3] {
        let Corner { prev, next, .. } = self.corners[i];
        self.corners[i].clipped = true;
        self.corners[prev].next = next;
        self.corners[next].prev = prev;
        [prev as u32, i as u32, next as u32]
    }
}

/// Triangulates a counter-clockwise simple polygon by ear clipping.
///
/// Returns exactly `points.len() - 2` triangles indexing `points`, each wound
/// counter-clockwise. Returns `None` for fewer than three points, or when no ear is left
/// before the end, which happens for clockwise, self-intersecting or flat polygons.
/// Duplicate and collinear points are tolerated.
pub fn triangulate_ear_clipping(points: &[Point2<Real>]) -> Option<Vec<[u32; 3]>> {
    let n = points.len();

    if n < 3 {
        return None;
    }

    let mut ring = Ring::new(points);
    let mut triangles = Vec::with_capacity(n - 2);

    for remaining in (4..=n).rev() {
        let ear = ring.sharpest_ear()?;
        triangles.push(ring.clip(ear));

        // The last three corners always form the final triangle.
        if remaining > 4 {
            let Corner { prev, next, .. } = ring.corners[ear];
            ring.classify(prev);
            ring.classify(next);
        }
    }

    let last = ring.corners.iter().position(|corner| !corner.clipped)?;
    let Corner { prev, next, .. } = ring.corners[last];
    triangles.push([prev as u32, last as u32, next as u32]);

    Some(triangles)
}
