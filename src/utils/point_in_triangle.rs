//! Orientation and containment predicates on 2D points.

use crate::math::{Point2, Real};

/// The winding of three consecutive 2D points.
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub enum Orientation {
    /// Counter-clockwise: `c` lies on the left of `a → b`.
    Ccw,
    /// Clockwise: `c` lies on the right of `a → b`.
    Cw,
    /// The points are collinear, or one of them has a NaN coordinate.
    None,
}

impl Orientation {
    /// The winding of the path `a → b → c`.
    pub fn of(a: &Point2<Real>, b: &Point2<Real>, c: &Point2<Real>) -> Self {
        let cross = (b - a).perp(&(c - b));

        if cross > 0.0 {
            Orientation::Ccw
        } else if cross < 0.0 {
            Orientation::Cw
        } else {
            Orientation::None
        }
    }
}

/// Does the triangle `a, b, c` contain `p`, boundary included?
///
/// Works for both windings. Returns `None` for a triangle collapsed on a line or a point.
pub fn is_point_in_triangle(
    p: &Point2<Real>,
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
) -> Option<bool> {
    let sides = [
        Orientation::of(p, a, b),
        Orientation::of(p, b, c),
        Orientation::of(p, c, a),
    ];

    if sides.iter().all(|side| *side == Orientation::None) {
        return None;
    }

    let has = |orientation| sides.contains(&orientation);
    Some(!(has(Orientation::Ccw) && has(Orientation::Cw)))
}
