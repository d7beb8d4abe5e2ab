//! Various unsorted geometrical and logical operators.

pub use self::newell_normal::newell_normal;
pub use self::point_in_triangle::{is_point_in_triangle, Orientation};

pub mod hashmap;
mod newell_normal;
mod point_in_triangle;
