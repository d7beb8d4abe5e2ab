use crate::math::{Point, Point2, Real};
use crate::process::{
    NgonEncoder, PostProcess, PostProcessError, ProcessFlags, SharedPostProcessInfo,
};
use crate::scene::{Face, Mesh, PrimitiveTypes, Scene};
use crate::transformation::triangulate_ear_clipping;
use crate::utils::{newell_normal, Orientation};
use na::RealField;

/// Splits every polygon into triangles.
///
/// See [`triangulate_mesh`] for details.
#[derive(Copy, Clone, Debug, Default)]
pub struct TriangulateProcess;

impl PostProcess for TriangulateProcess {
    fn name(&self) -> &'static str {
        "TriangulateProcess"
    }

    fn is_active(&self, flags: ProcessFlags) -> bool {
        flags.contains(ProcessFlags::TRIANGULATE)
    }

    fn execute(
        &self,
        scene: &mut Scene,
        _: &mut SharedPostProcessInfo,
    ) -> Result<(), PostProcessError> {
        log::debug!("TriangulateProcess begin");

        let changed = super::map_meshes(&mut scene.meshes, |_, mesh| triangulate_mesh(mesh));
        let num_changed = changed.iter().filter(|c| **c).count();

        if num_changed > 0 {
            log::info!(
                "TriangulateProcess finished. {} meshes were triangulated.",
                num_changed
            );
        } else {
            log::debug!("TriangulateProcess finished. There was nothing to be done.");
        }

        Ok(())
    }
}

/// Replaces every face of `mesh` with more than three indices by triangles.
///
/// Quads are split along the diagonal starting at their concave vertex, if any. Larger
/// polygons are projected on the plane orthogonal to the dominant axis of their normal,
/// then split as a fan when one of their vertices sees the whole outline, so that they
/// are encoded as a single group. Other polygons are ear-clipped, falling back to a fan
/// from their first vertex when ear clipping fails. Each polygon with `n`
/// vertices yields `n - 2` triangles with the winding of the polygon. Points, lines and
/// triangles are kept as they are. The output is encoded by an [`NgonEncoder`].
///
/// Returns `false`, leaving the faces untouched, if `mesh` has no polygon. Its primitive
/// types are still fixed if they wrongly claim polygons.
///
/// # Panics
/// Panics if a polygon index is out of the bounds of the vertex positions.
pub fn triangulate_mesh(mesh: &mut Mesh) -> bool {
    if !mesh.faces.iter().any(|face| face.len() > 3) {
        if mesh.primitive_types.contains(PrimitiveTypes::POLYGON) {
            log::debug!(
                "Mesh {:?} claims polygons but has none, fixing its primitive types",
                mesh.name
            );
            mesh.primitive_types = mesh.compute_primitive_types();
        }
        return false;
    }

    let num_faces = mesh
        .faces
        .iter()
        .map(|face| face.len().saturating_sub(2).max(1))
        .sum();
    let mut faces = Vec::with_capacity(num_faces);
    let mut encoder = NgonEncoder::new();
    let mut projected = Vec::new();

    for face in std::mem::take(&mut mesh.faces) {
        match face.len() {
            0..=2 => faces.push(face),
            3 => {
                let mut tri = [face.indices[0], face.indices[1], face.indices[2]];
                encoder.encode_triangle(&mut tri);
                faces.push(Face::triangle(tri));
            }
            4 => {
                let (mut tri1, mut tri2) = triangulate_quad(&mesh.positions, &face.indices);
                encoder.encode_quad(&mut tri1, &mut tri2);
                faces.push(Face::triangle(tri1));
                faces.push(Face::triangle(tri2));
            }
            _ => {
                let mut triangles = triangulate_polygon(
                    &mesh.positions,
                    &face.indices,
                    encoder.last_first_index(),
                    &mut projected,
                );
                encoder.encode_polygon(&mut triangles);
                faces.extend(triangles.into_iter().map(Face::triangle));
            }
        }
    }

    mesh.faces = faces;
    mesh.primitive_types = mesh.compute_primitive_types();
    true
}

/// Splits a quad along the diagonal starting at its concave vertex, or at its first vertex.
fn triangulate_quad(positions: &[Point<Real>], indices: &[u32]) -> ([u32; 3], [u32; 3]) {
    let p = |k: usize| positions[indices[k % 4] as usize];

    // The two angles between the diagonal and the sides of a vertex sum to more than
    // pi only at a concave vertex.
    let start = (0..4)
        .find(|&i| {
            let v = p(i);
            let left = (p(i + 3) - v).normalize();
            let diag = (p(i + 2) - v).normalize();
            let right = (p(i + 1) - v).normalize();

            let angle = left.dot(&diag).clamp(-1.0, 1.0).acos()
                + right.dot(&diag).clamp(-1.0, 1.0).acos();
            angle > Real::pi()
        })
        .unwrap_or(0);

    let i = |k: usize| indices[(start + k) % 4];
    ([i(0), i(1), i(2)], [i(0), i(2), i(3)])
}

/// Triangulates a polygon with more than four vertices.
///
/// A fan apex equal to `avoid` is only used if no other vertex fits. `projected` is a
/// scratch buffer reused across polygons.
fn triangulate_polygon(
    positions: &[Point<Real>],
    indices: &[u32],
    avoid: Option<u32>,
    projected: &mut Vec<Point2<Real>>,
) -> Vec<[u32; 3]> {
    let normal = newell_normal(indices.iter().map(move |&i| &positions[i as usize]));

    // Drop the dominant axis of the normal, and order the two others so that the
    // projection stays counter-clockwise.
    let (nx, ny, nz) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    let (mut ac, mut bc, inv) = if nx > ny {
        if nx > nz {
            (1, 2, normal.x)
        } else {
            (0, 1, normal.z)
        }
    } else if ny > nz {
        (2, 0, normal.y)
    } else {
        (0, 1, normal.z)
    };

    if inv < 0.0 {
        std::mem::swap(&mut ac, &mut bc);
    }

    projected.clear();
    projected.extend(indices.iter().map(|&i| {
        let p = &positions[i as usize];
        Point2::new(p[ac], p[bc])
    }));

    let fan = |apex: usize| -> Vec<[u32; 3]> {
        let n = indices.len();
        (1..n - 1)
            .map(move |k| {
                [
                    indices[apex],
                    indices[(apex + k) % n],
                    indices[(apex + k + 1) % n],
                ]
            })
            .collect()
    };

    if let Some(apex) = find_fan_apex(projected, indices, avoid) {
        return fan(apex);
    }

    match triangulate_ear_clipping(projected) {
        Some(triangles) => triangles
            .into_iter()
            .map(|tri| tri.map(|k| indices[k as usize]))
            .collect(),
        None => {
            log::warn!(
                "Failed to triangulate a polygon with {} vertices (no ear found), using a fan instead",
                indices.len()
            );
            fan(0)
        }
    }
}

/// A vertex from which a fan triangulates the counter-clockwise polygon `points`.
///
/// Reflex vertices are tried first, then the others in order.
fn find_fan_apex(points: &[Point2<Real>], indices: &[u32], avoid: Option<u32>) -> Option<usize> {
    let n = points.len();
    let is_reflex = |i: usize| {
        Orientation::of(&points[(i + n - 1) % n], &points[i], &points[(i + 1) % n])
            == Orientation::Cw
    };

    let (reflex, convex): (Vec<usize>, Vec<usize>) = (0..n).partition(|&i| is_reflex(i));
    let mut apexes = reflex
        .into_iter()
        .chain(convex)
        .filter(|&apex| is_valid_fan(points, apex));

    let first = apexes.next()?;
    if avoid == Some(indices[first]) {
        Some(apexes.next().unwrap_or(first))
    } else {
        Some(first)
    }
}

/// Do the triangles of the fan around `apex` cover the polygon without overlapping?
///
/// They do if every triangle is counter-clockwise and the rays from the apex turn by
/// less than a full turn.
fn is_valid_fan(points: &[Point2<Real>], apex: usize) -> bool {
    let n = points.len();
    let origin = points[apex];
    let mut sweep: Real = 0.0;

    for k in 1..n - 1 {
        let a = points[(apex + k) % n] - origin;
        let b = points[(apex + k + 1) % n] - origin;
        let cross = a.perp(&b);

        if cross.is_nan() || cross <= 0.0 {
            return false;
        }

        sweep += cross.atan2(a.dot(&b));
    }

    sweep < Real::two_pi()
}
