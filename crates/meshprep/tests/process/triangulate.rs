use super::assert_indices_in_range;
use approx::assert_relative_eq;
use meshprep::math::{Point, Real, Vector};
use meshprep::process::triangulate_mesh;
use meshprep::scene::{Face, Mesh, PrimitiveTypes};
use oorandom::Rand32;

fn triangle_normal(mesh: &Mesh, face: &Face) -> Vector<Real> {
    let a = mesh.positions[face.indices[0] as usize];
    let b = mesh.positions[face.indices[1] as usize];
    let c = mesh.positions[face.indices[2] as usize];
    (b - a).cross(&(c - a))
}

fn total_area(mesh: &Mesh) -> Real {
    mesh.faces
        .iter()
        .map(|face| triangle_normal(mesh, face).norm() / 2.0)
        .sum()
}

/// The signed area of a polygon of the `z = 0` plane.
fn shoelace(pts: &[Point<Real>]) -> Real {
    (0..pts.len())
        .map(|i| {
            let (a, b) = (pts[i], pts[(i + 1) % pts.len()]);
            a.x * b.y - b.x * a.y
        })
        .sum::<Real>()
        / 2.0
}

#[test]
fn unit_square_quad() {
    let mut mesh = Mesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ],
        vec![Face::from([0, 1, 2, 3])],
    );

    assert!(triangulate_mesh(&mut mesh));
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.faces.len(), 2);
    assert_relative_eq!(total_area(&mesh), 1.0);
    assert!(mesh.primitive_types.contains(PrimitiveTypes::TRIANGLE));
    assert!(!mesh.primitive_types.contains(PrimitiveTypes::POLYGON));
}

#[test]
fn l_shaped_hexagon() {
    let positions = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(2.0, 0.0, 0.0),
        Point::new(2.0, 1.0, 0.0),
        Point::new(1.0, 1.0, 0.0),
        Point::new(1.0, 2.0, 0.0),
        Point::new(0.0, 2.0, 0.0),
    ];

    // Both windings: the projection must follow the orientation of the polygon.
    for indices in [[0u32, 1, 2, 3, 4, 5], [5, 4, 3, 2, 1, 0]] {
        let mut mesh = Mesh::new(positions.clone(), vec![Face::from(indices)]);
        let expected_normal_z = if indices[0] == 0 { 1.0 } else { -1.0 };

        assert!(triangulate_mesh(&mut mesh));
        assert_eq!(mesh.faces.len(), 4);
        assert_relative_eq!(total_area(&mesh), 3.0, epsilon = 1.0e-5);

        for face in &mesh.faces {
            assert_eq!(face.len(), 3);
            assert_relative_eq!(
                triangle_normal(&mesh, face).normalize(),
                Vector::z() * expected_normal_z,
                epsilon = 1.0e-5
            );
        }
    }
}

#[test]
fn random_star_polygons() {
    let mut rng = Rand32::new(0xdead_beef);

    for _ in 0..50 {
        let n = rng.rand_range(5..16) as usize;
        let phase = rng.rand_float() as Real;
        let positions: Vec<_> = (0..n)
            .map(|i| {
                // Alternating radii make the polygon concave but star-shaped.
                let radius = if i % 2 == 0 { 1.0 } else { 0.4 };
                let angle = phase + i as Real / n as Real * std::f32::consts::TAU as Real;
                Point::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            })
            .collect();
        let expected_area = shoelace(&positions);

        let mut mesh = Mesh::new(
            positions,
            vec![Face::from((0..n as u32).collect::<Vec<_>>())],
        );
        assert!(triangulate_mesh(&mut mesh));
        assert_indices_in_range(&mesh);
        assert_eq!(mesh.faces.len(), n - 2);
        assert_eq!(mesh.primitive_types, PrimitiveTypes::TRIANGLE);
        assert_relative_eq!(total_area(&mesh), expected_area, epsilon = 1.0e-4);

        for face in &mesh.faces {
            assert!(triangle_normal(&mesh, face).z > 0.0);
        }
    }
}

#[test]
fn triangle_groups_never_span_two_polygons() {
    // A convex pentagon whose vertices are shared by every face.
    let positions = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(2.0, 0.0, 0.0),
        Point::new(3.0, 1.0, 0.0),
        Point::new(1.0, 2.0, 0.0),
        Point::new(-1.0, 1.0, 0.0),
    ];
    let faces = vec![
        Face::from([0, 1, 2, 3]),
        Face::from([0, 1, 2]),
        Face::from([0, 1, 2, 3, 4]),
        Face::from([0, 2, 3]),
        Face::from([1, 2, 3, 4, 0]),
        Face::from([1, 2, 3, 4]),
    ];
    let num_triangles = [2, 1, 3, 1, 3, 2];
    let mut mesh = Mesh::new(positions, faces);

    assert!(triangulate_mesh(&mut mesh));
    assert_eq!(mesh.faces.len(), num_triangles.iter().sum::<usize>());

    let sources: Vec<usize> = num_triangles
        .iter()
        .enumerate()
        .flat_map(|(source, &n)| std::iter::repeat(source).take(n))
        .collect();

    for k in 1..mesh.faces.len() {
        let continues = mesh.faces[k].indices[0] == mesh.faces[k - 1].indices[0];
        let same_source = sources[k] == sources[k - 1];

        if continues {
            assert!(same_source, "triangle {k} continues a group of another polygon");
        }
    }

    // The two triangles of a quad always form a single group.
    assert_eq!(mesh.faces[0].indices[0], mesh.faces[1].indices[0]);
    assert_eq!(mesh.faces[10].indices[0], mesh.faces[11].indices[0]);

    for face in &mesh.faces {
        assert!(triangle_normal(&mesh, face).z > 0.0);
    }
}

#[test]
fn points_and_lines_survive() {
    let mut mesh = Mesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ],
        vec![
            Face::from([0, 1, 2, 3]),
            Face::from([3]),
            Face::from([1, 2]),
        ],
    );

    assert!(triangulate_mesh(&mut mesh));
    assert_eq!(mesh.faces[2], Face::from([3]));
    assert_eq!(mesh.faces[3], Face::from([1, 2]));
    assert_eq!(
        mesh.primitive_types,
        PrimitiveTypes::POINT | PrimitiveTypes::LINE | PrimitiveTypes::TRIANGLE
    );
}
