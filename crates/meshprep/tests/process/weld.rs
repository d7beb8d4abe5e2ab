use super::assert_indices_in_range;
use meshprep::math::{Point, Real, Vector};
use meshprep::na;
use meshprep::process::{join_identical_vertices, position_epsilon, DEFAULT_JOIN_EPSILON};
use meshprep::scene::{Bone, Face, Mesh, VertexWeight};
use oorandom::Rand32;

/// Well separated clusters of vertices, each vertex being a jittered copy of its cluster center.
///
/// Vertex `k * num_clusters + c` is the `k`-th copy of the cluster `c`. Every cluster is used
/// by at least one triangle.
fn clustered_mesh(rng: &mut Rand32, num_clusters: usize, num_copies: usize) -> Mesh {
    let centers: Vec<_> = (0..num_clusters)
        .map(|c| {
            Point::new(
                (c % 10) as Real + rng.rand_float() as Real * 0.2,
                ((c / 10) % 10) as Real + rng.rand_float() as Real * 0.2,
                (c / 100) as Real + rng.rand_float() as Real * 0.2,
            )
        })
        .collect();

    let mut positions = Vec::with_capacity(num_clusters * num_copies);
    for k in 0..num_copies {
        for center in &centers {
            let jitter = if k == 0 {
                Vector::zeros()
            } else {
                Vector::new(
                    rng.rand_float() as Real,
                    rng.rand_float() as Real,
                    rng.rand_float() as Real,
                ) * 1.0e-5
            };
            positions.push(*center + jitter);
        }
    }

    let mut vertex = |c: usize| {
        let copy = rng.rand_range(0..num_copies as u32) as usize;
        (copy * num_clusters + c % num_clusters) as u32
    };
    let faces = (0..num_clusters)
        .map(|c| Face::from([vertex(c), vertex(c + 1), vertex(c + 2)]))
        .collect();

    Mesh::new(positions, faces)
}

#[test]
fn weld_clusters() {
    let mut rng = Rand32::new(42);
    let original = clustered_mesh(&mut rng, 150, 4);
    let epsilon = position_epsilon(&original, DEFAULT_JOIN_EPSILON);

    let mut mesh = original.clone();
    assert_eq!(join_identical_vertices(&mut mesh, DEFAULT_JOIN_EPSILON, None), 150);
    assert_indices_in_range(&mesh);
    assert_eq!(mesh.faces.len(), original.faces.len());

    // Every face corner still sits where it was, up to the welding radius.
    for (welded, face) in mesh.faces.iter().zip(&original.faces) {
        for (&i, &j) in welded.indices.iter().zip(&face.indices) {
            let dist = na::distance(&mesh.positions[i as usize], &original.positions[j as usize]);
            assert!(dist <= epsilon);
        }
    }

    // Vertices of a single cluster all map to the same output vertex.
    let mut output_of_cluster = vec![None; 150];
    for (welded, face) in mesh.faces.iter().zip(&original.faces) {
        for (&i, &j) in welded.indices.iter().zip(&face.indices) {
            let cluster = j as usize % 150;
            let expected = *output_of_cluster[cluster].get_or_insert(i);
            assert_eq!(i, expected);
        }
    }
}

#[test]
fn weld_is_idempotent() {
    let mut rng = Rand32::new(7);

    for _ in 0..10 {
        let mut mesh = clustered_mesh(&mut rng, 60, 3);
        // Two possible normals per vertex: some copies can't be joined.
        mesh.normals = Some(
            (0..mesh.num_vertices())
                .map(|_| {
                    if rng.rand_range(0..2) == 0 {
                        Vector::z()
                    } else {
                        Vector::x()
                    }
                })
                .collect(),
        );

        let first = join_identical_vertices(&mut mesh, DEFAULT_JOIN_EPSILON, None);
        assert!((60..=120).contains(&first));
        assert_indices_in_range(&mesh);

        let snapshot = mesh.clone();
        let second = join_identical_vertices(&mut mesh, DEFAULT_JOIN_EPSILON, None);
        assert_eq!(first, second);
        assert_eq!(mesh, snapshot);
    }
}

#[test]
fn weld_keeps_bone_weights_in_range() {
    let mut rng = Rand32::new(1);
    let mut mesh = clustered_mesh(&mut rng, 30, 3);
    let num_vertices = mesh.num_vertices() as u32;
    mesh.bones = vec![
        Bone::new(
            "all",
            (0..num_vertices).map(|i| VertexWeight::new(i, 0.5)).collect(),
        ),
        Bone::new("sparse", vec![VertexWeight::new(num_vertices - 1, 1.0)]),
    ];

    let num_welded = join_identical_vertices(&mut mesh, DEFAULT_JOIN_EPSILON, None);
    assert_eq!(num_welded, 30);
    assert_indices_in_range(&mesh);

    // Only the first original of each output vertex keeps its weight.
    assert_eq!(mesh.bones[0].weights.len(), 30);
}
