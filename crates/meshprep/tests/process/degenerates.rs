use super::{assert_indices_in_range, assert_node_references_in_range};
use meshprep::math::{Point, Real};
use meshprep::process::{find_degenerates, PostProcessConfig, PostProcessor, ProcessFlags};
use meshprep::scene::{Face, Mesh, Node, PrimitiveTypes, Scene};
use oorandom::Rand32;

#[test]
fn triangle_collapses_into_a_line() {
    let mut mesh = Mesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
        ],
        vec![Face::from([0, 1, 2])],
    );

    assert_eq!(find_degenerates(&mut mesh, false, false), 1);
    assert_eq!(mesh.faces, vec![Face::from([0, 1])]);
    assert_eq!(mesh.primitive_types, PrimitiveTypes::LINE);
}

/// Positions snapped to a coarse grid, so that many faces have coincident corners.
fn snapped_mesh(rng: &mut Rand32) -> Mesh {
    let num_vertices = 30;
    let positions = (0..num_vertices)
        .map(|_| {
            Point::new(
                rng.rand_range(0..3) as Real,
                rng.rand_range(0..3) as Real,
                0.0,
            )
        })
        .collect();
    let faces = (0..50)
        .map(|_| {
            let len = rng.rand_range(2..6);
            let indices: Vec<u32> = (0..len).map(|_| rng.rand_range(0..num_vertices)).collect();
            Face::from(indices)
        })
        .collect();

    Mesh::new(positions, faces)
}

fn distinct_positions(mesh: &Mesh, face: &Face) -> bool {
    face.indices.iter().enumerate().all(|(i, &a)| {
        face.indices[i + 1..]
            .iter()
            .all(|&b| mesh.positions[a as usize] != mesh.positions[b as usize])
    })
}

#[test]
fn collapsed_faces_have_distinct_positions() {
    let mut rng = Rand32::new(11);

    for _ in 0..20 {
        let original = snapped_mesh(&mut rng);
        let mut mesh = original.clone();
        let expected = original
            .faces
            .iter()
            .filter(|face| !distinct_positions(&original, face))
            .count();

        assert_eq!(find_degenerates(&mut mesh, false, false), expected);
        assert_eq!(mesh.faces.len(), original.faces.len());
        assert_eq!(mesh.primitive_types, mesh.compute_primitive_types());
        assert_indices_in_range(&mesh);

        for (face, source) in mesh.faces.iter().zip(&original.faces) {
            assert!(!face.is_empty());
            assert!(distinct_positions(&mesh, face));
            // Collapsing only erases indices, it never reorders them.
            let mut remaining = source.indices.iter();
            assert!(face.indices.iter().all(|i| remaining.any(|j| j == i)));
        }
    }
}

#[test]
fn removal_deletes_faces_then_empty_meshes() {
    let mut rng = Rand32::new(5);
    let original = snapped_mesh(&mut rng);

    let mut mesh = original.clone();
    let num_degenerates = find_degenerates(&mut mesh, true, false);
    assert_eq!(mesh.faces.len() + num_degenerates, original.faces.len());
    assert!(mesh.faces.iter().all(|face| distinct_positions(&mesh, face)));

    // Only degenerate faces: the whole mesh goes away.
    let flat = Mesh::new(
        vec![Point::new(0.0, 0.0, 0.0), Point::new(0.0, 0.0, 0.0)],
        vec![Face::from([0, 1]), Face::from([1, 0])],
    );
    let root = Node::new("root")
        .with_meshes(vec![0, 1])
        .with_child(Node::new("flat").with_meshes(vec![0]));
    let mut scene = Scene::new(root, vec![flat, original]);

    let config = PostProcessConfig {
        find_degenerates_remove: true,
        ..PostProcessConfig::default()
    };
    PostProcessor::new(&config)
        .apply(&mut scene, ProcessFlags::FIND_DEGENERATES)
        .unwrap();

    assert_eq!(scene.meshes.len(), 1);
    assert_eq!(scene.meshes[0], mesh);
    assert_eq!(scene.root.meshes, vec![0]);
    assert!(scene.root.find_by_name("flat").unwrap().meshes.is_empty());
    assert_node_references_in_range(&scene);
}

#[test]
fn slivers_are_removed_with_area_checks() {
    let mut mesh = Mesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.5, 1.0e-8, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ],
        vec![Face::from([0, 1, 2]), Face::from([0, 1, 3])],
    );

    let mut counted = mesh.clone();
    assert_eq!(find_degenerates(&mut counted, false, true), 1);
    assert_eq!(counted.faces.len(), 2);

    assert_eq!(find_degenerates(&mut mesh, true, true), 1);
    assert_eq!(mesh.faces, vec![Face::from([0, 1, 3])]);
}
