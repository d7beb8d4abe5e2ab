use super::{assert_indices_in_range, assert_node_references_in_range};
use meshprep::math::{Point, Real};
use meshprep::process::split_by_primitive_type;
use meshprep::scene::{
    AnimMesh, Bone, Face, Mesh, Node, PrimitiveKind, PrimitiveTypes, Scene, VertexWeight,
};
use oorandom::Rand32;

#[test]
fn two_triangles_and_a_line() {
    let mesh = Mesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ],
        vec![
            Face::from([0, 1, 2]),
            Face::from([1, 3]),
            Face::from([0, 2, 3]),
        ],
    );
    let root = Node::new("root").with_child(Node::new("holder").with_meshes(vec![0]));
    let mut scene = Scene::new(root, vec![mesh]);

    assert!(split_by_primitive_type(&mut scene, PrimitiveTypes::empty()).unwrap());
    assert_eq!(scene.meshes.len(), 2);

    let triangles = scene
        .meshes
        .iter()
        .find(|m| m.primitive_types == PrimitiveTypes::TRIANGLE)
        .unwrap();
    let lines = scene
        .meshes
        .iter()
        .find(|m| m.primitive_types == PrimitiveTypes::LINE)
        .unwrap();
    assert_eq!(triangles.faces.len(), 2);
    assert_eq!(lines.faces.len(), 1);
    assert_eq!(lines.num_vertices(), 2);

    let holder = scene.root.find_by_name("holder").unwrap();
    assert_eq!(holder.meshes, vec![0, 1]);
}

/// A random mesh mixing every primitive kind, with a bone and a morph target.
fn random_mixed_mesh(rng: &mut Rand32, name: &str) -> Mesh {
    let num_vertices: u32 = 40;
    let positions: Vec<_> = (0..num_vertices)
        .map(|_| {
            Point::new(
                rng.rand_float() as Real,
                rng.rand_float() as Real,
                rng.rand_float() as Real,
            )
        })
        .collect();
    let faces: Vec<Face> = (0..30)
        .map(|_| {
            let len = rng.rand_range(1..6);
            let indices: Vec<u32> = (0..len).map(|_| rng.rand_range(0..num_vertices)).collect();
            Face::from(indices)
        })
        .collect();

    let mut mesh = Mesh::new(positions.clone(), faces);
    mesh.name = name.to_string();
    mesh.bones = vec![Bone::new(
        "bone",
        (0..num_vertices)
            .step_by(3)
            .map(|i| VertexWeight::new(i, 1.0))
            .collect(),
    )];
    mesh.anim_meshes = vec![AnimMesh {
        positions: Some(positions),
        ..Default::default()
    }];
    mesh
}

#[test]
fn random_scenes_are_split_consistently() {
    let mut rng = Rand32::new(2024);

    for _ in 0..20 {
        let meshes: Vec<_> = (0..3)
            .map(|i| random_mixed_mesh(&mut rng, &format!("mesh{i}")))
            .collect();
        let faces_per_kind = |meshes: &[Mesh], kind: PrimitiveKind| {
            meshes
                .iter()
                .flat_map(|m| &m.faces)
                .filter(|f| f.kind() == Some(kind))
                .count()
        };
        let expected: Vec<_> = PrimitiveKind::ALL
            .iter()
            .map(|&kind| faces_per_kind(&meshes[..], kind))
            .collect();

        let root = Node::new("root")
            .with_meshes(vec![2])
            .with_child(Node::new("a").with_meshes(vec![0, 1]))
            .with_child(Node::new("b").with_child(Node::new("c").with_meshes(vec![1])));
        let mut scene = Scene::new(root, meshes);

        let _ = split_by_primitive_type(&mut scene, PrimitiveTypes::empty()).unwrap();

        for mesh in &scene.meshes {
            assert_eq!(mesh.primitive_types.bits().count_ones(), 1);
            assert_eq!(mesh.primitive_types, mesh.compute_primitive_types());
            assert_indices_in_range(mesh);
            assert_eq!(
                mesh.anim_meshes[0].positions.as_ref().unwrap(),
                &mesh.positions
            );
        }
        assert_node_references_in_range(&scene);

        for (kind, expected) in PrimitiveKind::ALL.iter().zip(&expected) {
            assert_eq!(faces_per_kind(&scene.meshes[..], *kind), *expected);
        }

        // Every node now references the meshes its original mesh was split into.
        let c = scene.root.find_by_name("c").unwrap();
        assert!(c.meshes.iter().all(|&m| scene.meshes[m as usize].name == "mesh1"));
        assert!(!c.meshes.is_empty());
    }
}

#[test]
fn removal_mask_drops_kinds() {
    let mut rng = Rand32::new(3);
    let meshes = vec![random_mixed_mesh(&mut rng, "m")];
    let mut scene = Scene::new(Node::new("root").with_meshes(vec![0]), meshes);

    let remove = PrimitiveTypes::POINT | PrimitiveTypes::LINE;
    let _ = split_by_primitive_type(&mut scene, remove).unwrap();

    for mesh in &scene.meshes {
        assert!(!remove.intersects(mesh.primitive_types));
    }
    assert_node_references_in_range(&scene);
}
