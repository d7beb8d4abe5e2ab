use meshprep::scene::{Mesh, Scene};

mod degenerates;
mod sort_by_ptype;
mod triangulate;
mod weld;

/// Asserts that every face index and bone weight of `mesh` references an existing vertex.
fn assert_indices_in_range(mesh: &Mesh) {
    let num_vertices = mesh.num_vertices();

    for face in &mesh.faces {
        for &i in &face.indices {
            assert!((i as usize) < num_vertices, "face index {i} out of range");
        }
    }

    for bone in &mesh.bones {
        assert!(!bone.weights.is_empty());
        for w in &bone.weights {
            assert!((w.vertex_id as usize) < num_vertices);
        }
    }
}

/// Asserts that every node references an existing mesh.
fn assert_node_references_in_range(scene: &Scene) {
    let num_meshes = scene.meshes.len();
    scene.root.visit(&mut |node| {
        for &m in &node.meshes {
            assert!((m as usize) < num_meshes, "node {:?} references mesh {m}", node.name);
        }
    });
}
