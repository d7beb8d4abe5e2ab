use crate::utils::hashmap::HashMap;

/// Orders the triangles produced by triangulation so that the polygons they come from can
/// be recovered afterwards.
///
/// Consecutive triangles starting with the same vertex index belong to the same polygon.
/// The encoder rotates the indices of each triangle (which preserves its winding) so that
/// two adjacent groups never start with the same index.
#[derive(Copy, Clone, Debug, Default)]
pub struct NgonEncoder {
    last_first_index: Option<u32>,
}

impl NgonEncoder {
    /// Creates an encoder with no triangle emitted yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The first index of the last emitted group.
    #[inline]
    pub fn last_first_index(&self) -> Option<u32> {
        self.last_first_index
    }

    /// Would `triangle` be read as a continuation of the last emitted polygon?
    #[inline]
    pub fn is_considered_same_as_last_ngon(&self, triangle: &[u32; 3]) -> bool {
        self.last_first_index == Some(triangle[0])
    }

    /// Encodes a triangle that was a triangle in the source mesh.
    pub fn encode_triangle(&mut self, triangle: &mut [u32; 3]) {
        if self.is_considered_same_as_last_ngon(triangle) {
            triangle.rotate_right(1);
        }

        self.last_first_index = Some(triangle[0]);
    }

    /// Encodes the two triangles of a quad, both starting with the same index.
    pub fn encode_quad(&mut self, tri1: &mut [u32; 3], tri2: &mut [u32; 3]) {
        debug_assert_eq!(tri1[0], tri2[0]);

        if self.is_considered_same_as_last_ngon(tri1) {
            // tri1 = [s, a, b] and tri2 = [s, b, c]: both rotate to start with `b`.
            tri1.rotate_right(1);
            tri2.rotate_left(1);
        }

        self.last_first_index = Some(tri1[0]);
    }

    /// Encodes the triangles of a polygon with more than four vertices, reordering them.
    ///
    /// An anchor vertex is picked among the vertices shared by the most triangles, avoiding
    /// the first index of the previous group. The triangles containing it are moved first
    /// and rotated to start with it, so a fan forms a single group. The other triangles
    /// follow, each encoded as its own group.
    pub fn encode_polygon(&mut self, triangles: &mut [[u32; 3]]) {
        let Some(anchor) = self.pick_anchor(triangles) else {
            return;
        };

        let mut num_anchored = 0;
        for k in 0..triangles.len() {
            if let Some(pos) = triangles[k].iter().position(|&i| i == anchor) {
                triangles[k].rotate_left(pos);
                triangles[num_anchored..=k].rotate_right(1);
                num_anchored += 1;
            }
        }

        self.last_first_index = Some(anchor);

        for triangle in &mut triangles[num_anchored..] {
            self.encode_triangle(triangle);
        }
    }

    fn pick_anchor(&self, triangles: &[[u32; 3]]) -> Option<u32> {
        let mut counts: HashMap<u32, usize> = HashMap::default();
        let mut order = Vec::new();

        for &i in triangles.iter().flatten() {
            let count = counts.entry(i).or_insert(0);
            if *count == 0 {
                order.push(i);
            }
            *count += 1;
        }

        // Ties go to the first vertex met.
        let mut best: Option<(u32, usize)> = None;
        for &i in &order {
            if Some(i) == self.last_first_index {
                continue;
            }

            let count = counts[&i];
            if best.map(|(_, best_count)| count > best_count).unwrap_or(true) {
                best = Some((i, count));
            }
        }

        best.map(|(i, _)| i).or(self.last_first_index)
    }
}
