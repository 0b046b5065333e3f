//! Proximity clusters

use crate::scene::SceneSnapshot;
use super::relations::RelationshipGraph;

/// Disjoint-set forest over snapshot indices
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self { parent: (0..len).collect() }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Keep the smaller index as root so groups order by first member
            self.parent[ra.max(rb)] = ra.min(rb);
        }
    }
}

impl RelationshipGraph {
    /// Connected components of the "near" relation
    ///
    /// Only groups with at least two members are returned. Groups are ordered
    /// by their first member and members follow snapshot order.
    pub fn cluster(&self, snapshot: &SceneSnapshot) -> Vec<Vec<String>> {
        let boxes: Vec<_> = snapshot.iter().map(|(_, aabb)| aabb).collect();
        let mut sets = DisjointSet::new(boxes.len());
        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                if self.is_near(boxes[i], boxes[j]) {
                    sets.union(i, j);
                }
            }
        }

        let mut groups: Vec<(usize, Vec<String>)> = Vec::new();
        for (i, object) in snapshot.objects().iter().enumerate() {
            let root = sets.find(i);
            match groups.iter_mut().find(|(r, _)| *r == root) {
                Some((_, members)) => members.push(object.name.clone()),
                None => groups.push((root, vec![object.name.clone()])),
            }
        }

        groups.into_iter()
            .map(|(_, members)| members)
            .filter(|members| members.len() > 1)
            .collect()
    }
}
