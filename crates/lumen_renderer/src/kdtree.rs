//! Balanced kd-tree over a photon map.
//!
//! Nodes live in a flat arena (root at index 0) and refer to photons by
//! their index in the borrowed photon slice. Built once, queried from
//! many render threads.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use lumen_math::{Aabb, Vec3};
use lumen_scene::SurfaceId;

use crate::photon::Photon;

#[derive(Debug, Clone, Copy)]
struct Node {
    /// Index of the photon stored at this node.
    photon: usize,
    /// Split axis, `None` for leaves.
    axis: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Spatial index answering "k nearest photons on surface S" queries.
pub struct PhotonIndex<'a> {
    photons: &'a [Photon],
    nodes: Vec<Node>,
}

impl<'a> PhotonIndex<'a> {
    /// Balance a tree over every photon of `photons`.
    ///
    /// Each node splits its subset on the longest axis of the subset's
    /// bounding box at the median position. An empty slice gives an empty
    /// index.
    pub fn build(photons: &'a [Photon]) -> Self {
        let mut nodes = Vec::with_capacity(photons.len());
        let mut subset: Vec<usize> = (0..photons.len()).collect();
        if !subset.is_empty() {
            Self::build_node(photons, &mut nodes, &mut subset);
        }
        Self { photons, nodes }
    }

    /// Recursive construction; returns the arena index of the new node.
    fn build_node(photons: &[Photon], nodes: &mut Vec<Node>, subset: &mut [usize]) -> usize {
        let id = nodes.len();

        if let [photon] = *subset {
            nodes.push(Node {
                photon,
                axis: None,
                left: None,
                right: None,
            });
            return id;
        }

        let bounds = Aabb::from_points(subset.iter().map(|&i| photons[i].position));
        let axis = bounds.longest_axis();

        // Total order (coordinate, index) so the median is the element a full
        // sort would put at position n/2.
        let mid = subset.len() / 2;
        subset.select_nth_unstable_by(mid, |&a, &b| {
            photons[a].position[axis]
                .total_cmp(&photons[b].position[axis])
                .then(a.cmp(&b))
        });

        nodes.push(Node {
            photon: subset[mid],
            axis: Some(axis),
            left: None,
            right: None,
        });

        let (left, rest) = subset.split_at_mut(mid);
        let right = &mut rest[1..];

        let left_id = Self::build_node(photons, nodes, left);
        nodes[id].left = Some(left_id);

        if !right.is_empty() {
            let right_id = Self::build_node(photons, nodes, right);
            nodes[id].right = Some(right_id);
        }

        id
    }

    /// The indexed photons.
    pub fn photons(&self) -> &'a [Photon] {
        self.photons
    }

    /// Number of indexed photons.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the index holds no photons.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 1usize)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Find the `k` photons nearest to `point` that landed on `surface`.
    ///
    /// Returns fewer than `k` when fewer photons match, and an empty result
    /// when none do.
    pub fn locate(&self, point: Vec3, k: usize, surface: SurfaceId) -> Neighbors {
        let mut neighbors = Neighbors::new(k, self.nodes.len());
        if k > 0 && !self.nodes.is_empty() {
            self.locate_node(0, point, surface, &mut neighbors);
        }
        neighbors
    }

    fn locate_node(&self, id: usize, point: Vec3, surface: SurfaceId, neighbors: &mut Neighbors) {
        let node = &self.nodes[id];
        let photon = &self.photons[node.photon];

        if photon.surface == surface {
            neighbors.offer(photon.position.distance(point), node.photon);
        }

        let Some(axis) = node.axis else {
            return;
        };

        let delta = point[axis] - photon.position[axis];
        let (near, far) = if delta < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.locate_node(near, point, surface, neighbors);
        }

        // The far side can only help if the search sphere crosses the plane.
        if let Some(far) = far {
            if !neighbors.is_full() || delta.abs() < neighbors.worst() {
                self.locate_node(far, point, surface, neighbors);
            }
        }
    }
}

/// One result of a nearest-neighbour query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub distance: f32,
    /// Index into the indexed photon slice.
    pub photon: usize,
}

impl Eq for Neighbor {}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.photon.cmp(&other.photon))
    }
}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounded max-heap of the nearest photons found so far.
#[derive(Debug, Clone)]
pub struct Neighbors {
    k: usize,
    heap: BinaryHeap<Neighbor>,
}

impl Neighbors {
    /// Empty result set for `k` neighbours out of `available` photons.
    fn new(k: usize, available: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.min(available).saturating_add(1)),
        }
    }

    fn offer(&mut self, distance: f32, photon: usize) {
        self.heap.push(Neighbor { distance, photon });
        if self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    fn worst(&self) -> f32 {
        self.heap.peek().map_or(f32::INFINITY, |n| n.distance)
    }

    /// Distance to the farthest kept photon, the radius of the gather disk.
    pub fn radius(&self) -> Option<f32> {
        self.heap.peek().map(|n| n.distance)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Kept photons in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Neighbor> {
        self.heap.iter()
    }
}
