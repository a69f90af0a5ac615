// src/core/indexing/vector/antipole/tree.rs

//! Defines the core antipole tree structures: `BoundingSphere`, `AntipoleNode`
//! and `AntipoleTree`.

use super::error::AntipoleError;
use super::metric::squared_distance;
use crate::core::vector::VectorStore;

/// Center and squared radius enclosing every vector under a node.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingSphere {
    /// Coordinate-wise mean of the member vectors.
    pub center: Vec<f32>,
    /// Largest squared distance from `center` to a member.
    pub radius: f32,
}

impl BoundingSphere {
    /// Computes the sphere over the vectors of `members`.
    ///
    /// The radius is measured with the same `squared_distance` used by the
    /// search, so every member satisfies `d²(member, center) <= radius` exactly.
    ///
    /// # Errors
    /// Returns `AntipoleError::EmptyInput` if `members` is empty.
    pub fn enclosing(store: &VectorStore, members: &[usize]) -> Result<Self, AntipoleError> {
        if members.is_empty() {
            return Err(AntipoleError::EmptyInput(
                "bounding sphere of an empty matching set".to_string(),
            ));
        }

        let mut sums = vec![0.0_f64; store.dimension()];
        for &idx in members {
            for (sum, &component) in sums.iter_mut().zip(store.vector(idx)) {
                *sum += f64::from(component);
            }
        }
        let count = members.len() as f64;
        let center: Vec<f32> = sums.into_iter().map(|sum| (sum / count) as f32).collect();

        let radius = members
            .iter()
            .map(|&idx| squared_distance(&center, store.vector(idx)))
            .fold(0.0_f32, f32::max);

        Ok(Self { center, radius })
    }

    /// Lower bound on the squared distance from `probe` to any vector inside
    /// the sphere.
    ///
    /// From the triangle inequality, `d(probe, x) >= d(probe, center) - r` for
    /// every member `x`, with `r = sqrt(radius)`. The bound is squared back and
    /// clamped at zero for probes inside the sphere. Distances are taken in
    /// f64 so large coordinates do not overflow; a radius that overflowed to
    /// `inf` bounds nothing and yields zero. The result never exceeds
    /// `f32::MAX`, so a subtree whose distances overflow stays reachable.
    #[must_use]
    pub fn lower_bound(&self, probe: &[f32]) -> f32 {
        let to_center = probe
            .iter()
            .zip(&self.center)
            .map(|(&p, &c)| {
                let diff = f64::from(p) - f64::from(c);
                diff * diff
            })
            .sum::<f64>()
            .sqrt();
        let gap = to_center - f64::from(self.radius).sqrt();
        if gap.is_nan() || gap <= 0.0 {
            0.0
        } else {
            ((gap * gap) as f32).min(f32::MAX)
        }
    }

    /// True if `vector` lies within the sphere.
    #[must_use]
    pub fn contains(&self, vector: &[f32]) -> bool {
        squared_distance(&self.center, vector) <= self.radius
    }
}

/// Represents a node in the antipole tree.
///
/// Leaves hold global indices into the index's `VectorStore`; internal nodes
/// own exactly two children. Every node carries the sphere of all vectors
/// beneath it.
#[derive(Debug)]
pub enum AntipoleNode {
    Internal {
        sphere: BoundingSphere,
        left: Box<AntipoleNode>,
        right: Box<AntipoleNode>,
    },
    Leaf {
        sphere: BoundingSphere,
        members: Vec<usize>,
    },
}

impl AntipoleNode {
    #[must_use]
    pub const fn sphere(&self) -> &BoundingSphere {
        match self {
            Self::Internal { sphere, .. } | Self::Leaf { sphere, .. } => sphere,
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Global indices of every vector in this subtree, leaves left to right.
    #[must_use]
    pub fn collect_members(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_members_into(&mut out);
        out
    }

    fn collect_members_into(&self, out: &mut Vec<usize>) {
        match self {
            Self::Leaf { members, .. } => out.extend_from_slice(members),
            Self::Internal { left, right, .. } => {
                left.collect_members_into(out);
                right.collect_members_into(out);
            }
        }
    }

    /// Visits this node and all its descendants, parents before children.
    pub fn walk<'a, F: FnMut(&'a AntipoleNode, usize)>(&'a self, visit: &mut F) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a, F: FnMut(&'a AntipoleNode, usize)>(&'a self, depth: usize, visit: &mut F) {
        visit(self, depth);
        if let Self::Internal { left, right, .. } = self {
            left.walk_at(depth + 1, visit);
            right.walk_at(depth + 1, visit);
        }
    }
}

/// Shape summary of a built tree, logged after each build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    /// Number of edges on the longest root-to-leaf path.
    pub depth: usize,
    pub largest_leaf: usize,
    pub indexed_vectors: usize,
}

/// Represents an antipole tree.
///
/// Vectors are not stored in the nodes; leaves keep global indices into the
/// `VectorStore` the tree was built from, which must be supplied again at
/// search time.
#[derive(Debug)]
pub struct AntipoleTree {
    pub root: Option<Box<AntipoleNode>>,
    pub dimension: usize,
}

impl AntipoleTree {
    /// Creates a new, empty tree for a given dimension.
    /// The actual tree structure is built using `build_antipole_tree`.
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { root: None, dimension }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Sets the root node of the tree. Primarily used by the builder.
    pub(super) fn set_root(&mut self, root_node: AntipoleNode) {
        self.root = Some(Box::new(root_node));
    }

    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        if let Some(root) = self.root.as_deref() {
            root.walk(&mut |node, depth| {
                stats.nodes += 1;
                stats.depth = stats.depth.max(depth);
                if let AntipoleNode::Leaf { members, .. } = node {
                    stats.leaves += 1;
                    stats.largest_leaf = stats.largest_leaf.max(members.len());
                    stats.indexed_vectors += members.len();
                }
            });
        }
        stats
    }
}
