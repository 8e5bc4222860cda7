use std::cmp::Ordering;

use log::debug;

use crate::bounds::BoundingBox;
use crate::config::BuildConfig;
use crate::error::{KdTreeError, Result};
use crate::point::{DataPoint, Point};
use crate::stack::STACK_DEPTH;

/// Parent index stored for the root.
pub const NO_NODE: u32 = u32::MAX;

/// One node of the flat node array.
///
/// A node is a leaf iff `count > 0`. For a leaf, `offset` is the start of its
/// range in the primitive permutation. For an internal node, the children are
/// at `offset` (the side below `pos`) and `offset + 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KdNode {
    pub pos: f32,
    pub dim: u32,
    pub offset: u32,
    pub count: u32,
}

impl KdNode {
    pub fn leaf(offset: u32, count: u32) -> Self {
        Self { pos: 0.0, dim: 0, offset, count }
    }

    pub fn inner(dim: u32, pos: f32, offset: u32) -> Self {
        Self { pos, dim, offset, count: 0 }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.count > 0
    }

    #[inline]
    pub fn left(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.offset + 1
    }

    /// `(close, far)` children of an internal node as seen from `query`.
    #[inline]
    pub fn children_for<const D: usize>(&self, query: &Point<D>) -> (u32, u32) {
        if query[self.dim as usize] < self.pos {
            (self.left(), self.right())
        } else {
            (self.right(), self.left())
        }
    }
}

/// A k-d tree over data records of type `T` in `D` dimensions.
///
/// The tree is immutable once built; any number of queries may read it
/// concurrently.
#[derive(Clone, Debug)]
pub struct KdTree<T, const D: usize> {
    nodes: Vec<KdNode>,
    prim_ids: Vec<u32>,
    data: Vec<T>,
    parents: Vec<u32>,
    bounds: BoundingBox<D>,
    depth: usize,
}

impl<T: DataPoint<D>, const D: usize> KdTree<T, D> {
    /// Builds a tree by recursive median splits along the widest axis.
    pub fn build(data: Vec<T>, config: &BuildConfig) -> Result<Self> {
        config.validate()?;
        let count = data.len();
        if count == 0 {
            return Err(KdTreeError::EmptyInput);
        }
        if count > i32::MAX as usize {
            return Err(KdTreeError::TooManyPoints(count));
        }

        let points: Vec<Point<D>> = data.iter().map(|d| d.point()).collect();
        let bounds = BoundingBox::from_points(&points);

        let mut builder = Builder {
            points: &points,
            max_leaf_size: config.max_leaf_size,
            prim_ids: (0..count as u32).collect(),
            nodes: Vec::with_capacity(2 * count.div_ceil(config.max_leaf_size)),
            parents: Vec::with_capacity(2 * count.div_ceil(config.max_leaf_size)),
            depth: 0,
        };
        builder.nodes.push(KdNode::leaf(0, 0));
        builder.parents.push(NO_NODE);
        builder.build_node(0, 0, count, 0)?;

        let Builder { prim_ids, nodes, parents, depth, .. } = builder;
        debug!(
            "built kd-tree: {} points, {} nodes, depth {}, max leaf size {}",
            count,
            nodes.len(),
            depth,
            config.max_leaf_size
        );

        Ok(Self { nodes, prim_ids, data, parents, bounds, depth })
    }

    /// Assembles a tree from an externally built node layout after checking
    /// that every node is reachable exactly once, children and leaf ranges are
    /// in bounds, and the depth fits the traversal stack.
    ///
    /// `bounds` must contain every data point: the closest-corner traversals
    /// use it as a lower bound on the distance to anything in the tree.
    pub fn from_parts(
        nodes: Vec<KdNode>,
        prim_ids: Vec<u32>,
        data: Vec<T>,
        bounds: BoundingBox<D>,
    ) -> Result<Self> {
        if nodes.is_empty() || data.is_empty() {
            return Err(KdTreeError::EmptyInput);
        }
        if data.len() > i32::MAX as usize {
            return Err(KdTreeError::TooManyPoints(data.len()));
        }
        if let Some((index, &id)) = prim_ids
            .iter()
            .enumerate()
            .find(|&(_, &id)| id as usize >= data.len())
        {
            return Err(KdTreeError::InvalidPrimitive { index, id });
        }
        if let Some(id) = data.iter().position(|d| !bounds.contains(&d.point())) {
            return Err(KdTreeError::PointOutsideBounds { id });
        }

        let mut parents = vec![NO_NODE; nodes.len()];
        let mut seen = vec![false; nodes.len()];
        let mut depth = 0;
        let mut pending = vec![(0usize, 0usize)];
        seen[0] = true;

        while let Some((node_id, level)) = pending.pop() {
            let node = nodes[node_id];
            if node.is_leaf() {
                let end = node.offset as usize + node.count as usize;
                if end > prim_ids.len() {
                    return Err(KdTreeError::InvalidNode {
                        node: node_id,
                        reason: "leaf range outside the primitive array",
                    });
                }
                continue;
            }

            if node.dim as usize >= D {
                return Err(KdTreeError::InvalidNode {
                    node: node_id,
                    reason: "split axis out of range",
                });
            }
            if node.offset as usize + 1 >= nodes.len() {
                return Err(KdTreeError::InvalidNode {
                    node: node_id,
                    reason: "children outside the node array",
                });
            }
            if level + 1 > STACK_DEPTH {
                return Err(KdTreeError::TooDeep { depth: level + 1, max: STACK_DEPTH });
            }
            depth = depth.max(level + 1);

            for child in [node.left(), node.right()] {
                let child = child as usize;
                if seen[child] {
                    return Err(KdTreeError::InvalidNode {
                        node: child,
                        reason: "node reachable from more than one parent",
                    });
                }
                seen[child] = true;
                parents[child] = node_id as u32;
                pending.push((child, level + 1));
            }
        }

        if let Some(node) = seen.iter().position(|&s| !s) {
            return Err(KdTreeError::InvalidNode { node, reason: "node unreachable from the root" });
        }

        Ok(Self { nodes, prim_ids, data, parents, bounds, depth })
    }
}

impl<T, const D: usize> KdTree<T, D> {
    #[inline]
    pub fn node(&self, node_id: u32) -> KdNode {
        self.nodes[node_id as usize]
    }

    /// Parent of `node_id`, or [`NO_NODE`] for the root.
    #[inline]
    pub fn parent(&self, node_id: u32) -> u32 {
        self.parents[node_id as usize]
    }

    #[inline]
    pub fn prim_id(&self, i: u32) -> u32 {
        self.prim_ids[i as usize]
    }

    pub fn nodes(&self) -> &[KdNode] {
        &self.nodes
    }

    pub fn prim_ids(&self) -> &[u32] {
        &self.prim_ids
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn bounds(&self) -> &BoundingBox<D> {
        &self.bounds
    }

    /// Number of internal nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: both constructors reject empty input.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

struct Builder<'a, const D: usize> {
    points: &'a [Point<D>],
    max_leaf_size: usize,
    prim_ids: Vec<u32>,
    nodes: Vec<KdNode>,
    parents: Vec<u32>,
    depth: usize,
}

impl<const D: usize> Builder<'_, D> {
    fn build_node(&mut self, node_id: usize, start: usize, end: usize, level: usize) -> Result<()> {
        let count = end - start;

        // Leaf condition: small number of points
        if count <= self.max_leaf_size {
            self.nodes[node_id] = KdNode::leaf(start as u32, count as u32);
            return Ok(());
        }
        if level >= STACK_DEPTH {
            return Err(KdTreeError::TooDeep { depth: level + 1, max: STACK_DEPTH });
        }

        let mut range_bounds = BoundingBox::empty();
        for &id in &self.prim_ids[start..end] {
            range_bounds.grow(&self.points[id as usize]);
        }
        let axis = range_bounds.widest_axis();

        // Median split. Everything left of `mid` is <= pos, everything from
        // `mid` on is >= pos.
        let half = count / 2;
        let mid = start + half;
        let points = self.points;
        self.prim_ids[start..end].select_nth_unstable_by(half, |&a, &b| {
            points[a as usize][axis]
                .partial_cmp(&points[b as usize][axis])
                .unwrap_or(Ordering::Equal)
        });
        let pos = points[self.prim_ids[mid] as usize][axis];

        let offset = self.nodes.len();
        self.nodes.push(KdNode::leaf(0, 0));
        self.nodes.push(KdNode::leaf(0, 0));
        self.parents.push(node_id as u32);
        self.parents.push(node_id as u32);
        self.nodes[node_id] = KdNode::inner(axis as u32, pos, offset as u32);
        self.depth = self.depth.max(level + 1);

        self.build_node(offset, start, mid, level + 1)?;
        self.build_node(offset + 1, mid, end, level + 1)
    }
}
