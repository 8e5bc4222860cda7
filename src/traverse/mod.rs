//! Tree traversals that feed a [`CandidateList`].
//!
//! Every traversal is a zero-sized type implementing [`Traversal`], so the
//! strategy is picked at compile time and costs nothing at run time:
//!
//! | strategy                   | pruning bound             | ancestor state        |
//! |----------------------------|---------------------------|-----------------------|
//! | [`StackBased`]             | distance to split plane   | 30-entry stack        |
//! | [`StackFree`]              | distance to split plane   | parent links          |
//! | [`ClosestCorner`]          | distance to subtree box   | 30-entry stack        |
//! | [`ClosestCornerStackFree`] | distance to subtree box   | parent links          |
//!
//! All four visit children close-side first and return the same neighbors.
//! The closest-corner variants test a tighter bound and skip more subtrees at
//! the price of more arithmetic per node (and, with a stack, larger entries).
//! The stack-free variants re-derive what the stack would hold, which trades
//! a few extra node reads for keeping almost nothing per task.
//!
//! None of the traversals recurse or allocate.

mod closest_corner;
mod closest_corner_stack_free;
mod stack_based;
mod stack_free;

pub use closest_corner::ClosestCorner;
pub use closest_corner_stack_free::ClosestCornerStackFree;
pub use stack_based::StackBased;
pub use stack_free::StackFree;

use crate::candidates::{CandidateList, FixedCandidateList, Neighbor};
use crate::point::{DataPoint, Point, sqr_distance};
use crate::stats;
use crate::tree::{KdNode, KdTree};

/// The traversal used when none is named.
pub type DefaultTraversal = StackBased;

/// Receives the work a single query performs.
///
/// The unit type `()` ignores everything and optimizes away.
pub trait TraversalObserver {
    /// Called once per node the traversal enters.
    #[inline]
    fn node(&mut self, _node_id: u32) {}

    /// Called once per point whose distance to the query is computed.
    #[inline]
    fn candidate(&mut self, _prim_id: u32) {}
}

impl TraversalObserver for () {}

/// Observer that counts visited nodes and tested candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisitCounter {
    pub nodes: u64,
    pub candidates: u64,
}

impl TraversalObserver for VisitCounter {
    #[inline]
    fn node(&mut self, _node_id: u32) {
        self.nodes += 1;
    }

    #[inline]
    fn candidate(&mut self, _prim_id: u32) {
        self.candidates += 1;
    }
}

/// A kNN traversal strategy.
pub trait Traversal {
    /// Short name used in log output.
    const NAME: &'static str;

    /// Pushes every point of `tree` that can still make the list into `list`
    /// and reports each visited node and tested point to `observer`.
    ///
    /// The list's current cull radius is the starting search radius, so a
    /// list that already holds candidates continues where it left off.
    fn traverse<C, T, O, const D: usize>(
        list: &mut C,
        query: &Point<D>,
        tree: &KdTree<T, D>,
        observer: &mut O,
    ) where
        C: CandidateList,
        T: DataPoint<D>,
        O: TraversalObserver;

    /// Runs the traversal and returns the final cull radius: the squared
    /// distance to the k-th neighbor, or the initial cutoff squared if fewer
    /// than k points were found within it.
    ///
    /// Subtrees whose bound equals the cull radius are skipped. Among points
    /// tied at exactly the k-th distance, which ones are kept therefore
    /// depends on visit order, not only on id. The multiset of distances is
    /// exact.
    #[inline]
    fn knn<C, T, const D: usize>(list: &mut C, query: &Point<D>, tree: &KdTree<T, D>) -> f32
    where
        C: CandidateList,
        T: DataPoint<D>,
    {
        Self::traverse(list, query, tree, &mut ());
        list.return_value()
    }

    /// Like [`Traversal::knn`], reporting the work done to `observer`.
    #[inline]
    fn knn_observed<C, T, O, const D: usize>(
        list: &mut C,
        query: &Point<D>,
        tree: &KdTree<T, D>,
        observer: &mut O,
    ) -> f32
    where
        C: CandidateList,
        T: DataPoint<D>,
        O: TraversalObserver,
    {
        Self::traverse(list, query, tree, observer);
        list.return_value()
    }
}

/// Runs a kNN query with the [`DefaultTraversal`].
#[inline]
pub fn knn<C, T, const D: usize>(list: &mut C, query: &Point<D>, tree: &KdTree<T, D>) -> f32
where
    C: CandidateList,
    T: DataPoint<D>,
{
    DefaultTraversal::knn(list, query, tree)
}

/// The single nearest point within `cutoff_radius`, if any.
pub fn closest_point<T, const D: usize>(
    tree: &KdTree<T, D>,
    query: &Point<D>,
    cutoff_radius: f32,
) -> Option<Neighbor>
where
    T: DataPoint<D>,
{
    let mut list = FixedCandidateList::<1>::new(cutoff_radius);
    DefaultTraversal::knn(&mut list, query, tree);
    let id = list.point_id(0);
    (id >= 0).then(|| Neighbor {
        id: id as usize,
        dist2: list.dist2(0),
    })
}

#[inline]
fn enter_node<O: TraversalObserver>(node_id: u32, observer: &mut O) {
    stats::record(1);
    observer.node(node_id);
}

/// Tests every point of a leaf and returns the resulting cull radius.
#[inline]
fn scan_leaf<C, T, O, const D: usize>(
    list: &mut C,
    query: &Point<D>,
    tree: &KdTree<T, D>,
    leaf: &KdNode,
    observer: &mut O,
) -> f32
where
    C: CandidateList,
    T: DataPoint<D>,
    O: TraversalObserver,
{
    let mut cull_dist = list.max_radius2();
    for i in leaf.offset..leaf.offset + leaf.count {
        let prim_id = tree.prim_id(i);
        stats::record(1);
        observer.candidate(prim_id);
        let sqr_dist = sqr_distance(&tree.data()[prim_id as usize].point(), query);
        cull_dist = list.process_candidate(prim_id as i32, sqr_dist);
    }
    cull_dist
}
