use super::{Traversal, TraversalObserver, enter_node, scan_leaf};
use crate::candidates::CandidateList;
use crate::point::{DataPoint, Point, sqr};
use crate::stack::Stack;
use crate::tree::KdTree;

/// Depth-first traversal that defers far children on a fixed stack and prunes
/// them by their squared distance to the splitting plane.
#[derive(Clone, Copy, Debug, Default)]
pub struct StackBased;

#[derive(Clone, Copy)]
struct StackEntry {
    node_id: u32,
    sqr_dist: f32,
}

impl Traversal for StackBased {
    const NAME: &'static str = "stack-based";

    fn traverse<C, T, O, const D: usize>(
        list: &mut C,
        query: &Point<D>,
        tree: &KdTree<T, D>,
        observer: &mut O,
    ) where
        C: CandidateList,
        T: DataPoint<D>,
        O: TraversalObserver,
    {
        let mut cull_dist = list.initial_cull_dist2();
        let mut stack: Stack<StackEntry> = Stack::new(StackEntry { node_id: 0, sqr_dist: 0.0 });

        let mut node_id = 0;
        loop {
            let leaf = loop {
                enter_node(node_id, observer);
                let node = tree.node(node_id);
                if node.is_leaf() {
                    break node;
                }
                let (close_child, far_child) = node.children_for(query);

                // Everything on the far side is at least this far away.
                let sqr_dist_to_plane = sqr(query[node.dim as usize] - node.pos);
                if sqr_dist_to_plane < cull_dist {
                    stack.push(StackEntry { node_id: far_child, sqr_dist: sqr_dist_to_plane });
                }
                node_id = close_child;
            };

            cull_dist = scan_leaf(list, query, tree, &leaf, observer);

            node_id = loop {
                let Some(entry) = stack.pop() else {
                    return;
                };
                if entry.sqr_dist >= cull_dist {
                    continue;
                }
                break entry.node_id;
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::{EMPTY_ID, FixedCandidateList};
    use crate::config::BuildConfig;
    use crate::traverse::VisitCounter;

    #[test]
    fn test_leaf_root_scans_all_points() {
        let tree: KdTree<Point<2>, 2> =
            KdTree::build(vec![[0.0, 0.0], [3.0, 4.0]], &BuildConfig::default()).unwrap();
        let mut list = FixedCandidateList::<3>::new(f32::INFINITY);
        let mut counter = VisitCounter::default();
        let r = StackBased::knn_observed(&mut list, &[0.0, 0.0], &tree, &mut counter);

        assert_eq!(r, f32::INFINITY);
        assert_eq!(list.point_id(0), 0);
        assert_eq!(list.dist2(1), 25.0);
        assert_eq!(list.point_id(2), EMPTY_ID);
        assert_eq!(counter, VisitCounter { nodes: 1, candidates: 2 });
    }

    #[test]
    fn test_far_side_is_skipped_when_plane_is_beyond_cutoff() {
        let points: Vec<Point<1>> = (0..16).map(|i| [i as f32]).collect();
        let tree: KdTree<Point<1>, 1> =
            KdTree::build(points, &BuildConfig { max_leaf_size: 1 }).unwrap();

        let mut list = FixedCandidateList::<1>::new(0.5);
        let mut counter = VisitCounter::default();
        StackBased::knn_observed(&mut list, &[0.0], &tree, &mut counter);

        assert_eq!(list.point_id(0), 0);
        // Only the leftmost root-to-leaf path is entered.
        assert_eq!(counter.nodes as usize, tree.depth() + 1);
        assert_eq!(counter.candidates, 1);
    }
}
