use super::{Traversal, TraversalObserver, enter_node, scan_leaf};
use crate::candidates::CandidateList;
use crate::point::{DataPoint, Point, sqr};
use crate::tree::{KdTree, NO_NODE};

/// Plane-pruning traversal without a stack.
///
/// The walk keeps only the current node and the node it came from. Arriving
/// from the parent means descend into the close child; returning from the
/// close child means test the far child; returning from the far child means
/// climb further. Since the cull radius only shrinks, testing the far child
/// on the way back up gives the same decision the stack-based traversal makes
/// when it pops the deferred entry, and nodes are entered in the same order.
#[derive(Clone, Copy, Debug, Default)]
pub struct StackFree;

impl Traversal for StackFree {
    const NAME: &'static str = "stack-free";

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

        let mut prev = NO_NODE;
        let mut curr = 0;
        while curr != NO_NODE {
            let node = tree.node(curr);
            let parent = tree.parent(curr);

            let next = if node.is_leaf() {
                enter_node(curr, observer);
                cull_dist = scan_leaf(list, query, tree, &node, observer);
                parent
            } else {
                let (close_child, far_child) = node.children_for(query);
                if prev == parent {
                    enter_node(curr, observer);
                    close_child
                } else if prev == close_child
                    && sqr(query[node.dim as usize] - node.pos) < cull_dist
                {
                    far_child
                } else {
                    parent
                }
            };

            prev = curr;
            curr = next;
        }
    }
}
