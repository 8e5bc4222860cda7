use super::{Traversal, TraversalObserver, enter_node, scan_leaf};
use crate::candidates::CandidateList;
use crate::point::{DataPoint, Point, sqr_distance};
use crate::stack::Stack;
use crate::tree::KdTree;

/// Stack-based traversal that prunes by the distance to each subtree's
/// bounding box instead of to the splitting plane.
///
/// The traversal tracks the closest point on the current subtree's box. It
/// starts as the query projected onto the world bounds; descending into a far
/// child clamps the split coordinate to the split position, descending into a
/// close child leaves it unchanged. Every coordinate contributes to the bound,
/// not just the last split axis, so whole subtrees off to the side of the
/// query are rejected that plane pruning would still enter.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosestCorner;

#[derive(Clone, Copy)]
struct StackEntry<const D: usize> {
    node_id: u32,
    closest_corner: Point<D>,
}

impl Traversal for ClosestCorner {
    const NAME: &'static str = "closest-corner";

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

        let mut closest_corner = tree.bounds().project(query);
        if sqr_distance(query, &closest_corner) > cull_dist {
            return;
        }

        let mut stack: Stack<StackEntry<D>> =
            Stack::new(StackEntry { node_id: 0, closest_corner });

        let mut node_id = 0;
        loop {
            let leaf = loop {
                enter_node(node_id, observer);
                let node = tree.node(node_id);
                if node.is_leaf() {
                    break node;
                }
                let (close_child, far_child) = node.children_for(query);

                let mut far_side_corner = closest_corner;
                far_side_corner[node.dim as usize] = node.pos;
                if sqr_distance(&far_side_corner, query) < cull_dist {
                    stack.push(StackEntry { node_id: far_child, closest_corner: far_side_corner });
                }
                node_id = close_child;
            };

            cull_dist = scan_leaf(list, query, tree, &leaf, observer);

            node_id = loop {
                let Some(entry) = stack.pop() else {
                    return;
                };
                closest_corner = entry.closest_corner;
                if sqr_distance(&closest_corner, query) >= cull_dist {
                    continue;
                }
                break entry.node_id;
            };
        }
    }
}
