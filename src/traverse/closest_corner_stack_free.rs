use super::{Traversal, TraversalObserver, enter_node, scan_leaf};
use crate::bounds::clamp;
use crate::candidates::CandidateList;
use crate::point::{DataPoint, Point, sqr_distance};
use crate::tree::{KdTree, NO_NODE};

/// Closest-corner pruning with the stack-free walk of [`StackFree`].
///
/// Going down, the closest corner is updated exactly as in [`ClosestCorner`].
/// Climbing out of a far child must undo the clamp made when entering it. The
/// overwritten coordinate is recovered from the ancestors: it is the split
/// position of the nearest ancestor above that was also entered from its far
/// side along the same axis, or the world-bounds projection if there is none.
///
/// [`StackFree`]: super::StackFree
/// [`ClosestCorner`]: super::ClosestCorner
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosestCornerStackFree;

impl Traversal for ClosestCornerStackFree {
    const NAME: &'static str = "closest-corner-stack-free";

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
                } else if prev == close_child {
                    let mut far_side_corner = closest_corner;
                    far_side_corner[node.dim as usize] = node.pos;
                    if sqr_distance(&far_side_corner, query) < cull_dist {
                        closest_corner = far_side_corner;
                        far_child
                    } else {
                        parent
                    }
                } else {
                    parent
                }
            };

            if next == parent && parent != NO_NODE {
                restore_corner(tree, query, curr, parent, &mut closest_corner);
            }
            prev = curr;
            curr = next;
        }
    }
}

/// Undoes the corner clamp made when `child` was entered from its far side.
#[inline]
fn restore_corner<T, const D: usize>(
    tree: &KdTree<T, D>,
    query: &Point<D>,
    child: u32,
    parent: u32,
    closest_corner: &mut Point<D>,
) {
    let parent_node = tree.node(parent);
    let (_, far_child) = parent_node.children_for(query);
    if child != far_child {
        return;
    }
    let axis = parent_node.dim as usize;
    closest_corner[axis] = corner_coord_at(tree, query, parent, axis);
}

/// The `axis` coordinate of the closest corner while inside `node_id`.
fn corner_coord_at<T, const D: usize>(
    tree: &KdTree<T, D>,
    query: &Point<D>,
    node_id: u32,
    axis: usize,
) -> f32 {
    let mut child = node_id;
    let mut parent = tree.parent(child);
    while parent != NO_NODE {
        let parent_node = tree.node(parent);
        if parent_node.dim as usize == axis {
            let (_, far_child) = parent_node.children_for(query);
            if child == far_child {
                return parent_node.pos;
            }
        }
        child = parent;
        parent = tree.parent(child);
    }
    let bounds = tree.bounds();
    clamp(query[axis], bounds.min[axis], bounds.max[axis])
}
