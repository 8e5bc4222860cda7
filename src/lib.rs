//! # kdknn
//!
//! `kdknn` answers exact k-nearest-neighbor queries against an immutable k-d
//! tree, with the per-query code shaped for massively parallel execution: no
//! recursion, no heap allocation, and a fixed 30-entry traversal stack. Each
//! query is an independent task; a batch of queries runs on rayon with one
//! task per query.
//!
//! ## Features
//!
//! - **Two candidate lists**: [`FixedCandidateList`] (sorted array, cheapest
//!   for small k) and [`HeapCandidateList`] (max-heap, O(log k) inserts),
//!   interchangeable through the [`CandidateList`] trait.
//! - **Four traversals**: plane-distance or closest-corner pruning, each with a
//!   stack-based and a stack-free form, picked statically via [`Traversal`].
//! - **Payload-carrying trees**: any record implementing [`DataPoint`] can be
//!   stored in a [`KdTree`].
//! - **Optional cost counter**: the `stats` cargo feature enables a global
//!   node/candidate counter in [`stats`].
//!
//! ## Example
//!
//! ```
//! use kdknn::{BuildConfig, CandidateList, ClosestCorner, FixedCandidateList, KdTree, Traversal};
//!
//! let points = vec![[0.0, 0.0], [5.0, 5.0], [1.0, 1.0], [9.0, 0.0], [2.0, 3.0]];
//! let tree: KdTree<[f32; 2], 2> = KdTree::build(points, &BuildConfig::default()).unwrap();
//!
//! let mut list = FixedCandidateList::<2>::new(f32::INFINITY);
//! let radius2 = ClosestCorner::knn(&mut list, &[0.0, 0.0], &tree);
//!
//! assert_eq!(list.point_id(0), 0);
//! assert_eq!(list.point_id(1), 2);
//! assert_eq!(radius2, 2.0);
//! ```
//!
//! ## Main Interface
//!
//! Build a [`KdTree`], create a candidate list with a cutoff radius, and run
//! [`Traversal::knn`] for the chosen strategy, or hand a slice of queries to
//! [`knn_batch`].

mod batch;
mod bounds;
mod candidates;
mod config;
mod error;
mod point;
mod stack;
pub mod stats;
mod traverse;
mod tree;

pub use batch::knn_batch;
pub use bounds::BoundingBox;
pub use candidates::CandidateList;
pub use candidates::EMPTY_ID;
pub use candidates::FixedCandidateList;
pub use candidates::HeapCandidateList;
pub use candidates::Neighbor;
pub use candidates::{decode_dist2, decode_point_id, encode};
pub use config::BuildConfig;
pub use config::QueryConfig;
pub use error::KdTreeError;
pub use point::DataPoint;
pub use point::Point;
pub use point::{sqr, sqr_distance};
pub use stack::STACK_DEPTH;
pub use traverse::ClosestCorner;
pub use traverse::ClosestCornerStackFree;
pub use traverse::DefaultTraversal;
pub use traverse::StackBased;
pub use traverse::StackFree;
pub use traverse::Traversal;
pub use traverse::TraversalObserver;
pub use traverse::VisitCounter;
pub use traverse::{closest_point, knn};
pub use tree::KdNode;
pub use tree::KdTree;
pub use tree::NO_NODE;
