//! Error types for tree construction and query configuration.
//!
//! Queries themselves never fail: unfilled result slots carry a negative id
//! instead. Errors only arise when a tree or configuration is set up.

use std::fmt;

/// Errors that can occur while building a tree or validating its inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum KdTreeError {
    /// A tree needs at least one point.
    EmptyInput,

    /// More points than a non-negative `i32` point id can address.
    TooManyPoints(usize),

    /// The tree would be deeper than the fixed traversal stack can handle.
    TooDeep { depth: usize, max: usize },

    /// A node in a tree assembled from raw parts breaks the layout rules.
    InvalidNode { node: usize, reason: &'static str },

    /// An entry of the primitive permutation points outside the data array.
    InvalidPrimitive { index: usize, id: u32 },

    /// A data point lies outside the world bounds given for the tree.
    PointOutsideBounds { id: usize },

    /// A configuration value was rejected.
    InvalidConfig(String),
}

impl fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KdTreeError::EmptyInput => write!(f, "cannot build a tree from zero points"),
            KdTreeError::TooManyPoints(n) => {
                write!(f, "too many points: {} exceeds the id range of {}", n, i32::MAX)
            }
            KdTreeError::TooDeep { depth, max } => {
                write!(f, "tree depth {} exceeds the traversal stack depth {}", depth, max)
            }
            KdTreeError::InvalidNode { node, reason } => {
                write!(f, "invalid node {}: {}", node, reason)
            }
            KdTreeError::InvalidPrimitive { index, id } => {
                write!(f, "primitive {} refers to missing data item {}", index, id)
            }
            KdTreeError::PointOutsideBounds { id } => {
                write!(f, "data item {} lies outside the world bounds", id)
            }
            KdTreeError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for KdTreeError {}

pub type Result<T> = std::result::Result<T, KdTreeError>;
