use crate::error::{KdTreeError, Result};

/// Parameters for [`KdTree::build`](crate::KdTree::build).
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Ranges of at most this many points become leaves.
    pub max_leaf_size: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { max_leaf_size: 8 }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_leaf_size == 0 {
            return Err(KdTreeError::InvalidConfig(
                "max_leaf_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for [`knn_batch`](crate::knn_batch).
#[derive(Clone, Debug)]
pub struct QueryConfig {
    /// Neighbors farther away than this are never reported.
    pub cutoff_radius: f32,
    /// Run one rayon task per query instead of a sequential loop.
    pub parallel: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            cutoff_radius: f32::INFINITY,
            parallel: true,
        }
    }
}

impl QueryConfig {
    pub fn with_cutoff(cutoff_radius: f32) -> Self {
        Self {
            cutoff_radius,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cutoff_radius.is_nan() || self.cutoff_radius < 0.0 {
            return Err(KdTreeError::InvalidConfig(format!(
                "cutoff_radius must be a non-negative number, got {}",
                self.cutoff_radius
            )));
        }
        Ok(())
    }
}
