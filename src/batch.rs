use std::time::Instant;

use log::debug;
use rayon::prelude::*;

use crate::candidates::CandidateList;
use crate::config::QueryConfig;
use crate::error::Result;
use crate::point::{DataPoint, Point};
use crate::traverse::Traversal;
use crate::tree::KdTree;

/// Answers every query independently, one task per query.
///
/// Each task builds a fresh candidate list with the configured cutoff, runs
/// traversal `S` against the shared tree and hands the list back. Results are
/// returned in query order. Tasks share nothing mutable, so the output does
/// not depend on how rayon schedules them.
pub fn knn_batch<S, C, T, const D: usize>(
    tree: &KdTree<T, D>,
    queries: &[Point<D>],
    config: &QueryConfig,
) -> Result<Vec<C>>
where
    S: Traversal,
    C: CandidateList + Send,
    T: DataPoint<D> + Sync,
{
    config.validate()?;
    let start = Instant::now();
    let cutoff_radius = config.cutoff_radius;

    let run_query = |query: &Point<D>| {
        let mut list = C::new(cutoff_radius);
        S::knn(&mut list, query, tree);
        list
    };

    let results: Vec<C> = if config.parallel {
        queries.par_iter().map(run_query).collect()
    } else {
        queries.iter().map(run_query).collect()
    };

    debug!(
        "knn_batch: {} queries, k = {}, {} traversal, {} points, {:?}",
        queries.len(),
        results.first().map_or(0, |list| list.entries().len()),
        S::NAME,
        tree.len(),
        start.elapsed()
    );
    Ok(results)
}
