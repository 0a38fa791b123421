//! Parallel partial aggregation.
//!
//! The fold is associative and commutative, so the granule list can be
//! partitioned across worker threads, folded into independent partial
//! accumulators, and merged pairwise. Useful when granule metadata
//! extraction upstream is the real bottleneck; the fold itself is cheap.

use rayon::prelude::*;

use stac_common::ItemMetadata;

use crate::accumulator::ExtentAccumulator;
use crate::error::AggregateError;

/// Aggregate a granule list using rayon's fold/reduce.
///
/// Each worker owns its partial accumulator exclusively; ownership is
/// consumed at merge time. The result is identical to a sequential fold
/// in any order. Returns the combined accumulator, not yet finalized.
pub fn aggregate_parallel(items: &[ItemMetadata]) -> Result<ExtentAccumulator, AggregateError> {
    items
        .par_iter()
        .try_fold(ExtentAccumulator::new, |mut acc, item| {
            acc.fold(item)?;
            Ok(acc)
        })
        .try_reduce(ExtentAccumulator::new, |mut left, right| {
            left.merge(right)?;
            Ok(left)
        })
}
