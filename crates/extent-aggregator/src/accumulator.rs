//! The extent accumulator and its state machine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use stac_common::{BandSet, BoundingBox, ItemMetadata, TemporalInterval};

use crate::error::AggregateError;

/// Running union of spatial, temporal, and band metadata.
#[derive(Debug, Clone, PartialEq)]
struct RunningExtent {
    spatial: BoundingBox,
    temporal: TemporalInterval,
    bands: BandSet,
    item_count: u64,
}

/// Accumulator states.
///
/// `fold` is legal in `Empty` and `Accumulating`; `finalize` transitions
/// `Accumulating` to `Finalized`, which is terminal and read-only.
#[derive(Debug, Clone, PartialEq)]
enum State {
    Empty,
    Accumulating(RunningExtent),
    Finalized(RunningExtent),
}

/// Folds per-granule metadata into a collection-level extent.
///
/// Spatial and temporal union are commutative and associative, so granules
/// may be folded in any order, and partial accumulators built over
/// partitions of the input can be combined with [`ExtentAccumulator::merge`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtentAccumulator {
    state: State,
}

impl ExtentAccumulator {
    /// Create an empty accumulator (the fold identity).
    pub fn new() -> Self {
        Self { state: State::Empty }
    }

    /// Number of granules folded so far.
    pub fn item_count(&self) -> u64 {
        match &self.state {
            State::Empty => 0,
            State::Accumulating(r) | State::Finalized(r) => r.item_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, State::Finalized(_))
    }

    /// Fold one granule into the running extent.
    ///
    /// Validates the granule's extents first: non-finite or inverted
    /// spatial bounds, inverted intervals, and empty band lists are all
    /// rejected before any state is touched, so a failed fold leaves the
    /// accumulator unchanged.
    pub fn fold(&mut self, item: &ItemMetadata) -> Result<(), AggregateError> {
        validate_item(item)?;

        match &mut self.state {
            State::Finalized(_) => Err(AggregateError::Finalized),
            State::Empty => {
                debug!(item = %item.id, "Adopting first granule extent");
                self.state = State::Accumulating(RunningExtent {
                    spatial: item.spatial,
                    temporal: item.temporal,
                    bands: item.bands.clone(),
                    item_count: 1,
                });
                Ok(())
            }
            State::Accumulating(running) => {
                if running.bands != item.bands {
                    return Err(AggregateError::BandMismatch {
                        item_id: item.id.clone(),
                        expected: running.bands.to_vec(),
                        found: item.bands.to_vec(),
                    });
                }

                running.spatial = running.spatial.union(&item.spatial);
                running.temporal = running.temporal.union(&item.temporal);
                running.item_count += 1;
                Ok(())
            }
        }
    }

    /// Merge another accumulator into this one, consuming it.
    ///
    /// A partial accumulator is treated like a single pre-validated
    /// granule: same union rule, same strict band equality. Merging an
    /// empty accumulator is a no-op; merging into an empty one adopts the
    /// other's state.
    pub fn merge(&mut self, other: ExtentAccumulator) -> Result<(), AggregateError> {
        let other_running = match other.state {
            State::Empty => return Ok(()),
            State::Finalized(_) => return Err(AggregateError::Finalized),
            State::Accumulating(r) => r,
        };

        match &mut self.state {
            State::Finalized(_) => Err(AggregateError::Finalized),
            State::Empty => {
                self.state = State::Accumulating(other_running);
                Ok(())
            }
            State::Accumulating(running) => {
                if running.bands != other_running.bands {
                    return Err(AggregateError::BandMismatch {
                        item_id: "<partial accumulator>".to_string(),
                        expected: running.bands.to_vec(),
                        found: other_running.bands.to_vec(),
                    });
                }

                running.spatial = running.spatial.union(&other_running.spatial);
                running.temporal = running.temporal.union(&other_running.temporal);
                running.item_count += other_running.item_count;
                Ok(())
            }
        }
    }

    /// Finalize the accumulator and return an owned snapshot.
    ///
    /// The snapshot is copied out, so later calls against this
    /// accumulator can never alias or mutate a previously returned
    /// `CollectionExtent`. After finalization any further `fold` or
    /// `merge` fails with [`AggregateError::Finalized`].
    pub fn finalize(&mut self) -> Result<CollectionExtent, AggregateError> {
        match std::mem::replace(&mut self.state, State::Empty) {
            State::Empty => Err(AggregateError::EmptyCollection),
            State::Finalized(running) => {
                // Idempotent: re-finalizing returns the same snapshot.
                let snapshot = CollectionExtent::from_running(&running);
                self.state = State::Finalized(running);
                Ok(snapshot)
            }
            State::Accumulating(running) => {
                debug!(
                    items = running.item_count,
                    bands = %running.bands,
                    "Finalizing collection extent"
                );
                let snapshot = CollectionExtent::from_running(&running);
                self.state = State::Finalized(running);
                Ok(snapshot)
            }
        }
    }
}

impl Default for ExtentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_item(item: &ItemMetadata) -> Result<(), AggregateError> {
    if !item.spatial.is_well_formed() {
        let reason = if !item.spatial.to_vec().iter().all(|v| v.is_finite()) {
            "non-finite bound".to_string()
        } else {
            "min bound exceeds max bound".to_string()
        };
        return Err(AggregateError::MalformedExtent {
            item_id: item.id.clone(),
            reason,
        });
    }

    if !item.temporal.is_well_formed() {
        return Err(AggregateError::MalformedInterval {
            item_id: item.id.clone(),
        });
    }

    if item.bands.is_empty() {
        return Err(AggregateError::EmptyBands {
            item_id: item.id.clone(),
        });
    }

    Ok(())
}

/// Finalized collection-level extent: the union of every folded granule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionExtent {
    /// Unioned spatial bounding box.
    pub spatial: BoundingBox,

    /// Unioned temporal interval.
    pub temporal: TemporalInterval,

    /// Band sequence, validated identical across all granules.
    pub bands: BandSet,

    /// Number of granules contributing to this extent.
    pub item_count: u64,
}

impl CollectionExtent {
    fn from_running(running: &RunningExtent) -> Self {
        Self {
            spatial: running.spatial,
            temporal: running.temporal,
            bands: running.bands.clone(),
            item_count: running.item_count,
        }
    }
}
