//! Error types for extent aggregation.

use thiserror::Error;

/// Errors that can occur while folding granule metadata into a
/// collection extent.
///
/// All variants are surfaced synchronously to the caller; a collection
/// with a wrong extent is worse than a failed build, so nothing here is
/// recoverable at this layer.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// Band sequences differ across granules, either in identifiers or
    /// in order. Strict policy: downstream consumers index assets
    /// positionally by band order, so this is never reconciled silently.
    #[error("Band set mismatch: collection has {expected:?}, granule '{item_id}' has {found:?}")]
    BandMismatch {
        item_id: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// `finalize` was called before any granule was folded. A STAC
    /// collection must contain at least one item.
    #[error("Cannot finalize an empty accumulator: no granules were folded")]
    EmptyCollection,

    /// A fold or merge was attempted after `finalize`. Re-folding would
    /// silently invalidate an already-emitted collection document.
    #[error("Accumulator is finalized; no further granules may be folded")]
    Finalized,

    /// Non-finite or inverted spatial bounds, rejected at fold time
    /// rather than propagating NaNs downstream.
    #[error("Malformed spatial extent for granule '{item_id}': {reason}")]
    MalformedExtent { item_id: String, reason: String },

    /// Temporal interval with start after end.
    #[error("Malformed temporal interval for granule '{item_id}': start is after end")]
    MalformedInterval { item_id: String },

    /// A granule carried no bands at all.
    #[error("Granule '{item_id}' has an empty band set")]
    EmptyBands { item_id: String },
}
