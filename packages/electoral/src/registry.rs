//! Embedded reference dataset.
//!
//! The West Bengal sample in `packages/electoral/data/` is baked into the
//! binary at compile time via [`include_str!`]. Callers with their own
//! data build an [`ElectoralRecordStore`] from a parsed dataset instead.

use election_signal_electoral_models::ElectoralDataset;

use crate::{ElectoralRecordStore, parse_dataset_toml};

/// Reference dataset embedded at compile time.
const REFERENCE_TOML: &str = include_str!("../data/west_bengal.toml");

/// Number of constituencies in the reference dataset (used in tests).
#[cfg(test)]
const EXPECTED_CONSTITUENCY_COUNT: usize = 13;

/// Returns the embedded reference dataset.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed. The file is a compile-time
/// constant, so a failure here is a development error caught by tests.
#[must_use]
pub fn reference_dataset() -> ElectoralDataset {
    parse_dataset_toml(REFERENCE_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse west_bengal.toml: {e}"))
}

/// Returns a store built from the embedded reference dataset.
///
/// # Panics
///
/// Panics if the embedded dataset is malformed or violates the store's
/// invariants.
#[must_use]
pub fn reference_store() -> ElectoralRecordStore {
    ElectoralRecordStore::from_dataset(reference_dataset())
        .unwrap_or_else(|e| panic!("Invalid reference dataset: {e}"))
}
