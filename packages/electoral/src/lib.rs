#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Read-only store of per-constituency electoral history.
//!
//! [`ElectoralRecordStore`] validates a dataset once (every constituency
//! needs exactly one 2021 baseline) and fills in missing 2024 records so
//! that prediction runs never have to handle an incomplete history.

pub mod registry;
pub mod store;

use election_signal_electoral_models::{ElectoralDataset, Epoch};
use thiserror::Error;

pub use store::{ConstituencyHistory, ElectoralRecordStore, SyntheticSwing};

/// Errors that can occur while loading or validating electoral data.
#[derive(Debug, Error)]
pub enum ElectoralError {
    /// A constituency has later records but no 2021 baseline.
    #[error("Constituency {constituency_id} ({name}) has no E2021 baseline record")]
    MissingBaseline {
        /// Constituency identifier.
        constituency_id: u32,
        /// Constituency display name.
        name: String,
    },

    /// Two records share the same constituency and epoch.
    #[error("Duplicate {epoch} record for constituency {constituency_id}")]
    DuplicateRecord {
        /// Constituency identifier.
        constituency_id: u32,
        /// The repeated epoch.
        epoch: Epoch,
    },

    /// A record names a district missing from the district table.
    #[error("Constituency {constituency_id} references unknown district '{district}'")]
    UnknownDistrict {
        /// Constituency identifier.
        constituency_id: u32,
        /// The undeclared district name.
        district: String,
    },

    /// Records of one constituency disagree on its name or district.
    #[error("Inconsistent records for constituency {constituency_id}: {message}")]
    InconsistentConstituency {
        /// Constituency identifier.
        constituency_id: u32,
        /// Description of the disagreement.
        message: String,
    },

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses an [`ElectoralDataset`] from TOML.
///
/// # Errors
///
/// Returns [`ElectoralError::Toml`] if the document is malformed.
pub fn parse_dataset_toml(toml_str: &str) -> Result<ElectoralDataset, ElectoralError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Parses an [`ElectoralDataset`] from a JSON feed.
///
/// # Errors
///
/// Returns [`ElectoralError::Json`] if the document is malformed.
pub fn parse_dataset_json(json_str: &str) -> Result<ElectoralDataset, ElectoralError> {
    Ok(serde_json::from_str(json_str)?)
}
