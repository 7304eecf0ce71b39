#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-constituency, per-epoch vote-share record types.
//!
//! An [`ElectoralRecord`] is one constituency's result in one historical
//! election ([`Epoch`]). An [`ElectoralDataset`] bundles records with the
//! district table used for signal resolution and issue tagging. Datasets
//! deserialize from both the embedded TOML reference file and JSON feeds.

use std::collections::BTreeMap;

use election_signal_signal_models::Party;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A labelled historical election contributing a vote-share snapshot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Epoch {
    /// 2021 state assembly general election. Mandatory baseline.
    #[serde(rename = "E2021")]
    #[strum(serialize = "E2021")]
    E2021,
    /// 2024 federal election, assembly-segment level.
    #[serde(rename = "E2024")]
    #[strum(serialize = "E2024")]
    E2024,
    /// 2025 assembly by-election. Only present where one was held.
    #[serde(rename = "E2025_BYELECTION")]
    #[strum(serialize = "E2025_BYELECTION")]
    E2025Byelection,
}

impl Epoch {
    /// Calendar year of the election.
    #[must_use]
    pub const fn year(self) -> u16 {
        match self {
            Self::E2021 => 2021,
            Self::E2024 => 2024,
            Self::E2025Byelection => 2025,
        }
    }

    /// Returns all variants in chronological order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::E2021, Self::E2024, Self::E2025Byelection]
    }
}

/// One constituency's result in one epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectoralRecord {
    /// Official constituency number.
    pub constituency_id: u32,
    /// Display name (e.g., "Bhabanipur").
    pub constituency_name: String,
    /// District the constituency belongs to.
    pub district: String,
    /// Which election this record describes.
    pub epoch: Epoch,
    /// Vote-share percentage per party. Need not sum to 100; the rest went
    /// to other parties and independents.
    pub party_share: BTreeMap<Party, f64>,
    /// Party that won (or led, for federal assembly segments).
    pub winner: Party,
    /// Winner share minus runner-up share, in percentage points.
    pub margin: f64,
    /// Total valid votes polled.
    pub total_votes: u64,
}

impl ElectoralRecord {
    /// Vote share of `party`, or `0.0` if the record does not list it.
    #[must_use]
    pub fn share(&self, party: Party) -> f64 {
        self.share_opt(party).unwrap_or(0.0)
    }

    /// Vote share of `party`, if the record lists it.
    #[must_use]
    pub fn share_opt(&self, party: Party) -> Option<f64> {
        self.party_share.get(&party).copied()
    }

    /// Returns the registry entry this record belongs to.
    #[must_use]
    pub fn constituency(&self) -> ConstituencyInfo {
        ConstituencyInfo {
            id: self.constituency_id,
            name: self.constituency_name.clone(),
            district: self.district.clone(),
        }
    }
}

/// A constituency registry entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstituencyInfo {
    /// Official constituency number.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// District name.
    pub district: String,
}

/// A district with its text-matching aliases and standing local issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictInfo {
    /// District name as used in [`ElectoralRecord::district`].
    pub name: String,
    /// Keywords that attribute a signal to this district (place names,
    /// transliterations, native-script spellings).
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Issues attached to every constituency in the district.
    #[serde(default)]
    pub issues: Vec<String>,
}

/// A complete electoral reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectoralDataset {
    /// State the dataset covers (e.g., "West Bengal").
    pub state: String,
    /// Number of seats in the full assembly. Used for seat projection.
    pub total_seats: u32,
    /// District table.
    #[serde(default)]
    pub districts: Vec<DistrictInfo>,
    /// All records, in any order.
    #[serde(default)]
    pub records: Vec<ElectoralRecord>,
}
