//! Validated, read-only electoral history keyed by constituency.

use std::collections::BTreeMap;

use election_signal_electoral_models::{
    ConstituencyInfo, DistrictInfo, ElectoralDataset, ElectoralRecord, Epoch,
};
use election_signal_signal_models::Party;

use crate::ElectoralError;

/// Default swing (percentage points) applied when a 2024 record has to be
/// synthesized from the 2021 baseline.
pub const DEFAULT_SYNTHETIC_SWING_POINTS: f64 = 2.0;

/// How to synthesize a missing 2024 record from the 2021 baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticSwing {
    /// Party whose share rises by [`Self::points`].
    pub gaining: Party,
    /// Party whose share falls by [`Self::points`] (floored at zero).
    pub losing: Party,
    /// Swing size in percentage points.
    pub points: f64,
}

impl Default for SyntheticSwing {
    fn default() -> Self {
        Self {
            gaining: Party::Bjp,
            losing: Party::Tmc,
            points: DEFAULT_SYNTHETIC_SWING_POINTS,
        }
    }
}

impl SyntheticSwing {
    /// Builds a 2024 record from a 2021 baseline.
    #[must_use]
    pub fn apply(&self, baseline: &ElectoralRecord) -> ElectoralRecord {
        let mut record = baseline.clone();
        record.epoch = Epoch::E2024;

        *record.party_share.entry(self.gaining).or_insert(0.0) += self.points;
        if let Some(share) = record.party_share.get_mut(&self.losing) {
            *share = (*share - self.points).max(0.0);
        }

        if let Some((winner, margin)) = leader_and_margin(&record.party_share) {
            record.winner = winner;
            record.margin = margin;
        }

        record
    }
}

/// Returns the leading party and its lead over the runner-up.
fn leader_and_margin(shares: &BTreeMap<Party, f64>) -> Option<(Party, f64)> {
    let mut ranked: Vec<(Party, f64)> = shares.iter().map(|(p, s)| (*p, *s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (leader, top) = *ranked.first()?;
    let runner_up = ranked.get(1).map_or(0.0, |(_, share)| *share);
    Some((leader, top - runner_up))
}

/// Every epoch known for one constituency.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituencyHistory {
    /// Registry entry.
    pub info: ConstituencyInfo,
    /// 2021 assembly result. Always present.
    pub assembly_2021: ElectoralRecord,
    /// 2024 federal result, possibly synthesized.
    pub federal_2024: ElectoralRecord,
    /// Whether [`Self::federal_2024`] was synthesized from the baseline.
    pub federal_2024_synthesized: bool,
    /// 2025 by-election result, where one was held.
    pub byelection_2025: Option<ElectoralRecord>,
}

impl ConstituencyHistory {
    /// Returns the record for `epoch`, if known.
    #[must_use]
    pub const fn record(&self, epoch: Epoch) -> Option<&ElectoralRecord> {
        match epoch {
            Epoch::E2021 => Some(&self.assembly_2021),
            Epoch::E2024 => Some(&self.federal_2024),
            Epoch::E2025Byelection => self.byelection_2025.as_ref(),
        }
    }

    /// Returns `true` if a by-election was held and `party` polled a
    /// positive share in it.
    #[must_use]
    pub fn has_byelection_share(&self, party: Party) -> bool {
        self.byelection_2025
            .as_ref()
            .is_some_and(|record| record.share(party) > 0.0)
    }

    /// The most recent record that came from real data (synthesized
    /// records are skipped).
    #[must_use]
    pub fn latest_actual(&self) -> &ElectoralRecord {
        if let Some(byelection) = &self.byelection_2025 {
            byelection
        } else if self.federal_2024_synthesized {
            &self.assembly_2021
        } else {
            &self.federal_2024
        }
    }
}

/// Read-only reference data for a prediction run.
#[derive(Debug, Clone)]
pub struct ElectoralRecordStore {
    state: String,
    total_seats: u32,
    histories: BTreeMap<u32, ConstituencyHistory>,
    districts: BTreeMap<String, DistrictInfo>,
    district_members: BTreeMap<String, Vec<u32>>,
}

impl ElectoralRecordStore {
    /// Builds a store using the [default swing](SyntheticSwing::default)
    /// for missing 2024 records.
    ///
    /// # Errors
    ///
    /// See [`Self::with_synthetic_swing`].
    pub fn from_dataset(dataset: ElectoralDataset) -> Result<Self, ElectoralError> {
        Self::with_synthetic_swing(dataset, SyntheticSwing::default())
    }

    /// Builds a store, validating the dataset and synthesizing missing 2024
    /// records with `swing`.
    ///
    /// If the dataset declares no districts, the district table is derived
    /// from the records (with no aliases or issues).
    ///
    /// # Errors
    ///
    /// Returns [`ElectoralError`] if a constituency lacks its 2021 record,
    /// has two records for one epoch, names an undeclared district, or has
    /// records disagreeing on its name or district.
    pub fn with_synthetic_swing(
        dataset: ElectoralDataset,
        swing: SyntheticSwing,
    ) -> Result<Self, ElectoralError> {
        let ElectoralDataset {
            state,
            total_seats,
            districts,
            records,
        } = dataset;

        let mut districts: BTreeMap<String, DistrictInfo> = districts
            .into_iter()
            .map(|district| (district.name.clone(), district))
            .collect();
        let districts_declared = !districts.is_empty();

        let mut grouped: BTreeMap<u32, BTreeMap<Epoch, ElectoralRecord>> = BTreeMap::new();
        for record in records {
            let id = record.constituency_id;

            if districts_declared && !districts.contains_key(&record.district) {
                return Err(ElectoralError::UnknownDistrict {
                    constituency_id: id,
                    district: record.district,
                });
            }

            let by_epoch = grouped.entry(id).or_default();
            if let Some(existing) = by_epoch.values().next() {
                check_consistent(existing, &record)?;
            }
            if by_epoch.contains_key(&record.epoch) {
                return Err(ElectoralError::DuplicateRecord {
                    constituency_id: id,
                    epoch: record.epoch,
                });
            }
            by_epoch.insert(record.epoch, record);
        }

        let mut histories = BTreeMap::new();
        let mut district_members: BTreeMap<String, Vec<u32>> = BTreeMap::new();

        for (id, mut by_epoch) in grouped {
            let Some(assembly_2021) = by_epoch.remove(&Epoch::E2021) else {
                let name = by_epoch
                    .values()
                    .next()
                    .map(|r| r.constituency_name.clone())
                    .unwrap_or_default();
                return Err(ElectoralError::MissingBaseline {
                    constituency_id: id,
                    name,
                });
            };

            let (federal_2024, federal_2024_synthesized) =
                if let Some(record) = by_epoch.remove(&Epoch::E2024) {
                    (record, false)
                } else {
                    log::warn!(
                        "No E2024 record for {} ({id}); synthesizing from E2021 with {:+.1} pt swing to {}",
                        assembly_2021.constituency_name,
                        swing.points,
                        swing.gaining,
                    );
                    (swing.apply(&assembly_2021), true)
                };

            let info = assembly_2021.constituency();
            district_members
                .entry(info.district.clone())
                .or_default()
                .push(id);

            histories.insert(
                id,
                ConstituencyHistory {
                    info,
                    assembly_2021,
                    federal_2024,
                    federal_2024_synthesized,
                    byelection_2025: by_epoch.remove(&Epoch::E2025Byelection),
                },
            );
        }

        for name in district_members.keys() {
            districts
                .entry(name.clone())
                .or_insert_with(|| DistrictInfo {
                    name: name.clone(),
                    aliases: Vec::new(),
                    issues: Vec::new(),
                });
        }

        log::debug!(
            "Loaded {} constituencies across {} districts for {state}",
            histories.len(),
            districts.len(),
        );

        Ok(Self {
            state,
            total_seats,
            histories,
            districts,
            district_members,
        })
    }

    /// State the store covers.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Seats in the full assembly.
    #[must_use]
    pub const fn total_seats(&self) -> u32 {
        self.total_seats
    }

    /// Number of constituencies in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Returns `true` if the store has no constituencies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Iterates over all histories in ascending constituency id order.
    pub fn histories(&self) -> impl Iterator<Item = &ConstituencyHistory> {
        self.histories.values()
    }

    /// Iterates over the registry in ascending constituency id order.
    pub fn constituencies(&self) -> impl Iterator<Item = &ConstituencyInfo> {
        self.histories.values().map(|history| &history.info)
    }

    /// Looks up one constituency's history.
    #[must_use]
    pub fn history(&self, constituency_id: u32) -> Option<&ConstituencyHistory> {
        self.histories.get(&constituency_id)
    }

    /// Finds a constituency by display name, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&ConstituencyInfo> {
        let wanted = name.trim().to_lowercase();
        self.constituencies()
            .find(|info| info.name.to_lowercase() == wanted)
    }

    /// Iterates over the district table in name order.
    pub fn districts(&self) -> impl Iterator<Item = &DistrictInfo> {
        self.districts.values()
    }

    /// Looks up a district by exact name.
    #[must_use]
    pub fn district(&self, name: &str) -> Option<&DistrictInfo> {
        self.districts.get(name)
    }

    /// Constituency ids in `district`, ascending.
    #[must_use]
    pub fn district_constituencies(&self, district: &str) -> &[u32] {
        self.district_members
            .get(district)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The constituency standing in for a whole district: the lowest id.
    #[must_use]
    pub fn district_representative(&self, district: &str) -> Option<u32> {
        self.district_constituencies(district).first().copied()
    }

    /// Standing issues for `district`. Empty for unknown districts.
    #[must_use]
    pub fn issues_for(&self, district: &str) -> &[String] {
        self.districts
            .get(district)
            .map(|info| info.issues.as_slice())
            .unwrap_or_default()
    }
}

fn check_consistent(
    existing: &ElectoralRecord,
    record: &ElectoralRecord,
) -> Result<(), ElectoralError> {
    if existing.constituency_name != record.constituency_name {
        return Err(ElectoralError::InconsistentConstituency {
            constituency_id: record.constituency_id,
            message: format!(
                "name '{}' vs '{}'",
                existing.constituency_name, record.constituency_name
            ),
        });
    }
    if existing.district != record.district {
        return Err(ElectoralError::InconsistentConstituency {
            constituency_id: record.constituency_id,
            message: format!("district '{}' vs '{}'", existing.district, record.district),
        });
    }
    Ok(())
}
