//! Text-to-constituency resolution.
//!
//! Matching order, first match wins:
//!
//! 1. a constituency display name, in ascending constituency id order
//! 2. a district name or district alias, in district name order
//! 3. otherwise the signal is state-wide
//!
//! A district match carries the district's lowest-numbered constituency
//! as its representative. That is a coarse stand-in for the whole district,
//! not a real location; the aggregator only uses it when asked for
//! constituency-level granularity.

use std::collections::BTreeMap;

use election_signal_electoral::ElectoralRecordStore;
use election_signal_electoral_models::{ConstituencyInfo, DistrictInfo};
use election_signal_signal_models::SignalLocation;

#[derive(Debug, Clone)]
struct NameEntry {
    needle: String,
    constituency_id: u32,
    district: String,
}

#[derive(Debug, Clone)]
struct AliasEntry {
    needle: String,
    district: String,
    representative: Option<u32>,
}

/// Resolves free text to a [`SignalLocation`].
#[derive(Debug, Clone)]
pub struct ConstituencyResolver {
    names: Vec<NameEntry>,
    aliases: Vec<AliasEntry>,
}

impl ConstituencyResolver {
    /// Builds a resolver from a store's registry and district table.
    #[must_use]
    pub fn from_store(store: &ElectoralRecordStore) -> Self {
        Self::from_registry(store.constituencies(), store.districts())
    }

    /// Builds a resolver from raw registry entries.
    ///
    /// Constituencies are sorted by id and districts by name regardless of
    /// input order. Each district's own name is tried before its aliases.
    #[must_use]
    pub fn from_registry<'a>(
        constituencies: impl IntoIterator<Item = &'a ConstituencyInfo>,
        districts: impl IntoIterator<Item = &'a DistrictInfo>,
    ) -> Self {
        let mut names: Vec<NameEntry> = constituencies
            .into_iter()
            .map(|info| NameEntry {
                needle: info.name.trim().to_lowercase(),
                constituency_id: info.id,
                district: info.district.clone(),
            })
            .filter(|entry| !entry.needle.is_empty())
            .collect();
        names.sort_by_key(|entry| entry.constituency_id);

        let mut representatives: BTreeMap<&str, u32> = BTreeMap::new();
        for entry in &names {
            representatives
                .entry(entry.district.as_str())
                .or_insert(entry.constituency_id);
        }

        let mut districts: Vec<&DistrictInfo> = districts.into_iter().collect();
        districts.sort_by(|a, b| a.name.cmp(&b.name));

        let aliases = districts
            .into_iter()
            .flat_map(|district| {
                let representative = representatives.get(district.name.as_str()).copied();
                std::iter::once(district.name.as_str())
                    .chain(district.aliases.iter().map(String::as_str))
                    .map(|alias| alias.trim().to_lowercase())
                    .filter(|needle| !needle.is_empty())
                    .map(move |needle| AliasEntry {
                        needle,
                        district: district.name.clone(),
                        representative,
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Self { names, aliases }
    }

    /// Resolves `text` to a location.
    #[must_use]
    pub fn resolve(&self, text: &str) -> SignalLocation {
        let lower = text.to_lowercase();

        if let Some(entry) = self.names.iter().find(|e| lower.contains(&e.needle)) {
            return SignalLocation::Constituency {
                constituency_id: entry.constituency_id,
                district: entry.district.clone(),
            };
        }

        if let Some(entry) = self.aliases.iter().find(|e| lower.contains(&e.needle)) {
            return SignalLocation::District {
                district: entry.district.clone(),
                representative: entry.representative,
            };
        }

        SignalLocation::StateWide
    }
}

#[cfg(test)]
mod tests {
    use election_signal_electoral::registry::reference_store;

    use super::*;

    fn resolver() -> ConstituencyResolver {
        ConstituencyResolver::from_store(&reference_store())
    }

    #[test]
    fn exact_constituency_name_wins() {
        let location = resolver().resolve("Counting update from NANDIGRAM and Haldia");
        assert_eq!(
            location,
            SignalLocation::Constituency {
                constituency_id: 210,
                district: "Purba Medinipur".to_string(),
            }
        );
    }

    #[test]
    fn district_alias_maps_to_lowest_constituency() {
        let location = resolver().resolve("BJP wins big victory in Kolkata");
        assert_eq!(
            location,
            SignalLocation::District {
                district: "Kolkata".to_string(),
                representative: Some(158),
            }
        );
    }

    #[test]
    fn native_script_alias_matches() {
        let location = resolver().resolve("কোচবিহারে মিছিল");
        assert_eq!(location.district(), Some("Cooch Behar"));
    }

    #[test]
    fn unmatched_text_is_state_wide() {
        assert_eq!(
            resolver().resolve("Local market prices steady"),
            SignalLocation::StateWide
        );
    }

    #[test]
    fn registry_order_does_not_depend_on_input_order() {
        let a = ConstituencyInfo {
            id: 20,
            name: "Eastgate".to_string(),
            district: "East".to_string(),
        };
        let b = ConstituencyInfo {
            id: 10,
            name: "Eastgate North".to_string(),
            district: "East".to_string(),
        };
        let east = DistrictInfo {
            name: "East".to_string(),
            aliases: vec!["Sunrise".to_string()],
            issues: Vec::new(),
        };

        let forward = ConstituencyResolver::from_registry([&a, &b], [&east]);
        let backward = ConstituencyResolver::from_registry([&b, &a], [&east]);

        // Both names match; the lower id is tried first.
        let text = "rally at eastgate north";
        assert_eq!(forward.resolve(text), backward.resolve(text));
        assert_eq!(
            forward.resolve(text),
            SignalLocation::Constituency {
                constituency_id: 10,
                district: "East".to_string(),
            }
        );

        assert_eq!(
            forward.resolve("SUNRISE march"),
            SignalLocation::District {
                district: "East".to_string(),
                representative: Some(10),
            }
        );
    }
}
