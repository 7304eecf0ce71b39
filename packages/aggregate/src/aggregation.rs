//! Per-constituency reduction of classified signals.
//!
//! All tallies are plain counters keyed by ordered maps, so adding signals
//! one at a time, in one batch, in any order, or as merged partial
//! aggregations always produces the same result.

use std::collections::BTreeMap;

use election_signal_signal_models::{
    Classification, Party, SentimentCounts, SentimentDistribution, SignalLocation, TextSignal,
};
use serde::{Deserialize, Serialize};

/// How district-only matches are attributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// District-only matches count toward their district bucket only.
    #[default]
    District,
    /// District-only matches also count toward the district's
    /// representative constituency.
    Constituency,
}

/// Counts for one bucket of signals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSummary {
    /// Signals attributed to this bucket.
    pub total_mentions: u64,
    /// Signals flagged as election-related.
    pub election_related: u64,
    /// Sentiment over every signal in the bucket.
    pub sentiment: SentimentCounts,
    /// Sentiment over the signals mentioning each party.
    pub by_party: BTreeMap<Party, SentimentCounts>,
}

impl SignalSummary {
    /// Counts one classified signal.
    pub fn record(&mut self, classification: &Classification) {
        self.total_mentions += 1;
        if classification.election_related {
            self.election_related += 1;
        }
        self.sentiment.record(classification.sentiment);
        for party in &classification.party_mentions {
            self.by_party
                .entry(*party)
                .or_default()
                .record(classification.sentiment);
        }
    }

    /// Adds another summary's counts into this one.
    pub fn merge(&mut self, other: &Self) {
        self.total_mentions += other.total_mentions;
        self.election_related += other.election_related;
        self.sentiment.merge(&other.sentiment);
        for (party, counts) in &other.by_party {
            self.by_party.entry(*party).or_default().merge(counts);
        }
    }

    /// Sentiment tallies for signals mentioning `party`.
    #[must_use]
    pub fn party(&self, party: Party) -> SentimentCounts {
        self.by_party.get(&party).copied().unwrap_or_default()
    }

    /// Sentiment percentages over the whole bucket.
    #[must_use]
    pub fn distribution(&self) -> SentimentDistribution {
        self.sentiment.distribution()
    }

    /// Sentiment percentages over the signals mentioning `party`.
    #[must_use]
    pub fn party_distribution(&self, party: Party) -> SentimentDistribution {
        self.party(party).distribution()
    }

    /// Percentage of polar evidence that favours `tracked` over `opposing`.
    ///
    /// Favourable evidence is positive coverage of `tracked` plus negative
    /// coverage of `opposing`; unfavourable is the reverse. Returns `None`
    /// when neither party has any positive or negative coverage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tracked_sentiment_percent(&self, tracked: Party, opposing: Party) -> Option<f64> {
        let tracked_counts = self.party(tracked);
        let opposing_counts = self.party(opposing);

        let favourable = tracked_counts.positive + opposing_counts.negative;
        let unfavourable = tracked_counts.negative + opposing_counts.positive;
        let total = favourable + unfavourable;
        if total == 0 {
            return None;
        }

        Some(favourable as f64 / total as f64 * 100.0)
    }
}

/// Signal counts for every bucket: constituencies, districts, the
/// unresolved state-wide bucket, and the overall total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalAggregation {
    granularity: Granularity,
    constituencies: BTreeMap<u32, SignalSummary>,
    districts: BTreeMap<String, SignalSummary>,
    state_wide: SignalSummary,
    overall: SignalSummary,
}

impl SignalAggregation {
    /// Creates an empty aggregation.
    #[must_use]
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            ..Self::default()
        }
    }

    /// Granularity this aggregation was built with.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Counts one signal into every bucket it belongs to.
    pub fn add(&mut self, signal: &TextSignal) {
        let classification = &signal.classification;
        self.overall.record(classification);

        match &signal.location {
            SignalLocation::Constituency {
                constituency_id,
                district,
            } => {
                self.constituencies
                    .entry(*constituency_id)
                    .or_default()
                    .record(classification);
                self.districts
                    .entry(district.clone())
                    .or_default()
                    .record(classification);
            }
            SignalLocation::District {
                district,
                representative,
            } => {
                self.districts
                    .entry(district.clone())
                    .or_default()
                    .record(classification);
                if self.granularity == Granularity::Constituency
                    && let Some(id) = representative
                {
                    self.constituencies
                        .entry(*id)
                        .or_default()
                        .record(classification);
                }
            }
            SignalLocation::StateWide => self.state_wide.record(classification),
        }
    }

    /// Adds a partial aggregation into this one.
    ///
    /// Both sides should share a granularity; the counts of `other` are
    /// taken as already attributed.
    pub fn merge(&mut self, other: &Self) {
        if self.granularity != other.granularity {
            log::warn!(
                "Merging {:?} aggregation into {:?} aggregation",
                other.granularity,
                self.granularity
            );
        }

        for (id, summary) in &other.constituencies {
            self.constituencies.entry(*id).or_default().merge(summary);
        }
        for (district, summary) in &other.districts {
            self.districts
                .entry(district.clone())
                .or_default()
                .merge(summary);
        }
        self.state_wide.merge(&other.state_wide);
        self.overall.merge(&other.overall);
    }

    /// Summary for one constituency, if any signal was attributed to it.
    #[must_use]
    pub fn constituency(&self, constituency_id: u32) -> Option<&SignalSummary> {
        self.constituencies.get(&constituency_id)
    }

    /// All constituency summaries, by ascending id.
    #[must_use]
    pub const fn constituencies(&self) -> &BTreeMap<u32, SignalSummary> {
        &self.constituencies
    }

    /// Summary for one district, if any signal was attributed to it.
    #[must_use]
    pub fn district(&self, district: &str) -> Option<&SignalSummary> {
        self.districts.get(district)
    }

    /// All district summaries, by name.
    #[must_use]
    pub const fn districts(&self) -> &BTreeMap<String, SignalSummary> {
        &self.districts
    }

    /// Signals that matched no constituency or district.
    #[must_use]
    pub const fn state_wide(&self) -> &SignalSummary {
        &self.state_wide
    }

    /// Every signal, regardless of location.
    #[must_use]
    pub const fn overall(&self) -> &SignalSummary {
        &self.overall
    }
}

/// Aggregates a batch of signals.
#[must_use]
pub fn aggregate(signals: &[TextSignal], granularity: Granularity) -> SignalAggregation {
    let mut aggregation = SignalAggregation::new(granularity);
    for signal in signals {
        aggregation.add(signal);
    }
    log::debug!(
        "Aggregated {} signals: {} constituencies, {} districts, {} state-wide",
        signals.len(),
        aggregation.constituencies.len(),
        aggregation.districts.len(),
        aggregation.state_wide.total_mentions,
    );
    aggregation
}

/// Summarizes only the signals attributed to one constituency.
///
/// Gives the same counts as `aggregate(signals, granularity)
/// .constituency(constituency_id)`, or an empty summary if nothing was
/// attributed.
#[must_use]
pub fn aggregate_constituency(
    signals: &[TextSignal],
    constituency_id: u32,
    granularity: Granularity,
) -> SignalSummary {
    let mut summary = SignalSummary::default();
    for signal in signals
        .iter()
        .filter(|s| attributed_to_constituency(&s.location, constituency_id, granularity))
    {
        summary.record(&signal.classification);
    }
    summary
}

/// Summarizes only the signals attributed to one district.
#[must_use]
pub fn aggregate_district(signals: &[TextSignal], district: &str) -> SignalSummary {
    let mut summary = SignalSummary::default();
    for signal in signals
        .iter()
        .filter(|s| s.location.district() == Some(district))
    {
        summary.record(&signal.classification);
    }
    summary
}

fn attributed_to_constituency(
    location: &SignalLocation,
    constituency_id: u32,
    granularity: Granularity,
) -> bool {
    match location {
        SignalLocation::Constituency {
            constituency_id: id,
            ..
        } => *id == constituency_id,
        SignalLocation::District { representative, .. } => {
            granularity == Granularity::Constituency && *representative == Some(constituency_id)
        }
        SignalLocation::StateWide => false,
    }
}
