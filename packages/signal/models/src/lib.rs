#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Party, sentiment, and classified text signal types.
//!
//! A text signal is one unit of free text (a news article, a social post)
//! after it has been classified for party mentions and sentiment and
//! resolved to a location. These types are shared by the classifier, the
//! aggregator, and the prediction engine.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A political party tracked by the engine.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Party {
    /// Bharatiya Janata Party
    Bjp,
    /// All India Trinamool Congress
    Tmc,
    /// Indian National Congress
    Congress,
    /// Left Front, led by the CPI(M)
    Left,
}

impl Party {
    /// Returns the human-readable party name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bjp => "Bharatiya Janata Party",
            Self::Tmc => "All India Trinamool Congress",
            Self::Congress => "Indian National Congress",
            Self::Left => "Left Front",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Bjp, Self::Tmc, Self::Congress, Self::Left]
    }
}

/// Polarity of a classified signal.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sentiment {
    /// Mostly positive keyword evidence.
    Positive,
    /// Mostly negative keyword evidence.
    Negative,
    /// Balanced evidence, or no evidence at all.
    Neutral,
}

/// Output of classifying one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Every party with at least one keyword hit. A signal may mention
    /// several parties.
    pub party_mentions: BTreeSet<Party>,
    /// Sentiment label derived from [`Self::sentiment_score`].
    pub sentiment: Sentiment,
    /// Share of positive keyword hits, in `[0, 1]`. `0.5` when no
    /// sentiment keyword matched.
    pub sentiment_score: f64,
    /// Whether the text mentions any election keyword.
    pub election_related: bool,
}

impl Classification {
    /// Returns `true` if the given party was mentioned.
    #[must_use]
    pub fn mentions(&self, party: Party) -> bool {
        self.party_mentions.contains(&party)
    }
}

/// Where a signal was attributed after matching its text against the
/// constituency registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalLocation {
    /// The text named a constituency directly.
    #[serde(rename_all = "camelCase")]
    Constituency {
        /// Constituency identifier.
        constituency_id: u32,
        /// District the constituency belongs to.
        district: String,
    },
    /// The text only matched a district alias.
    #[serde(rename_all = "camelCase")]
    District {
        /// District name.
        district: String,
        /// Constituency standing in for the whole district when a caller
        /// asks for constituency-level granularity. `None` if the district
        /// has no registered constituencies.
        representative: Option<u32>,
    },
    /// Nothing matched; the signal counts toward the state-wide bucket only.
    StateWide,
}

impl SignalLocation {
    /// Returns the district this location falls in, if any.
    #[must_use]
    pub fn district(&self) -> Option<&str> {
        match self {
            Self::Constituency { district, .. } | Self::District { district, .. } => {
                Some(district)
            }
            Self::StateWide => None,
        }
    }
}

/// A raw text record as produced by a scraping or ingestion feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSignalRecord {
    /// Headline or post title.
    pub title: String,
    /// Short summary, if the feed provides one.
    #[serde(default)]
    pub description: Option<String>,
    /// Body text, if the feed provides one.
    #[serde(default)]
    pub content: Option<String>,
    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Name of the outlet or account (e.g., "Anandabazar Patrika").
    pub source_name: String,
    /// Language tag (e.g., `"en"`, `"bn"`, `"hi"`). Informational only.
    #[serde(default)]
    pub language: Option<String>,
}

impl RawSignalRecord {
    /// Joins title, description, and content with single spaces, skipping
    /// empty parts.
    #[must_use]
    pub fn combined_text(&self) -> String {
        [
            Some(self.title.as_str()),
            self.description.as_deref(),
            self.content.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// One classified and located unit of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSignal {
    /// The text that was classified.
    pub text: String,
    /// Language tag carried over from the feed.
    pub language: Option<String>,
    /// Outlet or account name.
    pub source_name: String,
    /// Publication timestamp.
    pub published_at: Option<DateTime<Utc>>,
    /// Party and sentiment classification.
    pub classification: Classification,
    /// Resolved location.
    pub location: SignalLocation,
}

/// Positive/negative/neutral tallies for a set of signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentCounts {
    /// Signals classified positive.
    pub positive: u64,
    /// Signals classified negative.
    pub negative: u64,
    /// Signals classified neutral.
    pub neutral: u64,
}

impl SentimentCounts {
    /// Counts one more signal with the given sentiment.
    pub const fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    /// Adds another set of tallies into this one.
    pub const fn merge(&mut self, other: &Self) {
        self.positive += other.positive;
        self.negative += other.negative;
        self.neutral += other.neutral;
    }

    /// Total number of counted signals.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }

    /// Percentage breakdown. Every percentage is `0.0` when nothing has
    /// been counted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distribution(&self) -> SentimentDistribution {
        let total = self.total();
        if total == 0 {
            return SentimentDistribution::default();
        }

        let pct = |n: u64| n as f64 / total as f64 * 100.0;
        SentimentDistribution {
            positive_percent: pct(self.positive),
            negative_percent: pct(self.negative),
            neutral_percent: pct(self.neutral),
        }
    }
}

/// Sentiment tallies expressed as percentages of their total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentDistribution {
    /// Percentage of positive signals.
    pub positive_percent: f64,
    /// Percentage of negative signals.
    pub negative_percent: f64,
    /// Percentage of neutral signals.
    pub neutral_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_parses_case_insensitively() {
        assert_eq!("bjp".parse::<Party>().unwrap(), Party::Bjp);
        assert_eq!("TMC".parse::<Party>().unwrap(), Party::Tmc);
        assert_eq!(Party::Congress.to_string(), "CONGRESS");
        assert!("AAP".parse::<Party>().is_err());
    }

    #[test]
    fn empty_counts_have_zero_distribution() {
        let dist = SentimentCounts::default().distribution();
        assert!(dist.positive_percent.abs() < f64::EPSILON);
        assert!(dist.negative_percent.abs() < f64::EPSILON);
        assert!(dist.neutral_percent.abs() < f64::EPSILON);
        assert!(!dist.positive_percent.is_nan());
    }

    #[test]
    fn distribution_sums_to_hundred() {
        let mut counts = SentimentCounts::default();
        counts.record(Sentiment::Positive);
        counts.record(Sentiment::Positive);
        counts.record(Sentiment::Negative);
        counts.record(Sentiment::Neutral);

        let dist = counts.distribution();
        assert!((dist.positive_percent - 50.0).abs() < 1e-9);
        assert!((dist.negative_percent - 25.0).abs() < 1e-9);
        let sum = dist.positive_percent + dist.negative_percent + dist.neutral_percent;
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn combined_text_skips_missing_parts() {
        let record = RawSignalRecord {
            title: "Rally in Siliguri".to_string(),
            description: None,
            content: Some("  Crowds gathered.  ".to_string()),
            published_at: None,
            source_name: "Test Wire".to_string(),
            language: Some("en".to_string()),
        };
        assert_eq!(record.combined_text(), "Rally in Siliguri Crowds gathered.");
    }

    #[test]
    fn location_serializes_with_kind_tag() {
        let location = SignalLocation::District {
            district: "Kolkata".to_string(),
            representative: Some(159),
        };
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["kind"], "district");
        assert_eq!(json["representative"], 159);
        assert_eq!(location.district(), Some("Kolkata"));
        assert_eq!(SignalLocation::StateWide.district(), None);
    }
}
