//! Keyword dictionaries for party, sentiment, and election detection.
//!
//! Every category is a flat list of literal variants. English, Bengali,
//! and Hindi spellings sit side by side in the same list and a text is
//! matched against all of them at once; there is no language dispatch.
//! All matching is case-insensitive substring matching on the
//! lower-cased text.

use std::collections::{BTreeMap, BTreeSet};

use election_signal_signal_models::{Classification, Party, Sentiment};
use serde::{Deserialize, Serialize};

use crate::ClassifierError;

const BJP_KEYWORDS: &[&str] = &[
    "bjp",
    "bharatiya janata",
    "suvendu adhikari",
    "sukanta majumdar",
    "বিজেপি",
    "ভারতীয় জনতা পার্টি",
    "भाजपा",
    "बीजेपी",
];

const TMC_KEYWORDS: &[&str] = &[
    "tmc",
    "trinamool",
    "aitc",
    "mamata banerjee",
    "abhishek banerjee",
    "তৃণমূল",
    "টিএমসি",
    "तृणमूल",
    "टीएमसी",
];

const CONGRESS_KEYWORDS: &[&str] = &[
    "indian national congress",
    "congress party",
    "pradesh congress",
    "adhir ranjan",
    "জাতীয় কংগ্রেস",
    "कांग्रेस पार्टी",
];

const LEFT_KEYWORDS: &[&str] = &[
    "cpi(m)",
    "cpim",
    "cpi-m",
    "left front",
    "md salim",
    "সিপিএম",
    "বামফ্রন্ট",
    "माकपा",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "win",
    "victory",
    "success",
    "support",
    "development",
    "growth",
    "progress",
    "welcome",
    "praise",
    "boost",
    "celebrat",
    "জয়",
    "সাফল্য",
    "উন্নয়ন",
    "समर्थन",
    "जीत",
    "सफलता",
    "विकास",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "loss",
    "defeat",
    "scam",
    "corruption",
    "violence",
    "protest",
    "attack",
    "allegation",
    "crisis",
    "fail",
    "clash",
    "arrest",
    "boycott",
    "পরাজয়",
    "দুর্নীতি",
    "হিংসা",
    "पराजय",
    "भ्रष्टाचार",
    "हिंसा",
    "घोटाला",
];

const ELECTION_KEYWORDS: &[&str] = &[
    "election",
    "candidate",
    "polling",
    "poll",
    "vote",
    "ballot",
    "constituency",
    "campaign",
    "manifesto",
    "nomination",
    "নির্বাচন",
    "ভোট",
    "প্রার্থী",
    "चुनाव",
    "मतदान",
    "उम्मीदवार",
];

/// Sentiment score above which a signal is labelled positive.
const POSITIVE_THRESHOLD: f64 = 0.6;

/// Sentiment score below which a signal is labelled negative.
const NEGATIVE_THRESHOLD: f64 = 0.4;

/// Score reported when no sentiment keyword matched.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// The complete set of keyword dictionaries used for classification.
///
/// Missing sections in a TOML override fall back to the built-in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Per-party keyword variants.
    pub parties: BTreeMap<Party, Vec<String>>,
    /// Words counted as positive evidence.
    pub positive: Vec<String>,
    /// Words counted as negative evidence.
    pub negative: Vec<String>,
    /// Words marking a text as election-related.
    pub election: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        let parties = [
            (Party::Bjp, BJP_KEYWORDS),
            (Party::Tmc, TMC_KEYWORDS),
            (Party::Congress, CONGRESS_KEYWORDS),
            (Party::Left, LEFT_KEYWORDS),
        ]
        .into_iter()
        .map(|(party, words)| (party, to_owned_list(words)))
        .collect();

        Self {
            parties,
            positive: to_owned_list(POSITIVE_KEYWORDS),
            negative: to_owned_list(NEGATIVE_KEYWORDS),
            election: to_owned_list(ELECTION_KEYWORDS),
        }
    }
}

impl Lexicon {
    /// Parses a lexicon override from TOML.
    ///
    /// Keywords are lower-cased and empty entries are dropped, so an
    /// override can never match every text by accident.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Lexicon`] if the TOML is malformed or
    /// names an unknown party.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ClassifierError> {
        let lexicon: Self = toml::de::from_str(toml_str)?;
        Ok(lexicon.normalized())
    }

    fn normalized(self) -> Self {
        Self {
            parties: self
                .parties
                .into_iter()
                .map(|(party, words)| (party, normalize_list(words)))
                .collect(),
            positive: normalize_list(self.positive),
            negative: normalize_list(self.negative),
            election: normalize_list(self.election),
        }
    }

    /// Classifies a text for party mentions, sentiment, and election
    /// relevance.
    #[must_use]
    pub fn classify(&self, text: &str) -> Classification {
        let lower = text.to_lowercase();
        let (sentiment, sentiment_score) = self.sentiment_of_lower(&lower);

        Classification {
            party_mentions: self.parties_in_lower(&lower),
            sentiment,
            sentiment_score,
            election_related: contains_any(&lower, &self.election),
        }
    }

    /// Returns every party with at least one keyword hit in `text`.
    #[must_use]
    pub fn mentioned_parties(&self, text: &str) -> BTreeSet<Party> {
        self.parties_in_lower(&text.to_lowercase())
    }

    /// Returns `(positive_hits, negative_hits)` for `text`.
    #[must_use]
    pub fn sentiment_hits(&self, text: &str) -> (u64, u64) {
        let lower = text.to_lowercase();
        (
            count_hits(&lower, &self.positive),
            count_hits(&lower, &self.negative),
        )
    }

    /// Returns `true` if `text` contains any election keyword.
    #[must_use]
    pub fn is_election_related(&self, text: &str) -> bool {
        contains_any(&text.to_lowercase(), &self.election)
    }

    fn parties_in_lower(&self, lower: &str) -> BTreeSet<Party> {
        self.parties
            .iter()
            .filter(|(_, words)| contains_any(lower, words))
            .map(|(party, _)| *party)
            .collect()
    }

    fn sentiment_of_lower(&self, lower: &str) -> (Sentiment, f64) {
        score_sentiment(
            count_hits(lower, &self.positive),
            count_hits(lower, &self.negative),
        )
    }
}

/// Turns raw hit counts into a sentiment label and score.
///
/// The score is `(p - n + total) / (2 * total)`, which reduces to the
/// positive share of all hits. Zero hits yield neutral at
/// [`NEUTRAL_SCORE`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_sentiment(positive: u64, negative: u64) -> (Sentiment, f64) {
    let total = positive + negative;
    if total == 0 {
        return (Sentiment::Neutral, NEUTRAL_SCORE);
    }

    let score = positive as f64 / total as f64;
    let sentiment = if score > POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score < NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    (sentiment, score)
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

/// Counts non-overlapping occurrences of every needle in `haystack`.
fn count_hits(haystack: &str, needles: &[String]) -> u64 {
    needles
        .iter()
        .map(|needle| haystack.matches(needle.as_str()).count() as u64)
        .sum()
}

fn to_owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn normalize_list(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_multiple_parties() {
        let lexicon = Lexicon::default();
        let parties =
            lexicon.mentioned_parties("Trinamool and BJP workers clash ahead of the Left Front rally");
        assert!(parties.contains(&Party::Bjp));
        assert!(parties.contains(&Party::Tmc));
        assert!(parties.contains(&Party::Left));
        assert!(!parties.contains(&Party::Congress));
    }

    #[test]
    fn native_script_variants_match() {
        let lexicon = Lexicon::default();
        assert!(lexicon.mentioned_parties("তৃণমূল প্রার্থী").contains(&Party::Tmc));
        assert!(lexicon.mentioned_parties("भाजपा की रैली").contains(&Party::Bjp));
        assert!(lexicon.is_election_related("নির্বাচন কমিশনের বৈঠক"));
        assert!(lexicon.is_election_related("चुनाव आयोग"));
    }

    #[test]
    fn counts_repeated_hits() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.sentiment_hits("Win after win after win"), (3, 0));
        assert_eq!(lexicon.sentiment_hits("Scam and corruption"), (0, 2));
    }

    #[test]
    fn scores_follow_thresholds() {
        assert_eq!(score_sentiment(0, 0), (Sentiment::Neutral, NEUTRAL_SCORE));
        assert_eq!(score_sentiment(2, 0), (Sentiment::Positive, 1.0));
        assert_eq!(score_sentiment(0, 3), (Sentiment::Negative, 0.0));
        assert_eq!(score_sentiment(1, 1), (Sentiment::Neutral, 0.5));
        // Exactly 0.6 and 0.4 stay neutral.
        assert_eq!(score_sentiment(3, 2).0, Sentiment::Neutral);
        assert_eq!(score_sentiment(2, 3).0, Sentiment::Neutral);
        assert_eq!(score_sentiment(7, 3).0, Sentiment::Positive);
        assert_eq!(score_sentiment(3, 7).0, Sentiment::Negative);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        for p in 0..20 {
            for n in 0..20 {
                let (_, score) = score_sentiment(p, n);
                assert!((0.0..=1.0).contains(&score), "p={p} n={n} score={score}");
            }
        }
    }

    #[test]
    fn toml_override_keeps_defaults_for_missing_sections() {
        let lexicon = Lexicon::from_toml_str(
            r#"
            positive = ["  Landslide ", ""]

            [parties]
            BJP = ["Saffron"]
            "#,
        )
        .unwrap();

        assert_eq!(lexicon.positive, vec!["landslide".to_string()]);
        assert_eq!(lexicon.parties[&Party::Bjp], vec!["saffron".to_string()]);
        assert!(!lexicon.parties.contains_key(&Party::Tmc));
        assert_eq!(lexicon.negative, Lexicon::default().negative);

        let classification = lexicon.classify("A saffron landslide");
        assert!(classification.mentions(Party::Bjp));
        assert_eq!(classification.sentiment, Sentiment::Positive);
    }

    #[test]
    fn toml_override_rejects_unknown_party() {
        let result = Lexicon::from_toml_str("[parties]\nAAP = [\"aap\"]\n");
        assert!(result.is_err());
    }
}
