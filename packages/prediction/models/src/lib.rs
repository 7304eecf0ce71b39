#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Constituency prediction, statistics, and engine configuration types.
//!
//! The prediction model is two-party: one tracked party against one
//! opposing party, with complementary win probabilities that sum to 100.
//! Every weight and threshold the engine uses lives in
//! [`PredictionConfig`].

use election_signal_signal_models::Party;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Direction of the tracked party's effective swing.
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
pub enum Trend {
    /// Tracked party gaining.
    Rising,
    /// Tracked party losing ground.
    Falling,
    /// Swing within the noise threshold.
    Stable,
}

/// Tracked and opposing vote shares from one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochShares {
    /// Tracked party share.
    pub tracked: f64,
    /// Opposing party share.
    pub opposing: f64,
}

/// The historical inputs a prediction was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionProvenance {
    /// 2021 assembly shares.
    pub share_2021: EpochShares,
    /// 2024 federal shares.
    pub share_2024: EpochShares,
    /// Whether the 2024 shares were synthesized from 2021.
    pub share_2024_synthesized: bool,
    /// 2025 by-election shares, where one was held.
    pub share_2025: Option<EpochShares>,
    /// 2021 winner.
    pub winner_2021: Party,
    /// 2024 leader.
    pub winner_2024: Party,
    /// 2025 by-election winner.
    pub winner_2025: Option<Party>,
}

/// Engine output for one constituency in one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstituencyPrediction {
    /// Official constituency number.
    pub constituency_id: u32,
    /// Display name.
    pub constituency_name: String,
    /// District name.
    pub district: String,
    /// Party whose chances are being estimated.
    pub tracked_party: Party,
    /// The tracked party's main rival.
    pub opposing_party: Party,
    /// Win probability of the tracked party, within the configured floor
    /// and ceiling.
    pub tracked_win_probability: u32,
    /// `100 - tracked_win_probability`.
    pub opposing_win_probability: u32,
    /// `tracked_win_probability - opposing_win_probability`.
    pub margin: i32,
    /// Direction of the effective swing.
    pub trend: Trend,
    /// Swing used to derive [`Self::trend`], in percentage points.
    pub effective_swing: f64,
    /// Confidence score, between the configured base and cap.
    pub confidence: u32,
    /// Whether the by-election weight profile was used.
    #[serde(rename = "has2025Data")]
    pub has_2025_data: bool,
    /// News sentiment input (0-100, tracked-party favourable).
    pub news_sentiment_input: f64,
    /// Ground report input (0-100, tracked-party favourable).
    pub ground_report_input: f64,
    /// District issues plus one incumbency tag. Informational only.
    pub key_issues: Vec<String>,
    /// Historical shares and winners used.
    pub provenance: PredictionProvenance,
}

impl ConstituencyPrediction {
    /// Absolute margin between the two probabilities.
    #[must_use]
    pub const fn abs_margin(&self) -> u32 {
        self.margin.unsigned_abs()
    }
}

/// A low/high seat estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRange {
    /// Lower bound.
    pub low: u32,
    /// Upper bound.
    pub high: u32,
}

/// Leading counts from the sample scaled to the full assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatProjection {
    /// Seats in the full assembly.
    pub total_seats: u32,
    /// Number of predictions the projection was scaled from.
    pub sample_size: u32,
    /// Projected seats for the tracked party.
    pub tracked: SeatRange,
    /// Projected seats for the opposing party.
    pub opposing: SeatRange,
}

/// State-wide summary of one run.
///
/// `swing + tracked_leading + opposing_leading == total`. Safe seats are a
/// subset of the matching leading bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionStats {
    /// Number of predictions summarized.
    pub total: u32,
    /// Tracked party clearly ahead.
    pub tracked_leading: u32,
    /// Opposing party clearly ahead.
    pub opposing_leading: u32,
    /// Too close to call.
    pub swing: u32,
    /// Tracked-leading seats that also clear the safe-seat probability.
    pub safe_tracked: u32,
    /// Opposing-leading seats that also clear the safe-seat probability.
    pub safe_opposing: u32,
    /// Seat projection band.
    pub projection: SeatProjection,
}

/// Which predictions to keep in a filtered view.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PredictionFilter {
    /// Keep everything.
    #[default]
    All,
    /// Tracked-leading seats only.
    Tracked,
    /// Opposing-leading seats only.
    Opposing,
    /// Swing seats only.
    Swing,
}

/// Sort order for a filtered view.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortKey {
    /// Largest absolute margin first.
    #[default]
    Margin,
    /// Highest tracked probability first.
    Tracked,
    /// Highest opposing probability first.
    Opposing,
    /// Constituency name, A to Z.
    Name,
}

/// Where the news sentiment input comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentScope {
    /// One state-wide news scalar for every constituency.
    #[default]
    Global,
    /// Each constituency's own signal bucket, falling back to the
    /// state-wide scalar when the bucket has no polar evidence.
    PerConstituency,
}

/// Relative weights of the score inputs for one branch of the engine.
///
/// Keys missing from a TOML table take the [`Self::BASELINE`] values, so a
/// by-election override should spell out all four weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightProfile {
    /// Weight of the 2025 by-election share.
    pub byelection_2025: f64,
    /// Weight of the 2021 assembly share.
    pub assembly_2021: f64,
    /// Weight of the news sentiment adjustment.
    pub news_sentiment: f64,
    /// Weight of the ground report adjustment.
    pub ground_report: f64,
}

impl WeightProfile {
    /// Weights used when by-election data is available.
    pub const BYELECTION: Self = Self {
        byelection_2025: 0.50,
        assembly_2021: 0.35,
        news_sentiment: 0.10,
        ground_report: 0.05,
    };

    /// Weights used without by-election data.
    pub const BASELINE: Self = Self {
        byelection_2025: 0.0,
        assembly_2021: 0.80,
        news_sentiment: 0.15,
        ground_report: 0.05,
    };

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.byelection_2025 + self.assembly_2021 + self.news_sentiment + self.ground_report
    }
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Confidence score parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Confidence at zero margin without by-election data.
    pub base: f64,
    /// Points added per point of absolute margin.
    pub margin_factor: f64,
    /// Points added when by-election data was used.
    pub byelection_bonus: u32,
    /// Upper bound.
    pub cap: u32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 60.0,
            margin_factor: 1.5,
            byelection_bonus: 10,
            cap: 95,
        }
    }
}

/// Every weight and threshold used by the prediction engine and the
/// statistics summarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Party whose chances are estimated.
    pub tracked_party: Party,
    /// The tracked party's rival.
    pub opposing_party: Party,
    /// Weights when by-election data is available.
    pub byelection_weights: WeightProfile,
    /// Weights without by-election data.
    pub baseline_weights: WeightProfile,
    /// Maps the 0-100 news scale to an adjustment: `(news - 50) * factor`.
    pub news_adjustment_factor: f64,
    /// Maps the 0-100 ground scale to an adjustment: `(ground - 50) * factor`.
    pub ground_adjustment_factor: f64,
    /// Multiplier applied to weighted adjustments.
    pub adjustment_scale: f64,
    /// Lowest win probability ever reported.
    pub probability_floor: u32,
    /// Highest win probability ever reported.
    pub probability_ceiling: u32,
    /// Swing (points) beyond which a trend is rising or falling.
    pub trend_threshold: f64,
    /// Confidence score parameters.
    pub confidence: ConfidenceConfig,
    /// Absolute margin at or below which a seat is a swing seat.
    pub swing_margin_threshold: u32,
    /// Probability a leading party needs for a safe seat.
    pub safe_seat_probability: u32,
    /// Relative half-width of the seat projection band.
    pub projection_band: f64,
    /// Seats in the full assembly. When unset, the electoral dataset's
    /// own seat count is used.
    pub total_seats: Option<u32>,
    /// Points the tracked party gains, and the opposing party loses, when
    /// a missing 2024 record is synthesized from 2021.
    pub synthetic_swing_points: f64,
    /// Where the news sentiment input comes from.
    pub sentiment_scope: SentimentScope,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            tracked_party: Party::Bjp,
            opposing_party: Party::Tmc,
            byelection_weights: WeightProfile::BYELECTION,
            baseline_weights: WeightProfile::BASELINE,
            news_adjustment_factor: 0.5,
            ground_adjustment_factor: 0.3,
            adjustment_scale: 100.0,
            probability_floor: 20,
            probability_ceiling: 75,
            trend_threshold: 3.0,
            confidence: ConfidenceConfig::default(),
            swing_margin_threshold: 10,
            safe_seat_probability: 55,
            projection_band: 0.15,
            total_seats: None,
            synthetic_swing_points: 2.0,
            sentiment_scope: SentimentScope::Global,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weight_profiles_sum_to_one() {
        assert!((WeightProfile::BYELECTION.total() - 1.0).abs() < 1e-9);
        assert!((WeightProfile::BASELINE.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PredictionConfig = toml::de::from_str(
            r#"
            probability_ceiling = 80
            sentiment_scope = "per_constituency"

            [baseline_weights]
            assembly_2021 = 0.7
            "#,
        )
        .unwrap();

        assert_eq!(config.probability_ceiling, 80);
        assert_eq!(config.probability_floor, 20);
        assert_eq!(config.sentiment_scope, SentimentScope::PerConstituency);
        assert!((config.baseline_weights.assembly_2021 - 0.7).abs() < 1e-9);
        // Unspecified fields of a partially given profile take the baseline defaults.
        assert!((config.baseline_weights.news_sentiment - 0.15).abs() < 1e-9);
        assert_eq!(config.byelection_weights, WeightProfile::BYELECTION);
        assert_eq!(config.tracked_party, Party::Bjp);
        assert_eq!(config.total_seats, None);

        let config: PredictionConfig = toml::de::from_str("total_seats = 120").unwrap();
        assert_eq!(config.total_seats, Some(120));
    }

    #[test]
    fn filter_and_sort_parse_from_cli_strings() {
        assert_eq!("swing".parse::<PredictionFilter>().unwrap(), PredictionFilter::Swing);
        assert_eq!("Tracked".parse::<PredictionFilter>().unwrap(), PredictionFilter::Tracked);
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert!("bogus".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default(), SortKey::Margin);
    }

    #[test]
    fn prediction_serializes_flag_name() {
        let prediction = ConstituencyPrediction {
            constituency_id: 1,
            constituency_name: "Test".to_string(),
            district: "North".to_string(),
            tracked_party: Party::Bjp,
            opposing_party: Party::Tmc,
            tracked_win_probability: 54,
            opposing_win_probability: 46,
            margin: 8,
            trend: Trend::Stable,
            effective_swing: 2.0,
            confidence: 72,
            has_2025_data: false,
            news_sentiment_input: 50.0,
            ground_report_input: 50.0,
            key_issues: Vec::new(),
            provenance: PredictionProvenance {
                share_2021: EpochShares {
                    tracked: 54.25,
                    opposing: 45.75,
                },
                share_2024: EpochShares {
                    tracked: 56.25,
                    opposing: 43.75,
                },
                share_2024_synthesized: true,
                share_2025: None,
                winner_2021: Party::Bjp,
                winner_2024: Party::Bjp,
                winner_2025: None,
            },
        };

        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["has2025Data"], false);
        assert_eq!(json["trackedWinProbability"], 54);
        assert_eq!(json["trend"], "stable");
        assert_eq!(json["provenance"]["share2021"]["tracked"], 54.25);
        assert_eq!(prediction.abs_margin(), 8);
    }
}
