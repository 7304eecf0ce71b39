//! Per-constituency win-probability model.
//!
//! Each constituency is scored independently from its own history and two
//! scalar inputs on a 0-100 scale favourable to the tracked party: news
//! sentiment and ground reports. The score uses one of two fixed weight
//! profiles depending on whether a by-election was held, and the
//! normalized probability is clamped to the configured floor and ceiling.

use std::collections::BTreeMap;

use election_signal_aggregate::SignalAggregation;
use election_signal_electoral::{ConstituencyHistory, ElectoralRecordStore};
use election_signal_electoral_models::ElectoralRecord;
use election_signal_prediction_models::{
    ConstituencyPrediction, EpochShares, PredictionConfig, PredictionProvenance, PredictionStats,
    SentimentScope, Trend, WeightProfile,
};
use election_signal_signal_models::Party;

use crate::{PredictionError, stats::summarize, validate_config};

/// Neutral value of the news and ground scales.
pub const NEUTRAL_INPUT: f64 = 50.0;

/// Scalar inputs for one prediction run.
#[derive(Debug, Clone)]
pub struct PredictionInputs<'a> {
    /// State-wide news sentiment, 0-100, tracked-party favourable.
    pub news_sentiment: f64,
    /// State-wide ground report score, 0-100, tracked-party favourable.
    pub ground_report: f64,
    /// Ground report scores for individual constituencies, replacing
    /// [`Self::ground_report`] where present.
    pub ground_overrides: BTreeMap<u32, f64>,
    /// Aggregated signals, consulted when the config asks for
    /// per-constituency sentiment.
    pub signals: Option<&'a SignalAggregation>,
}

impl Default for PredictionInputs<'_> {
    fn default() -> Self {
        Self {
            news_sentiment: NEUTRAL_INPUT,
            ground_report: NEUTRAL_INPUT,
            ground_overrides: BTreeMap::new(),
            signals: None,
        }
    }
}

fn epoch_shares(record: &ElectoralRecord, tracked: Party, opposing: Party) -> EpochShares {
    let tracked_share = record.share(tracked);
    EpochShares {
        tracked: tracked_share,
        opposing: record
            .share_opt(opposing)
            .unwrap_or(100.0 - tracked_share),
    }
}

fn weighted_score(
    weights: &WeightProfile,
    byelection_share: f64,
    assembly_share: f64,
    news_adjustment: f64,
    ground_adjustment: f64,
    scale: f64,
) -> f64 {
    byelection_share * weights.byelection_2025
        + assembly_share * weights.assembly_2021
        + news_adjustment * weights.news_sentiment * scale
        + ground_adjustment * weights.ground_report * scale
}

/// Tracked-party probability before rounding and clamping.
fn raw_probability(tracked_score: f64, opposing_score: f64, constituency_id: u32) -> f64 {
    let denominator = tracked_score + opposing_score;
    let raw = tracked_score / denominator * 100.0;

    if denominator > 0.0 && raw.is_finite() {
        raw
    } else {
        log::warn!(
            "Constituency {constituency_id}: degenerate score total {denominator}, using even odds"
        );
        NEUTRAL_INPUT
    }
}

/// Rounds and clamps to the configured bounds, tightened to stay within
/// `0..=100` with the floor never above the ceiling.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_probability(raw: f64, config: &PredictionConfig) -> u32 {
    let ceiling = config.probability_ceiling.min(100);
    let floor = config.probability_floor.min(ceiling);
    raw.round().clamp(f64::from(floor), f64::from(ceiling)) as u32
}

fn trend(swing: f64, threshold: f64) -> Trend {
    if swing > threshold {
        Trend::Rising
    } else if swing < -threshold {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// `min(cap, round(base + |margin| * factor) + bonus)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn confidence(abs_margin: u32, has_byelection: bool, config: &PredictionConfig) -> u32 {
    let params = &config.confidence;
    let from_margin = params
        .margin_factor
        .mul_add(f64::from(abs_margin), params.base)
        .round()
        .max(0.0) as u32;
    let bonus = if has_byelection {
        params.byelection_bonus
    } else {
        0
    };

    from_margin.saturating_add(bonus).min(params.cap)
}

fn incumbency_tag(history: &ConstituencyHistory, tracked: Party) -> String {
    let holder = history.latest_actual().winner;
    if holder == tracked {
        format!("{tracked} incumbent performance")
    } else {
        format!("Anti-incumbency against {holder}")
    }
}

/// Predicts one constituency.
///
/// `news_sentiment` and `ground_report` are on a 0-100 scale favourable to
/// the tracked party. The opposing party is scored from the mirrored
/// inputs `100 - news_sentiment` and `100 - ground_report`. Out-of-range
/// inputs are not rejected; the probability clamp bounds their effect.
///
/// `config` is expected to pass [`validate_config`]. Probability bounds
/// outside `0..=100` are tightened rather than trusted.
#[must_use]
pub fn predict_constituency(
    history: &ConstituencyHistory,
    issues: &[String],
    news_sentiment: f64,
    ground_report: f64,
    config: &PredictionConfig,
) -> ConstituencyPrediction {
    let tracked = config.tracked_party;
    let opposing = config.opposing_party;
    let id = history.info.id;

    let share_2021 = epoch_shares(&history.assembly_2021, tracked, opposing);
    let share_2024 = epoch_shares(&history.federal_2024, tracked, opposing);
    let share_2025 = history
        .byelection_2025
        .as_ref()
        .filter(|_| history.has_byelection_share(tracked))
        .map(|record| epoch_shares(record, tracked, opposing));
    let has_2025_data = share_2025.is_some();

    let weights = if has_2025_data {
        &config.byelection_weights
    } else {
        &config.baseline_weights
    };

    let news_adjustment = (news_sentiment - NEUTRAL_INPUT) * config.news_adjustment_factor;
    let ground_adjustment = (ground_report - NEUTRAL_INPUT) * config.ground_adjustment_factor;
    let opposing_news_adjustment =
        ((100.0 - news_sentiment) - NEUTRAL_INPUT) * config.news_adjustment_factor;
    let opposing_ground_adjustment =
        ((100.0 - ground_report) - NEUTRAL_INPUT) * config.ground_adjustment_factor;

    let tracked_score = weighted_score(
        weights,
        share_2025.map_or(0.0, |s| s.tracked),
        share_2021.tracked,
        news_adjustment,
        ground_adjustment,
        config.adjustment_scale,
    );
    let opposing_score = weighted_score(
        weights,
        share_2025.map_or(0.0, |s| s.opposing),
        share_2021.opposing,
        opposing_news_adjustment,
        opposing_ground_adjustment,
        config.adjustment_scale,
    );

    let tracked_win_probability = clamp_probability(
        raw_probability(tracked_score, opposing_score, id),
        config,
    );
    let opposing_win_probability = 100 - tracked_win_probability;
    #[allow(clippy::cast_possible_wrap)]
    let margin = tracked_win_probability as i32 - opposing_win_probability as i32;

    let effective_swing = share_2025.map_or(share_2024.tracked, |s| s.tracked) - share_2021.tracked;

    let mut key_issues = issues.to_vec();
    key_issues.push(incumbency_tag(history, tracked));

    log::debug!(
        "{} ({id}): {tracked}={tracked_win_probability} {opposing}={opposing_win_probability} \
         byelection={has_2025_data} swing={effective_swing:.2}",
        history.info.name,
    );

    ConstituencyPrediction {
        constituency_id: id,
        constituency_name: history.info.name.clone(),
        district: history.info.district.clone(),
        tracked_party: tracked,
        opposing_party: opposing,
        tracked_win_probability,
        opposing_win_probability,
        margin,
        trend: trend(effective_swing, config.trend_threshold),
        effective_swing,
        confidence: confidence(margin.unsigned_abs(), has_2025_data, config),
        has_2025_data,
        news_sentiment_input: news_sentiment,
        ground_report_input: ground_report,
        key_issues,
        provenance: PredictionProvenance {
            share_2021,
            share_2024,
            share_2024_synthesized: history.federal_2024_synthesized,
            share_2025,
            winner_2021: history.assembly_2021.winner,
            winner_2024: history.federal_2024.winner,
            winner_2025: history.byelection_2025.as_ref().map(|r| r.winner),
        },
    }
}

/// Runs the prediction model over every constituency in a store.
#[derive(Debug, Clone)]
pub struct PredictionEngine<'a> {
    store: &'a ElectoralRecordStore,
    config: PredictionConfig,
}

impl<'a> PredictionEngine<'a> {
    /// Creates an engine over `store`.
    ///
    /// Missing 2024 records in `store` should have been synthesized with
    /// [`synthetic_swing`](crate::config::synthetic_swing) for the same
    /// config, so the swing favours the tracked party.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::InvalidConfig`] if `config` fails
    /// [`validate_config`].
    pub fn new(
        store: &'a ElectoralRecordStore,
        config: PredictionConfig,
    ) -> Result<Self, PredictionError> {
        validate_config(&config)?;
        Ok(Self { store, config })
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Seats to project onto: the config's override, else the dataset's
    /// seat count.
    #[must_use]
    pub fn total_seats(&self) -> u32 {
        self.config
            .total_seats
            .unwrap_or_else(|| self.store.total_seats())
    }

    /// Summarizes a run produced by this engine.
    #[must_use]
    pub fn summarize(&self, predictions: &[ConstituencyPrediction]) -> PredictionStats {
        summarize(predictions, self.total_seats(), &self.config)
    }

    /// News sentiment input for one constituency under the configured
    /// [`SentimentScope`].
    fn news_sentiment_for(&self, constituency_id: u32, inputs: &PredictionInputs<'_>) -> f64 {
        match self.config.sentiment_scope {
            SentimentScope::Global => inputs.news_sentiment,
            SentimentScope::PerConstituency => inputs
                .signals
                .and_then(|signals| signals.constituency(constituency_id))
                .and_then(|summary| {
                    summary.tracked_sentiment_percent(
                        self.config.tracked_party,
                        self.config.opposing_party,
                    )
                })
                .unwrap_or(inputs.news_sentiment),
        }
    }

    fn predict_history(
        &self,
        history: &ConstituencyHistory,
        inputs: &PredictionInputs<'_>,
    ) -> ConstituencyPrediction {
        let id = history.info.id;
        let ground = inputs
            .ground_overrides
            .get(&id)
            .copied()
            .unwrap_or(inputs.ground_report);

        predict_constituency(
            history,
            self.store.issues_for(&history.info.district),
            self.news_sentiment_for(id, inputs),
            ground,
            &self.config,
        )
    }

    /// Predicts a single constituency, if it exists in the store.
    #[must_use]
    pub fn predict(
        &self,
        constituency_id: u32,
        inputs: &PredictionInputs<'_>,
    ) -> Option<ConstituencyPrediction> {
        self.store
            .history(constituency_id)
            .map(|history| self.predict_history(history, inputs))
    }

    /// Predicts every constituency, in ascending id order.
    ///
    /// Ground overrides for constituencies missing from the store are
    /// ignored with a warning.
    #[must_use]
    pub fn run(&self, inputs: &PredictionInputs<'_>) -> Vec<ConstituencyPrediction> {
        for id in inputs.ground_overrides.keys() {
            if self.store.history(*id).is_none() {
                log::warn!("Ignoring ground report for unknown constituency {id}");
            }
        }

        if self.config.sentiment_scope == SentimentScope::PerConstituency
            && inputs.signals.is_none()
        {
            log::warn!("Per-constituency sentiment requested without signals, using global news input");
        }

        let predictions: Vec<ConstituencyPrediction> = self
            .store
            .histories()
            .map(|history| self.predict_history(history, inputs))
            .collect();

        log::info!(
            "Predicted {} constituencies ({} with by-election data)",
            predictions.len(),
            predictions.iter().filter(|p| p.has_2025_data).count()
        );

        predictions
    }
}
