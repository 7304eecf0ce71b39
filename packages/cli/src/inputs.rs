//! File loading and argument parsing for the CLI.

use std::path::Path;

use election_signal_aggregate::SignalAggregation;
use election_signal_classifier::{Lexicon, default_lexicon};
use election_signal_electoral::{
    ElectoralRecordStore, SyntheticSwing, parse_dataset_json, parse_dataset_toml,
    registry::reference_dataset,
};
use election_signal_prediction::engine::NEUTRAL_INPUT;
use election_signal_prediction_models::{PredictionConfig, PredictionFilter, SortKey};
use election_signal_signal_models::RawSignalRecord;

type BoxError = Box<dyn std::error::Error>;

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Loads an electoral dataset (`.toml` or JSON), or the embedded
/// reference dataset when no path is given. Missing 2024 records are
/// synthesized with `swing`.
pub fn load_store(
    path: Option<&Path>,
    swing: SyntheticSwing,
) -> Result<ElectoralRecordStore, BoxError> {
    let Some(path) = path else {
        log::debug!("Using embedded reference dataset");
        return Ok(ElectoralRecordStore::with_synthetic_swing(
            reference_dataset(),
            swing,
        )?);
    };

    let contents = std::fs::read_to_string(path)?;
    let dataset = if has_extension(path, "toml") {
        parse_dataset_toml(&contents)?
    } else {
        parse_dataset_json(&contents)?
    };

    let store = ElectoralRecordStore::with_synthetic_swing(dataset, swing)?;
    log::info!(
        "Loaded {} constituencies from {}",
        store.len(),
        path.display()
    );
    Ok(store)
}

/// Loads a keyword lexicon override, or the built-in lexicon.
pub fn load_lexicon(path: Option<&Path>) -> Result<Lexicon, BoxError> {
    match path {
        Some(path) => Ok(Lexicon::from_toml_str(&std::fs::read_to_string(path)?)?),
        None => Ok(default_lexicon().clone()),
    }
}

/// Loads a JSON array of raw feed records.
pub fn load_signals(path: &Path) -> Result<Vec<RawSignalRecord>, BoxError> {
    let records: Vec<RawSignalRecord> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    log::info!("Read {} feed records from {}", records.len(), path.display());
    Ok(records)
}

/// State-wide news sentiment for a run: the explicit `--news` value if
/// given, else the tracked-party sentiment of the aggregated feed, else
/// neutral.
pub fn news_sentiment_input(
    explicit: Option<f64>,
    aggregation: Option<&SignalAggregation>,
    config: &PredictionConfig,
) -> f64 {
    let derived = aggregation.and_then(|aggregation| {
        aggregation
            .overall()
            .tracked_sentiment_percent(config.tracked_party, config.opposing_party)
    });
    let news_sentiment = explicit.or(derived).unwrap_or(NEUTRAL_INPUT);
    log::info!("News sentiment input: {news_sentiment:.1}");
    news_sentiment
}

/// Parses a 0-100 score.
pub fn parse_percent(value: &str) -> Result<f64, String> {
    let score: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("'{value}' is not a number: {e}"))?;
    if (0.0..=100.0).contains(&score) {
        Ok(score)
    } else {
        Err(format!("{score} is outside 0-100"))
    }
}

/// Parses a per-constituency ground report of the form `ID=SCORE`.
pub fn parse_ground_override(value: &str) -> Result<(u32, f64), String> {
    let (id, score) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=SCORE, got '{value}'"))?;
    let id: u32 = id
        .trim()
        .parse()
        .map_err(|e| format!("invalid constituency id '{id}': {e}"))?;
    Ok((id, parse_percent(score)?))
}

/// Parses a `--filter` value.
pub fn parse_filter(value: &str) -> Result<PredictionFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown filter '{value}' (expected all, tracked, opposing, or swing)"))
}

/// Parses a `--sort` value.
pub fn parse_sort(value: &str) -> Result<SortKey, String> {
    value
        .parse()
        .map_err(|_| format!("unknown sort key '{value}' (expected margin, tracked, opposing, or name)"))
}
