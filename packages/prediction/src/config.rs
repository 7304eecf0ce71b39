//! Loading and validating [`PredictionConfig`].

use std::path::Path;

use election_signal_electoral::SyntheticSwing;
use election_signal_prediction_models::{PredictionConfig, WeightProfile};

use crate::PredictionError;

/// Parses a [`PredictionConfig`] from TOML and validates it. Missing keys
/// take their default values.
///
/// # Errors
///
/// Returns [`PredictionError::Toml`] on malformed TOML and
/// [`PredictionError::InvalidConfig`] if validation fails.
pub fn parse_config_toml(toml_str: &str) -> Result<PredictionConfig, PredictionError> {
    let config: PredictionConfig = toml::de::from_str(toml_str)?;
    validate_config(&config)?;
    Ok(config)
}

/// Reads and parses a config file.
///
/// # Errors
///
/// Returns [`PredictionError::Io`] if the file cannot be read, otherwise
/// see [`parse_config_toml`].
pub fn load_config(path: &Path) -> Result<PredictionConfig, PredictionError> {
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config_toml(&contents)?;
    log::info!("Loaded prediction config from {}", path.display());
    Ok(config)
}

fn invalid(message: impl Into<String>) -> PredictionError {
    PredictionError::InvalidConfig {
        message: message.into(),
    }
}

fn validate_weights(name: &str, weights: &WeightProfile) -> Result<(), PredictionError> {
    let values = [
        weights.byelection_2025,
        weights.assembly_2021,
        weights.news_sentiment,
        weights.ground_report,
    ];
    if values.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(invalid(format!(
            "{name} weights must be finite and non-negative"
        )));
    }
    if weights.total() <= 0.0 {
        return Err(invalid(format!("{name} weights must not all be zero")));
    }
    Ok(())
}

/// Checks that `config` describes a usable model.
///
/// # Errors
///
/// Returns [`PredictionError::InvalidConfig`] naming the first offending
/// value.
pub fn validate_config(config: &PredictionConfig) -> Result<(), PredictionError> {
    if config.tracked_party == config.opposing_party {
        return Err(invalid(format!(
            "tracked and opposing party are both {}",
            config.tracked_party
        )));
    }

    validate_weights("byelection", &config.byelection_weights)?;
    validate_weights("baseline", &config.baseline_weights)?;

    let factors = [
        config.news_adjustment_factor,
        config.ground_adjustment_factor,
        config.adjustment_scale,
        config.trend_threshold,
        config.confidence.base,
        config.confidence.margin_factor,
        config.synthetic_swing_points,
    ];
    if factors.iter().any(|f| !f.is_finite() || *f < 0.0) {
        return Err(invalid(
            "adjustment factors, thresholds, swing points, and confidence parameters must be finite and non-negative",
        ));
    }

    if config.probability_floor > config.probability_ceiling || config.probability_ceiling > 100 {
        return Err(invalid(format!(
            "probability bounds [{}, {}] must satisfy floor <= ceiling <= 100",
            config.probability_floor, config.probability_ceiling
        )));
    }

    if config.confidence.cap > 100 {
        return Err(invalid("confidence cap must be at most 100"));
    }

    if config.total_seats == Some(0) {
        return Err(invalid("total_seats must be positive when set"));
    }

    if !(0.0..=1.0).contains(&config.projection_band) {
        return Err(invalid(format!(
            "projection band {} must be within [0, 1]",
            config.projection_band
        )));
    }

    Ok(())
}

/// The swing used to synthesize missing 2024 records: the tracked party
/// gains [`PredictionConfig::synthetic_swing_points`] at the opposing
/// party's expense.
#[must_use]
pub const fn synthetic_swing(config: &PredictionConfig) -> SyntheticSwing {
    SyntheticSwing {
        gaining: config.tracked_party,
        losing: config.opposing_party,
        points: config.synthetic_swing_points,
    }
}

#[cfg(test)]
mod tests {
    use election_signal_electoral::{ElectoralRecordStore, parse_dataset_toml};
    use election_signal_prediction_models::SentimentScope;
    use election_signal_signal_models::Party;

    use super::*;

    #[test]
    fn empty_toml_is_default_config() {
        let config = parse_config_toml("").unwrap();
        assert_eq!(config, PredictionConfig::default());
        assert!(validate_config(&PredictionConfig::default()).is_ok());
    }

    #[test]
    fn parses_custom_parties_and_scope() {
        let config = parse_config_toml(
            r#"
            tracked_party = "CONGRESS"
            opposing_party = "TMC"
            sentiment_scope = "per_constituency"
            swing_margin_threshold = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.tracked_party, Party::Congress);
        assert_eq!(config.sentiment_scope, SentimentScope::PerConstituency);
        assert_eq!(config.swing_margin_threshold, 6);
    }

    #[test]
    fn rejects_same_party_on_both_sides() {
        let err = parse_config_toml(r#"opposing_party = "BJP""#).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_inverted_probability_bounds() {
        let err = parse_config_toml("probability_floor = 80").unwrap_err();
        assert!(err.to_string().contains("floor <= ceiling"));
    }

    #[test]
    fn rejects_negative_weights() {
        let err = parse_config_toml(
            r"
            [byelection_weights]
            news_sentiment = -0.1
            ",
        )
        .unwrap_err();
        assert!(err.to_string().contains("byelection"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = parse_config_toml("probability_floor = [").unwrap_err();
        assert!(matches!(err, PredictionError::Toml(_)));
    }

    #[test]
    fn rejects_zero_seat_override() {
        let err = parse_config_toml("total_seats = 0").unwrap_err();
        assert!(err.to_string().contains("total_seats"));
    }

    #[test]
    fn synthetic_swing_follows_configured_parties() {
        let config = parse_config_toml(
            r#"
            tracked_party = "TMC"
            opposing_party = "BJP"
            synthetic_swing_points = 3.5
            "#,
        )
        .unwrap();
        let swing = synthetic_swing(&config);
        assert_eq!(swing.gaining, Party::Tmc);
        assert_eq!(swing.losing, Party::Bjp);

        let dataset = parse_dataset_toml(
            r#"
            state = "Test"
            totalSeats = 10

            [[records]]
            constituencyId = 1
            constituencyName = "Hilltop"
            district = "North"
            epoch = "E2021"
            partyShare = { BJP = 48.0, TMC = 44.0 }
            winner = "BJP"
            margin = 4.0
            totalVotes = 1000
            "#,
        )
        .unwrap();
        let store = ElectoralRecordStore::with_synthetic_swing(dataset, swing).unwrap();
        let synthesized = &store.history(1).unwrap().federal_2024;

        assert!((synthesized.share(Party::Tmc) - 47.5).abs() < 1e-9);
        assert!((synthesized.share(Party::Bjp) - 44.5).abs() < 1e-9);
        assert_eq!(synthesized.winner, Party::Tmc);
    }
}
