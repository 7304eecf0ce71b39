//! Prediction values for unit tests.

use election_signal_prediction_models::{
    ConstituencyPrediction, EpochShares, PredictionProvenance, Trend,
};
use election_signal_signal_models::Party;

/// A prediction with the given tracked-party probability and otherwise
/// fixed values.
pub fn prediction(id: u32, name: &str, tracked: u32) -> ConstituencyPrediction {
    let opposing = 100 - tracked;
    #[allow(clippy::cast_possible_wrap)]
    let margin = tracked as i32 - opposing as i32;

    ConstituencyPrediction {
        constituency_id: id,
        constituency_name: name.to_string(),
        district: "North".to_string(),
        tracked_party: Party::Bjp,
        opposing_party: Party::Tmc,
        tracked_win_probability: tracked,
        opposing_win_probability: opposing,
        margin,
        trend: Trend::Stable,
        effective_swing: 0.0,
        confidence: 60,
        has_2025_data: false,
        news_sentiment_input: 50.0,
        ground_report_input: 50.0,
        key_issues: Vec::new(),
        provenance: PredictionProvenance {
            share_2021: EpochShares {
                tracked: 45.0,
                opposing: 45.0,
            },
            share_2024: EpochShares {
                tracked: 47.0,
                opposing: 43.0,
            },
            share_2024_synthesized: true,
            share_2025: None,
            winner_2021: Party::Tmc,
            winner_2024: Party::Bjp,
            winner_2025: None,
        },
    }
}
