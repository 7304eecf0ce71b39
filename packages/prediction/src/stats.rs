//! State-wide statistics over a prediction run.

use election_signal_prediction_models::{
    ConstituencyPrediction, PredictionConfig, PredictionStats, SeatProjection, SeatRange,
};

/// Which exclusive bucket a prediction falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatCall {
    /// Margin within the swing threshold.
    Swing,
    /// Tracked party clearly ahead.
    TrackedLeading,
    /// Opposing party clearly ahead.
    OpposingLeading,
}

/// Buckets one prediction. Every prediction gets exactly one call.
#[must_use]
pub const fn seat_call(prediction: &ConstituencyPrediction, config: &PredictionConfig) -> SeatCall {
    if prediction.abs_margin() <= config.swing_margin_threshold {
        SeatCall::Swing
    } else if prediction.tracked_win_probability > 50 {
        SeatCall::TrackedLeading
    } else {
        SeatCall::OpposingLeading
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn project(leading: u32, scale: f64, band: f64) -> SeatRange {
    let estimate = f64::from(leading) * scale;
    SeatRange {
        low: (estimate * (1.0 - band)).round().max(0.0) as u32,
        high: (estimate * (1.0 + band)).round().max(0.0) as u32,
    }
}

/// Summarizes a prediction run.
///
/// Leading counts are extrapolated from the sample to `total_seats` and
/// reported as a band of `1 - projection_band` to `1 + projection_band`
/// times the estimate. An empty run projects zero seats.
/// [`PredictionEngine::summarize`](crate::PredictionEngine::summarize)
/// picks `total_seats` from the config or the dataset.
#[must_use]
pub fn summarize(
    predictions: &[ConstituencyPrediction],
    total_seats: u32,
    config: &PredictionConfig,
) -> PredictionStats {
    let mut stats = PredictionStats::default();

    for prediction in predictions {
        stats.total += 1;
        match seat_call(prediction, config) {
            SeatCall::Swing => stats.swing += 1,
            SeatCall::TrackedLeading => {
                stats.tracked_leading += 1;
                if prediction.tracked_win_probability >= config.safe_seat_probability {
                    stats.safe_tracked += 1;
                }
            }
            SeatCall::OpposingLeading => {
                stats.opposing_leading += 1;
                if prediction.opposing_win_probability >= config.safe_seat_probability {
                    stats.safe_opposing += 1;
                }
            }
        }
    }

    let scale = if stats.total == 0 {
        0.0
    } else {
        f64::from(total_seats) / f64::from(stats.total)
    };

    stats.projection = SeatProjection {
        total_seats,
        sample_size: stats.total,
        tracked: project(stats.tracked_leading, scale, config.projection_band),
        opposing: project(stats.opposing_leading, scale, config.projection_band),
    };

    log::info!(
        "{} predictions: {} tracked leading, {} opposing leading, {} swing",
        stats.total,
        stats.tracked_leading,
        stats.opposing_leading,
        stats.swing
    );

    stats
}

#[cfg(test)]
mod tests {
    use crate::fixtures::prediction;

    use super::*;

    #[test]
    fn buckets_partition_every_probability() {
        let config = PredictionConfig::default();
        let predictions: Vec<_> = (0..=100)
            .map(|p| prediction(p, &format!("Seat {p}"), p))
            .collect();

        let stats = summarize(&predictions, 294, &config);
        assert_eq!(stats.total, 101);
        assert_eq!(
            stats.swing + stats.tracked_leading + stats.opposing_leading,
            stats.total
        );
        assert!(stats.safe_tracked <= stats.tracked_leading);
        assert!(stats.safe_opposing <= stats.opposing_leading);
    }

    #[test]
    fn swing_boundary_is_inclusive() {
        let config = PredictionConfig::default();
        // 55/45 has margin 10, 56/44 has margin 12.
        assert_eq!(seat_call(&prediction(1, "A", 55), &config), SeatCall::Swing);
        assert_eq!(seat_call(&prediction(2, "B", 45), &config), SeatCall::Swing);
        assert_eq!(
            seat_call(&prediction(3, "C", 56), &config),
            SeatCall::TrackedLeading
        );
        assert_eq!(
            seat_call(&prediction(4, "D", 44), &config),
            SeatCall::OpposingLeading
        );
    }

    #[test]
    fn safe_seats_refine_leading_seats() {
        let config = PredictionConfig {
            safe_seat_probability: 60,
            ..PredictionConfig::default()
        };
        let predictions = vec![
            prediction(1, "A", 56),
            prediction(2, "B", 60),
            prediction(3, "C", 75),
            prediction(4, "D", 30),
            prediction(5, "E", 42),
            prediction(6, "F", 50),
        ];

        let stats = summarize(&predictions, 294, &config);
        assert_eq!(stats.tracked_leading, 3);
        assert_eq!(stats.safe_tracked, 2);
        assert_eq!(stats.opposing_leading, 2);
        assert_eq!(stats.safe_opposing, 1);
        assert_eq!(stats.swing, 1);
    }

    #[test]
    fn projects_band_around_scaled_estimate() {
        let config = PredictionConfig::default();
        let predictions = vec![
            prediction(1, "A", 70),
            prediction(2, "B", 70),
            prediction(3, "C", 30),
            prediction(4, "D", 52),
        ];

        let stats = summarize(&predictions, 294, &config);
        let projection = stats.projection;
        assert_eq!(projection.sample_size, 4);
        assert_eq!(projection.total_seats, 294);
        // 2 of 4 leading scales to 147 seats.
        assert_eq!(projection.tracked, SeatRange { low: 125, high: 169 });
        // 1 of 4 scales to 73.5 seats.
        assert_eq!(projection.opposing, SeatRange { low: 62, high: 85 });
        assert!(projection.tracked.low <= projection.tracked.high);
    }

    #[test]
    fn empty_run_projects_nothing() {
        let stats = summarize(&[], 294, &PredictionConfig::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.projection.tracked, SeatRange::default());
        assert_eq!(stats.projection.opposing, SeatRange::default());
        assert_eq!(stats.projection.total_seats, 294);
    }

    #[test]
    fn projection_scales_to_given_seat_count() {
        let config = PredictionConfig::default();
        let predictions = vec![prediction(1, "A", 30), prediction(2, "B", 50)];

        let stats = summarize(&predictions, 10, &config);
        assert_eq!(stats.projection.total_seats, 10);
        // 1 of 2 scales to 5 seats.
        assert_eq!(stats.projection.opposing, SeatRange { low: 4, high: 6 });
        assert_eq!(stats.projection.tracked, SeatRange::default());
    }
}
