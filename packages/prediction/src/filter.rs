//! Filtered and sorted views of a prediction run.

use std::cmp::Reverse;

use election_signal_prediction_models::{
    ConstituencyPrediction, PredictionConfig, PredictionFilter, SortKey,
};

use crate::stats::{SeatCall, seat_call};

fn keep(prediction: &ConstituencyPrediction, filter: PredictionFilter, config: &PredictionConfig) -> bool {
    match filter {
        PredictionFilter::All => true,
        PredictionFilter::Tracked => seat_call(prediction, config) == SeatCall::TrackedLeading,
        PredictionFilter::Opposing => seat_call(prediction, config) == SeatCall::OpposingLeading,
        PredictionFilter::Swing => seat_call(prediction, config) == SeatCall::Swing,
    }
}

/// Returns a new list holding the predictions that pass `filter`, ordered
/// by `sort`. The input is left untouched.
///
/// Margin sorts by descending absolute margin, the probability keys sort
/// highest first, and name sorts A to Z. Ties keep input order.
#[must_use]
pub fn filter_and_sort(
    predictions: &[ConstituencyPrediction],
    filter: PredictionFilter,
    sort: SortKey,
    config: &PredictionConfig,
) -> Vec<ConstituencyPrediction> {
    let mut view: Vec<ConstituencyPrediction> = predictions
        .iter()
        .filter(|p| keep(p, filter, config))
        .cloned()
        .collect();

    match sort {
        SortKey::Margin => view.sort_by_key(|p| Reverse(p.abs_margin())),
        SortKey::Tracked => view.sort_by_key(|p| Reverse(p.tracked_win_probability)),
        SortKey::Opposing => view.sort_by_key(|p| Reverse(p.opposing_win_probability)),
        SortKey::Name => view.sort_by(|a, b| a.constituency_name.cmp(&b.constituency_name)),
    }

    view
}

#[cfg(test)]
mod tests {
    use crate::fixtures::prediction;

    use super::*;

    fn sample() -> Vec<ConstituencyPrediction> {
        vec![
            prediction(1, "Delta", 52),
            prediction(2, "Alpha", 70),
            prediction(3, "Charlie", 25),
            prediction(4, "Bravo", 48),
            prediction(5, "Echo", 60),
        ]
    }

    fn ids(view: &[ConstituencyPrediction]) -> Vec<u32> {
        view.iter().map(|p| p.constituency_id).collect()
    }

    #[test]
    fn margin_sort_uses_absolute_value() {
        let config = PredictionConfig::default();
        let view = filter_and_sort(&sample(), PredictionFilter::All, SortKey::Margin, &config);
        // |40|, |-50|, |4|, |-4|, |20| -> 3, 2, 5, then 1 and 4 in input order.
        assert_eq!(ids(&view), vec![3, 2, 5, 1, 4]);
    }

    #[test]
    fn name_sort_is_ascending() {
        let config = PredictionConfig::default();
        let view = filter_and_sort(&sample(), PredictionFilter::All, SortKey::Name, &config);
        assert_eq!(ids(&view), vec![2, 4, 3, 1, 5]);
    }

    #[test]
    fn probability_sorts_are_descending() {
        let config = PredictionConfig::default();
        let tracked = filter_and_sort(&sample(), PredictionFilter::All, SortKey::Tracked, &config);
        assert_eq!(ids(&tracked), vec![2, 5, 1, 4, 3]);

        let opposing = filter_and_sort(&sample(), PredictionFilter::All, SortKey::Opposing, &config);
        assert_eq!(ids(&opposing), vec![3, 4, 1, 5, 2]);
    }

    #[test]
    fn filters_match_seat_calls() {
        let config = PredictionConfig::default();
        let predictions = sample();

        let tracked = filter_and_sort(&predictions, PredictionFilter::Tracked, SortKey::Name, &config);
        assert_eq!(ids(&tracked), vec![2, 5]);

        let opposing =
            filter_and_sort(&predictions, PredictionFilter::Opposing, SortKey::Name, &config);
        assert_eq!(ids(&opposing), vec![3]);

        let swing = filter_and_sort(&predictions, PredictionFilter::Swing, SortKey::Name, &config);
        assert_eq!(ids(&swing), vec![4, 1]);

        assert_eq!(tracked.len() + opposing.len() + swing.len(), predictions.len());
    }

    #[test]
    fn input_is_not_mutated() {
        let config = PredictionConfig::default();
        let predictions = sample();
        let before = predictions.clone();

        let _ = filter_and_sort(&predictions, PredictionFilter::Swing, SortKey::Margin, &config);
        assert_eq!(predictions, before);
    }
}
