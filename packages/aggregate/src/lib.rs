#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Constituency resolution and per-constituency signal aggregation.
//!
//! Raw feed records are classified and located one by one (a pure map with
//! no shared state), then reduced into a [`SignalAggregation`]. Signals
//! that cannot be located are never dropped: they land in the state-wide
//! bucket.

pub mod aggregation;
pub mod resolver;

use election_signal_classifier::Lexicon;
use election_signal_signal_models::{RawSignalRecord, TextSignal};

pub use aggregation::{
    Granularity, SignalAggregation, SignalSummary, aggregate, aggregate_constituency,
    aggregate_district,
};
pub use resolver::ConstituencyResolver;

/// Classifies and locates one feed record.
#[must_use]
pub fn ingest_signal(
    record: &RawSignalRecord,
    lexicon: &Lexicon,
    resolver: &ConstituencyResolver,
) -> TextSignal {
    let text = record.combined_text();
    let classification = lexicon.classify(&text);
    let location = resolver.resolve(&text);

    log::debug!(
        "{}: {:?} sentiment={} location={location:?}",
        record.source_name,
        classification.party_mentions,
        classification.sentiment,
    );

    TextSignal {
        text,
        language: record.language.clone(),
        source_name: record.source_name.clone(),
        published_at: record.published_at,
        classification,
        location,
    }
}

/// Classifies and locates every feed record, preserving input order.
#[must_use]
pub fn ingest_signals(
    records: &[RawSignalRecord],
    lexicon: &Lexicon,
    resolver: &ConstituencyResolver,
) -> Vec<TextSignal> {
    let signals: Vec<TextSignal> = records
        .iter()
        .map(|record| ingest_signal(record, lexicon, resolver))
        .collect();

    log::info!("Ingested {} signals", signals.len());
    signals
}

#[cfg(test)]
mod tests {
    use election_signal_classifier::default_lexicon;
    use election_signal_electoral::registry::reference_store;
    use election_signal_signal_models::{Party, Sentiment, SignalLocation};

    use super::*;

    fn record(title: &str, description: Option<&str>) -> RawSignalRecord {
        RawSignalRecord {
            title: title.to_string(),
            description: description.map(str::to_string),
            content: None,
            published_at: None,
            source_name: "Test Wire".to_string(),
            language: Some("en".to_string()),
        }
    }

    #[test]
    fn ingests_headline_with_description() {
        let resolver = ConstituencyResolver::from_store(&reference_store());
        let signal = ingest_signal(
            &record("Trinamool rally draws crowds", Some("Campaign in Bhabanipur")),
            default_lexicon(),
            &resolver,
        );

        assert_eq!(signal.text, "Trinamool rally draws crowds Campaign in Bhabanipur");
        assert!(signal.classification.mentions(Party::Tmc));
        assert!(signal.classification.election_related);
        assert_eq!(
            signal.location,
            SignalLocation::Constituency {
                constituency_id: 159,
                district: "Kolkata".to_string(),
            }
        );
    }

    #[test]
    fn unmatched_records_land_state_wide() {
        let store = reference_store();
        let resolver = ConstituencyResolver::from_store(&store);
        let records = vec![
            record("Local market prices steady", None),
            record("BJP wins big victory in Kolkata", None),
        ];

        let signals = ingest_signals(&records, default_lexicon(), &resolver);
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].location, SignalLocation::StateWide);
        assert_eq!(signals[0].classification.sentiment, Sentiment::Neutral);
        assert_eq!(signals[1].classification.sentiment, Sentiment::Positive);

        let aggregation = aggregate(&signals, Granularity::Constituency);
        assert_eq!(aggregation.state_wide().total_mentions, 1);
        assert_eq!(aggregation.overall().total_mentions, 2);
        assert_eq!(
            aggregation.constituency(158).map(|s| s.party(Party::Bjp).positive),
            Some(1)
        );
    }
}
