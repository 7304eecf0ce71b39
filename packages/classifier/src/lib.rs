#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Deterministic keyword classifier for party mentions and sentiment.
//!
//! Classification is a pure function of the input text: no model, no
//! network, no state. Identical text always produces an identical
//! [`Classification`].

pub mod lexicon;

use std::sync::LazyLock;

use election_signal_signal_models::Classification;

pub use lexicon::{Lexicon, NEUTRAL_SCORE, score_sentiment};

/// Errors that can occur while loading classifier dictionaries.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// A lexicon override could not be parsed.
    #[error("Lexicon parse error: {0}")]
    Lexicon(#[from] toml::de::Error),
}

static DEFAULT_LEXICON: LazyLock<Lexicon> = LazyLock::new(Lexicon::default);

/// Returns the built-in lexicon shared by [`classify`] and
/// [`is_election_related`].
#[must_use]
pub fn default_lexicon() -> &'static Lexicon {
    &DEFAULT_LEXICON
}

/// Classifies `text` against the built-in lexicon.
#[must_use]
pub fn classify(text: &str) -> Classification {
    let classification = DEFAULT_LEXICON.classify(text);
    log::trace!(
        "classified {} chars: parties={:?} sentiment={} score={:.3}",
        text.len(),
        classification.party_mentions,
        classification.sentiment,
        classification.sentiment_score,
    );
    classification
}

/// Returns `true` if `text` contains any built-in election keyword.
#[must_use]
pub fn is_election_related(text: &str) -> bool {
    DEFAULT_LEXICON.is_election_related(text)
}
