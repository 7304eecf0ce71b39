#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Constituency win-probability engine and the views built on its output.
//!
//! [`PredictionEngine`] joins each constituency's electoral history with
//! news sentiment and ground-report inputs to produce a
//! [`ConstituencyPrediction`](election_signal_prediction_models::ConstituencyPrediction).
//! [`summarize`] reduces a run into state-wide seat statistics and
//! [`filter_and_sort`] produces filtered views for display.
//!
//! A prediction run never fails. Errors only arise when loading
//! configuration.

pub mod config;
pub mod engine;
pub mod filter;
pub mod stats;

#[cfg(test)]
mod fixtures;

use thiserror::Error;

pub use config::{load_config, parse_config_toml, synthetic_swing, validate_config};
pub use engine::{PredictionEngine, PredictionInputs, predict_constituency};
pub use filter::filter_and_sort;
pub use stats::{SeatCall, seat_call, summarize};

/// Errors that can occur while loading prediction configuration.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The configuration parsed but holds unusable values.
    #[error("Invalid prediction config: {message}")]
    InvalidConfig {
        /// Which value is wrong and why.
        message: String,
    },

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reading a config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
