#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for election signal classification and seat prediction.
//!
//! Results are written to stdout as JSON; logs go to stderr and are
//! controlled with `RUST_LOG`.

mod inputs;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use election_signal_aggregate::{
    ConstituencyResolver, Granularity, SignalAggregation, aggregate, ingest_signals,
};
use election_signal_electoral::ElectoralRecordStore;
use election_signal_prediction::{
    PredictionEngine, PredictionInputs, filter_and_sort, load_config, synthetic_swing,
};
use election_signal_prediction_models::{PredictionConfig, PredictionFilter, SortKey};
use serde_json::json;

#[derive(Parser)]
#[command(
    name = "election_signal",
    about = "Election signal classification and seat prediction"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Electoral dataset (`.toml` or JSON). Defaults to the embedded
    /// West Bengal reference data.
    #[arg(long)]
    records: Option<PathBuf>,
    /// Keyword lexicon override (TOML)
    #[arg(long)]
    lexicon: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    data: DataArgs,
    /// JSON array of raw feed records to classify and aggregate
    #[arg(long)]
    signals: Option<PathBuf>,
    /// Prediction config (TOML). Defaults to the built-in weights.
    #[arg(long)]
    config: Option<PathBuf>,
    /// State-wide news sentiment for the tracked party (0-100). Defaults
    /// to the sentiment derived from `--signals`, or 50.
    #[arg(long, value_parser = inputs::parse_percent)]
    news: Option<f64>,
    /// State-wide ground report score for the tracked party (0-100)
    #[arg(long, default_value = "50", value_parser = inputs::parse_percent)]
    ground: f64,
    /// Ground report for one constituency as `ID=SCORE`. Repeatable.
    #[arg(long = "ground-report", value_parser = inputs::parse_ground_override)]
    ground_reports: Vec<(u32, f64)>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one piece of text
    Classify {
        /// Text to classify
        text: String,
        /// Keyword lexicon override (TOML)
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
    /// List constituencies in the electoral dataset
    Constituencies {
        /// Electoral dataset (`.toml` or JSON)
        #[arg(long)]
        records: Option<PathBuf>,
        /// Only list constituencies in this district
        #[arg(long)]
        district: Option<String>,
    },
    /// Classify a feed and print per-constituency signal counts
    Aggregate {
        #[command(flatten)]
        data: DataArgs,
        /// JSON array of raw feed records
        #[arg(long)]
        signals: PathBuf,
        /// Also count district-only matches toward the district's
        /// representative constituency
        #[arg(long)]
        by_constituency: bool,
    },
    /// Predict every constituency
    Predict {
        #[command(flatten)]
        run: RunArgs,
        /// Which seats to show: all, tracked, opposing, or swing
        #[arg(long, default_value = "all", value_parser = inputs::parse_filter)]
        filter: PredictionFilter,
        /// Sort order: margin, tracked, opposing, or name
        #[arg(long, default_value = "margin", value_parser = inputs::parse_sort)]
        sort: SortKey,
        /// Predict a single constituency by id
        #[arg(long)]
        constituency: Option<u32>,
    },
    /// Summarize a prediction run into seat statistics
    Stats {
        #[command(flatten)]
        run: RunArgs,
    },
}

type BoxError = Box<dyn std::error::Error>;

/// Everything a prediction run needs, loaded from the command line.
struct LoadedRun {
    store: ElectoralRecordStore,
    config: PredictionConfig,
    aggregation: Option<SignalAggregation>,
}

fn load_aggregation(
    store: &ElectoralRecordStore,
    data: &DataArgs,
    signals: &std::path::Path,
    granularity: Granularity,
) -> Result<SignalAggregation, BoxError> {
    let lexicon = inputs::load_lexicon(data.lexicon.as_deref())?;
    let resolver = ConstituencyResolver::from_store(store);
    let records = inputs::load_signals(signals)?;
    Ok(aggregate(
        &ingest_signals(&records, &lexicon, &resolver),
        granularity,
    ))
}

fn load_run(args: &RunArgs) -> Result<LoadedRun, BoxError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => PredictionConfig::default(),
    };
    let store = inputs::load_store(args.data.records.as_deref(), synthetic_swing(&config))?;
    let aggregation = match &args.signals {
        Some(path) => Some(load_aggregation(
            &store,
            &args.data,
            path,
            Granularity::Constituency,
        )?),
        None => None,
    };

    Ok(LoadedRun {
        store,
        config,
        aggregation,
    })
}

impl LoadedRun {
    fn inputs<'a>(&'a self, args: &RunArgs) -> PredictionInputs<'a> {
        PredictionInputs {
            news_sentiment: inputs::news_sentiment_input(
                args.news,
                self.aggregation.as_ref(),
                &self.config,
            ),
            ground_report: args.ground,
            ground_overrides: args.ground_reports.iter().copied().collect(),
            signals: self.aggregation.as_ref(),
        }
    }

    fn engine(&self) -> Result<PredictionEngine<'_>, BoxError> {
        Ok(PredictionEngine::new(&self.store, self.config.clone())?)
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<(), BoxError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), BoxError> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { text, lexicon } => {
            let lexicon = inputs::load_lexicon(lexicon.as_deref())?;
            print_json(&lexicon.classify(&text))?;
        }
        Commands::Constituencies { records, district } => {
            let default_swing = synthetic_swing(&PredictionConfig::default());
            let store = inputs::load_store(records.as_deref(), default_swing)?;
            println!("{:<6} {:<24} DISTRICT", "ID", "NAME");
            println!("{}", "-".repeat(50));
            for info in store
                .constituencies()
                .filter(|info| district.as_ref().is_none_or(|d| info.district.eq_ignore_ascii_case(d)))
            {
                println!("{:<6} {:<24} {}", info.id, info.name, info.district);
            }
        }
        Commands::Aggregate {
            data,
            signals,
            by_constituency,
        } => {
            let default_swing = synthetic_swing(&PredictionConfig::default());
            let store = inputs::load_store(data.records.as_deref(), default_swing)?;
            let granularity = if by_constituency {
                Granularity::Constituency
            } else {
                Granularity::District
            };
            print_json(&load_aggregation(&store, &data, &signals, granularity)?)?;
        }
        Commands::Predict {
            run,
            filter,
            sort,
            constituency,
        } => {
            let loaded = load_run(&run)?;
            let engine = loaded.engine()?;
            let inputs = loaded.inputs(&run);

            if let Some(id) = constituency {
                let prediction = engine
                    .predict(id, &inputs)
                    .ok_or_else(|| format!("Unknown constituency: {id}"))?;
                print_json(&prediction)?;
            } else {
                let predictions = engine.run(&inputs);
                print_json(&filter_and_sort(
                    &predictions,
                    filter,
                    sort,
                    engine.config(),
                ))?;
            }
        }
        Commands::Stats { run } => {
            let loaded = load_run(&run)?;
            let engine = loaded.engine()?;
            let predictions = engine.run(&loaded.inputs(&run));
            let stats = engine.summarize(&predictions);
            print_json(&json!({
                "trackedParty": engine.config().tracked_party,
                "opposingParty": engine.config().opposing_party,
                "stats": stats,
            }))?;
        }
    }

    Ok(())
}
