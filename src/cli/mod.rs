//! Command-line parsing for the construction cost estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ProjectRequest, RegressorKind, TrainingConfig};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "buildcost", version, about = "Construction cost estimator (INR)")]
pub struct Cli {
    /// Directory holding `materials.json` and `projects.json`.
    #[arg(long, global = true, env = "BUILDCOST_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Base URL of the web layer's JSON API; overrides `--data-dir` when set.
    #[arg(long, global = true, env = "BUILDCOST_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the cost of one project.
    Estimate(EstimateArgs),
    /// Estimate every project in a JSON array of requests.
    Batch(BatchArgs),
    /// List the material catalog.
    Materials(MaterialsArgs),
    /// Show one catalog entry.
    Material {
        /// Catalog id.
        id: u32,
    },
    /// Re-render an estimate saved with `estimate --export`.
    Show(ShowArgs),
}

/// Options for a single estimate.
#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    /// Project type (residential, commercial, industrial, renovation, interior).
    #[arg(long = "type", value_name = "TYPE")]
    pub project_type: String,

    /// Built-up area in sq ft (100-10000).
    #[arg(long)]
    pub area: f64,

    /// Number of floors.
    #[arg(long, default_value_t = 1)]
    pub floors: i64,

    /// Quality tier (basic, standard, premium, luxury).
    #[arg(long, default_value = "standard")]
    pub quality: String,

    /// Selected material ids, comma separated.
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub materials: Vec<i64>,

    #[command(flatten)]
    pub training: TrainingArgs,

    /// Print the web layer's JSON envelope instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Disable the breakdown bar chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,

    /// Export the estimate (request + result) to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the breakdown to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,
}

impl EstimateArgs {
    pub fn request(&self) -> ProjectRequest {
        ProjectRequest {
            project_type: self.project_type.clone(),
            area: self.area,
            floors: self.floors,
            quality: self.quality.clone(),
            selected_materials: self.materials.clone(),
        }
    }
}

/// Options for a batch run.
#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// JSON file with an array of requests.
    #[arg(long, value_name = "JSON")]
    pub input: PathBuf,

    /// Write per-request results to this JSON file.
    #[arg(long, value_name = "JSON")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub training: TrainingArgs,
}

/// Options for re-rendering a saved report.
#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Report JSON written by `estimate --export`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,

    /// Disable the breakdown bar chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

/// Options for the catalog listing.
#[derive(Debug, Args, Clone)]
pub struct MaterialsArgs {
    /// Only list materials in this category (e.g. "Tiles & Flooring").
    #[arg(long)]
    pub category: Option<String>,
}

/// Regressor training knobs.
#[derive(Debug, Args, Clone)]
pub struct TrainingArgs {
    /// Regression strategy.
    #[arg(long, value_enum, default_value_t = RegressorKind::Mlp)]
    pub regressor: RegressorKind,

    /// Random seed for synthetic samples and weight init (omit for a fresh draw).
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 100)]
    pub epochs: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 0.01)]
    pub learning_rate: f64,

    /// Number of synthetic training samples.
    #[arg(long, default_value_t = 100)]
    pub synthetic: usize,
}

impl TrainingArgs {
    pub fn config(&self) -> TrainingConfig {
        TrainingConfig {
            regressor: self.regressor,
            epochs: self.epochs,
            batch_size: self.batch_size,
            learning_rate: self.learning_rate,
            synthetic_count: self.synthetic,
            seed: self.seed,
            ..TrainingConfig::default()
        }
    }
}
