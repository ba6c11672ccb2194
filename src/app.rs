//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments
//! - loads catalog + history from the configured source
//! - runs estimates and prints reports/plots
//! - writes optional exports
//! - re-renders saved reports

use clap::Parser;
use serde::Serialize;

use crate::cli::{BatchArgs, Cli, Command, EstimateArgs, MaterialsArgs, ShowArgs};
use crate::data::ApiEnvelope;
use crate::domain::{MaterialCategory, ProjectRequest};
use crate::error::AppError;
use crate::estimate::{estimate_batch, estimate_spec, validate};
use crate::io::EstimateReport;

pub mod pipeline;

use pipeline::DataSettings;

/// Entry point for the `buildcost` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    crate::logging::init_tracing();

    let cli = Cli::parse();
    let settings = DataSettings {
        data_dir: &cli.data_dir,
        api_url: cli.api_url.as_deref(),
    };

    match &cli.command {
        Command::Estimate(args) => handle_estimate(args, settings),
        Command::Batch(args) => handle_batch(args, settings),
        Command::Materials(args) => handle_materials(args, settings),
        Command::Material { id } => handle_material(*id, settings),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_estimate(args: &EstimateArgs, settings: DataSettings<'_>) -> Result<(), AppError> {
    let request = args.request();
    let report = match run_estimate(&request, args, settings) {
        Ok(report) => report,
        Err(e) => {
            if args.json {
                print_json(&ApiEnvelope::<()>::err(e.to_string()))?;
            }
            return Err(e);
        }
    };

    if args.json {
        print_json(&ApiEnvelope::ok(&report.result))?;
    }
    if let Some(path) = &args.export {
        crate::io::write_report_json(path, &report)?;
    }
    if let Some(path) = &args.export_csv {
        crate::io::write_breakdown_csv(path, &report.result)?;
    }
    Ok(())
}

/// Validate, train if needed, estimate, print the text report (unless in
/// JSON mode) and hand back the exportable record.
fn run_estimate(
    request: &ProjectRequest,
    args: &EstimateArgs,
    settings: DataSettings<'_>,
) -> Result<EstimateReport, AppError> {
    // Reject bad input before touching the data source or the model.
    let spec = validate(request)?;

    let ctx = pipeline::build_context(settings, args.training.config())?;
    let result = estimate_spec(&ctx, &spec)?;

    if !args.json {
        let materials = ctx.catalog().resolve(&spec.selected_materials);
        println!("{}", crate::report::format_estimate(&spec, &result, &materials));
        if let Some(summary) = ctx.training_summary() {
            println!("{}", crate::report::format_training(&summary));
        }
        if !args.no_plot {
            println!();
            print!("{}", crate::plot::render_breakdown_bars(&result.breakdown, args.width));
        }
    }

    Ok(EstimateReport::new(request.clone(), result))
}

fn handle_batch(args: &BatchArgs, settings: DataSettings<'_>) -> Result<(), AppError> {
    let requests = crate::io::read_requests(&args.input)?;
    let ctx = pipeline::build_context(settings, args.training.config())?;

    let results = estimate_batch(&ctx, &requests);
    let rows: Vec<_> = requests.into_iter().zip(results).collect();

    println!("{}", crate::report::format_batch(&rows));
    if let Some(path) = &args.output {
        crate::io::write_batch_json(path, &rows)?;
    }
    Ok(())
}

fn handle_materials(args: &MaterialsArgs, settings: DataSettings<'_>) -> Result<(), AppError> {
    let catalog = pipeline::load_catalog(settings)?;
    let listing = match &args.category {
        Some(name) => {
            let category = MaterialCategory::from(name.as_str());
            crate::report::format_materials(catalog.in_category(&category))
        }
        None => crate::report::format_materials(catalog.iter()),
    };
    print!("{listing}");
    Ok(())
}

fn handle_material(id: u32, settings: DataSettings<'_>) -> Result<(), AppError> {
    let catalog = pipeline::load_catalog(settings)?;
    print!("{}", crate::report::format_material(catalog.get(id)?));
    Ok(())
}

/// Saved reports carry their own result, so no data source or model is needed.
fn handle_show(args: &ShowArgs) -> Result<(), AppError> {
    let report = crate::io::read_report_json(&args.report)?;
    println!("{}", crate::report::format_report(&report));
    if !args.no_plot {
        print!("{}", crate::plot::render_breakdown_bars(&report.result.breakdown, args.width));
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::data(format!("Failed to encode JSON output: {e}")))?;
    println!("{text}");
    Ok(())
}
