use analytics::{KpiEngine, KpiOutput};
use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{OutputFormat, ScenarioOverrides, Settings};
use core_types::RawInputs;
use std::path::PathBuf;

mod export;

use export::ExportEnvelope;

/// The main entry point for the referral KPI calculator.
fn main() {
    // A missing .env file is fine; the settings have defaults.
    dotenvy::dotenv().ok();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let settings = configuration::load_settings().context("Failed to load config.toml")?;
    // Keeps the file writer flushing until the process exits.
    let _guard = configuration::init_tracing(&settings.logging)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Compute(args) => handle_compute(args, &settings),
        Commands::Series(args) => handle_series(args, &settings),
        Commands::Scenario => {
            for line in configuration::scenario_to_toml_lines(&RawInputs::demo()) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// KPIs, breakeven and lifecycle margins for a referral-fee lead business.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the KPI report for a scenario.
    Compute(ComputeArgs),
    /// Print net profit and ROI against keeper volume as a table.
    Series(SeriesArgs),
    /// Print the built-in demo scenario as TOML.
    Scenario,
}

#[derive(Parser)]
struct ScenarioArgs {
    /// A TOML scenario file. The demo scenario is used when omitted.
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[command(flatten)]
    overrides: ScenarioOverrides,
}

#[derive(Parser)]
struct ComputeArgs {
    #[command(flatten)]
    input: ScenarioArgs,

    /// Output format. Defaults to `output.format` from config.toml.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Also write both chart specs to this file as JSON.
    #[arg(long)]
    chart_json: Option<PathBuf>,
}

#[derive(Parser)]
struct SeriesArgs {
    #[command(flatten)]
    input: ScenarioArgs,

    /// Sample every N keepers. Defaults to `output.table_step` from config.toml.
    #[arg(long)]
    step: Option<u32>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads the scenario, applies command-line overrides and runs the engine.
fn compute(input: &ScenarioArgs) -> anyhow::Result<KpiOutput> {
    let mut raw = configuration::load_scenario(input.scenario.as_deref())?;
    input.overrides.apply(&mut raw);

    Ok(KpiEngine::new().compute(&raw)?)
}

fn handle_compute(args: ComputeArgs, settings: &Settings) -> anyhow::Result<()> {
    let output = compute(&args.input)?;
    let charts = charting::build_charts(&output);

    if let Some(path) = &args.chart_json {
        charting::write_json(&charts, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    match args.format.unwrap_or(settings.output.format) {
        OutputFormat::Text => print!("{}", output.report_text()),
        OutputFormat::Json => {
            let envelope = ExportEnvelope::new(output, charts);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }
    Ok(())
}

fn handle_series(args: SeriesArgs, settings: &Settings) -> anyhow::Result<()> {
    let output = compute(&args.input)?;
    let step = args.step.unwrap_or(settings.output.table_step);

    println!(
        "Keepers 0..={} (current {}, breakeven {})",
        output.markers.xmax,
        output.markers.current_keepers,
        output
            .markers
            .breakeven_keepers
            .map_or_else(|| "off-axis".to_string(), |b| b.to_string())
    );
    println!("{}", charting::series_table(&output, step));
    Ok(())
}
