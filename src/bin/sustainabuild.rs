use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use sustainabuild::report::CarbonReport;
use sustainabuild::scenario::{legacy_catalog, seven_scenario_catalog};
use sustainabuild::{BuildingInputs, Estimator, EstimatorConfig, FormulaVariant, ReportFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sustainabuild")]
#[command(about = "SustainaBuild renovate-or-rebuild carbon estimator", long_about = None)]
struct Cli {
    /// JSON config file (environment variables still override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Formula variant: reuse-aware, material-aware or legacy
    #[arg(long, global = true)]
    variant: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimates one building and prints or saves the report
    Estimate {
        /// Building inputs as JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Output format (markdown, html, csv, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output_file: Option<PathBuf>,

        /// Save under the configured report directory, named after the input
        #[arg(long, conflicts_with = "output_file")]
        save: bool,

        /// Print a short summary instead of the full report
        #[arg(long)]
        summary: bool,
    },
    /// Lists the scenario presets of the selected variant
    Scenarios {
        /// Design lifespan applied to legacy presets (years)
        #[arg(long, default_value_t = 50.0)]
        lifespan: f64,
    },
    /// Estimates a JSON array of buildings, one JSON line per building
    Batch {
        /// Array of building inputs as JSON
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct BatchLine {
    index: usize,
    decision: Option<String>,
    recommended: Option<String>,
    savings_mj: Option<i64>,
    savings_percent: Option<f64>,
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EstimatorConfig::from_file(path)?,
        None => EstimatorConfig::from_env(),
    };

    // RUST_LOG wins over the verbose flag
    let default_filter = if config.verbose {
        "sustainabuild=debug"
    } else {
        "sustainabuild=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(name) = &cli.variant {
        config.variant = match FormulaVariant::from_key(name) {
            Some(variant) => variant,
            None => anyhow::bail!("Unsupported variant: {}", name),
        };
    }
    let estimator = Estimator::from_config(&config);

    match cli.command {
        Commands::Estimate {
            input,
            format,
            output_file,
            save,
            summary,
        } => {
            let inputs: BuildingInputs = serde_json::from_str(&std::fs::read_to_string(&input)?)?;
            let result = estimator.compute_scenarios(&inputs)?;
            let report = CarbonReport::new(&result, &inputs);

            if summary {
                report.print_summary();
                return Ok(());
            }

            let format = match format {
                Some(name) => match ReportFormat::from_name(&name) {
                    Some(format) => format,
                    None => anyhow::bail!("Unsupported format: {}", name),
                },
                None => config.report_format,
            };
            let output = report.render(format)?;

            let output_file = if save {
                config.report_format = format;
                if let Some(dir) = &config.report_dir {
                    std::fs::create_dir_all(dir)?;
                }
                let stem = input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("assessment");
                Some(config.report_path(stem))
            } else {
                output_file
            };

            if let Some(path) = output_file {
                std::fs::write(&path, output)?;
                println!("Report saved to {:?}", path);
            } else {
                println!("{}", output);
            }
        }
        Commands::Scenarios { lifespan } => {
            let presets = match estimator.variant() {
                FormulaVariant::Legacy => legacy_catalog(lifespan),
                _ => seven_scenario_catalog(),
            };
            println!("{}", estimator.variant());
            for preset in presets {
                println!(
                    "  {:<28} {:<28} {:<10} reuse {:>5.1}%  embodied x{:<6} improvement {:>5.1}%  {} yr",
                    preset.key,
                    preset.display_name,
                    preset.category.display_name(),
                    preset.reuse_rate * 100.0,
                    preset.embodied_factor,
                    preset.operational_improvement * 100.0,
                    preset.lifespan_years
                );
            }
        }
        Commands::Batch { input } => {
            let buildings: Vec<BuildingInputs> =
                serde_json::from_str(&std::fs::read_to_string(&input)?)?;

            for (index, outcome) in estimator.estimate_batch(&buildings).into_iter().enumerate() {
                let line = match outcome {
                    Ok(result) => BatchLine {
                        index,
                        decision: Some(result.decision.display_name().to_string()),
                        recommended: Some(result.recommended_scenario),
                        savings_mj: Some(result.savings),
                        savings_percent: Some(result.savings_percent),
                        error: None,
                    },
                    Err(err) => BatchLine {
                        index,
                        decision: None,
                        recommended: None,
                        savings_mj: None,
                        savings_percent: None,
                        error: Some(err.to_string()),
                    },
                };
                println!("{}", serde_json::to_string(&line)?);
            }
        }
    }

    Ok(())
}
