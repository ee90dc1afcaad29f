//! Clinical criteria command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use octofhir_logic::cli::output::{self, OutputFormat};
use octofhir_logic::cli::{evaluate, read_criteria, validate};
use octofhir_logic::eval::options::DEFAULT_MAX_DEPTH;
use octofhir_logic::EvaluationOptions;
use std::fs;
use std::path::PathBuf;

/// Clinical criteria command-line tool
#[derive(Parser)]
#[command(name = "logic")]
#[command(author, version, about = "Clinical criteria tools", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::JsonPretty, global = true)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate criteria against observation data
    Evaluate {
        /// Criteria text, e.g. '"CD4 COUNT" > 200'
        criteria: Option<String>,

        /// Read the criteria from a file instead
        #[arg(short, long, conflicts_with = "criteria")]
        input: Option<PathBuf>,

        /// Concept dictionary (JSON)
        #[arg(short, long)]
        concepts: PathBuf,

        /// Observation records (JSON)
        #[arg(short, long = "data")]
        data: PathBuf,

        /// Only consider observations of this subject
        #[arg(short, long)]
        subject: Option<String>,

        /// Report matching subjects instead of observations
        #[arg(long, conflicts_with = "subject")]
        cohort: bool,

        /// Deepest criteria nesting accepted
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Keep observations outside a leaf's time window if the data returns them
        #[arg(long)]
        ignore_windows: bool,
    },

    /// Check criteria syntax and types against a concept dictionary
    Validate {
        /// Criteria texts to validate
        criteria: Vec<String>,

        /// File with one criteria per line ('#' starts a comment)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Concept dictionary (JSON)
        #[arg(short, long)]
        concepts: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    if let Err(e) = run(cli).await {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Evaluate {
            criteria,
            input,
            concepts,
            data,
            subject,
            cohort,
            max_depth,
            ignore_windows,
        } => {
            let config = evaluate::EvaluateConfig {
                criteria: read_criteria(criteria, input.as_deref())?,
                concepts,
                observations: data,
                subject,
                cohort,
                options: EvaluationOptions::default()
                    .with_max_depth(max_depth)
                    .with_enforce_windows(!ignore_windows),
                output_format: cli.format,
                output_file: cli.output,
            };
            evaluate::evaluate(config).await
        }

        Commands::Validate {
            mut criteria,
            input,
            concepts,
        } => {
            if let Some(path) = input {
                let content = fs::read_to_string(&path)?;
                criteria.extend(
                    content
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty() && !line.starts_with('#'))
                        .map(str::to_string),
                );
            }
            let config = validate::ValidateConfig {
                criteria,
                concepts,
                verbose: cli.verbose,
            };
            validate::validate(config).await
        }
    }
}
