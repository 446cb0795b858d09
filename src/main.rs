//! readiness-tools: Compliance readiness scoring and roadmap tool

#![allow(clippy::too_many_lines, clippy::struct_excessive_bools)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use readiness_tools::{
    cli::{run_baseline_reset, run_baseline_show, run_roadmap, run_score, ScoreConfig},
    model::catalogue_json_schema,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with scoring model info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nAnswer Types:",
        "\n  yes_no_partial: yes / partial / no / not_applicable",
        "\n  maturity_1_5:   levels 1-5, evidence-verified level 4 counts as 5",
        "\n\nOutput Formats:",
        "\n  auto, json, summary"
    )
}

#[derive(Parser)]
#[command(name = "readiness-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Compliance readiness scoring and roadmap tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Overall score below --min-score
    2  Error occurred

EXAMPLES:
    # Score an answer set against the built-in catalogue
    readiness-tools score answers.json --profile profile.json

    # CI/CD gate: fail the build under 70% readiness
    readiness-tools score answers.json --min-score 0.7 -o json

    # What would change, without touching the baseline
    readiness-tools score answers.json --preview

    # Just the prioritised remediation plan
    readiness-tools roadmap answers.json --profile profile.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `score` subcommand
#[derive(Parser)]
struct ScoreArgs {
    /// Path to the answer set (JSON array of responses)
    answers: PathBuf,

    /// Question catalogue file (built-in ISO 27001 catalogue if not specified)
    #[arg(short, long)]
    catalogue: Option<PathBuf>,

    /// Organisation profile for scope resolution
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Output format (auto detects TTY: summary if interactive, json otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Count unanswered in-scope questions against the score
    #[arg(long)]
    include_unanswered: bool,

    /// Compute without reading or capturing the baseline
    #[arg(long)]
    preview: bool,

    /// Exit with code 1 if the overall ratio is below this value (0-1)
    #[arg(long)]
    min_score: Option<f64>,

    /// Baseline file location (platform data directory if not specified)
    #[arg(long, env = "READINESS_BASELINE_PATH")]
    baseline_path: Option<PathBuf>,
}

/// Arguments for the `roadmap` subcommand
#[derive(Parser)]
struct RoadmapArgs {
    /// Path to the answer set (JSON array of responses)
    answers: PathBuf,

    /// Question catalogue file (built-in ISO 27001 catalogue if not specified)
    #[arg(short, long)]
    catalogue: Option<PathBuf>,

    /// Organisation profile for scope resolution
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an answer set and report readiness, gaps and roadmap
    Score(ScoreArgs),

    /// Show only the prioritised remediation roadmap
    Roadmap(RoadmapArgs),

    /// Inspect or reset the captured baseline
    Baseline {
        #[command(subcommand)]
        action: BaselineAction,
    },

    /// Generate JSON Schema for the catalogue file format
    CatalogueSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `baseline` command
#[derive(Subcommand)]
enum BaselineAction {
    /// Print the captured baseline snapshot
    Show {
        /// Baseline file location (platform data directory if not specified)
        #[arg(long, env = "READINESS_BASELINE_PATH")]
        baseline_path: Option<PathBuf>,
    },
    /// Clear the baseline so the next qualifying run captures a fresh one
    Reset {
        /// Baseline file location (platform data directory if not specified)
        #[arg(long, env = "READINESS_BASELINE_PATH")]
        baseline_path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Score(args) => {
            let exit_code = run_score(ScoreConfig {
                catalogue_path: args.catalogue,
                profile_path: args.profile,
                answers_path: args.answers,
                output: args.output,
                output_file: args.output_file,
                include_unanswered: args.include_unanswered,
                preview: args.preview,
                min_score: args.min_score,
                baseline_path: args.baseline_path,
                no_color: cli.no_color,
            })?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Roadmap(args) => {
            let exit_code = run_roadmap(
                args.catalogue,
                args.profile,
                args.answers,
                args.output,
                args.output_file,
                cli.no_color,
            )?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Baseline { action } => {
            let exit_code = match action {
                BaselineAction::Show { baseline_path } => run_baseline_show(baseline_path)?,
                BaselineAction::Reset { baseline_path } => run_baseline_reset(baseline_path)?,
            };
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::CatalogueSchema { output } => {
            let schema = catalogue_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "readiness-tools", &mut io::stdout());
            Ok(())
        }
    }
}
