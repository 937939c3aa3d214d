//! Formation Analyzer CLI
//!
//! Tracks JSON → formation report JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use formation_core::api::{analyze_request, report_schema, request_schema, AnalyzeRequest};
use formation_core::AnalyzerConfig;

#[derive(Parser)]
#[command(name = "formation_analyzer")]
#[command(about = "Infer team formations from tracked match footage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a tracks file and write the formation report
    Analyze {
        /// Request JSON (frame size + tracks)
        #[arg(long)]
        tracks: PathBuf,

        /// Config JSON, takes precedence over FORMATION_CONFIG_PATH
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output report path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the report
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// List the formation templates in use
    Catalog {
        /// Config JSON, takes precedence over FORMATION_CONFIG_PATH
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the JSON schema of the request or report
    Schema {
        #[arg(value_enum, default_value = "request")]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    Request,
    Report,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            tracks,
            config,
            out,
            pretty,
        } => analyze(&tracks, config.as_deref(), out.as_deref(), pretty)?,

        Commands::Catalog { config } => {
            let config = load_config(config.as_deref())?;
            for template in config.catalog.iter() {
                let counts: Vec<String> = template.lines.iter().map(ToString::to_string).collect();
                println!("{:<10} [{}]", template.name, counts.join(", "));
            }
        }

        Commands::Schema { kind } => {
            let schema = match kind {
                SchemaKind::Request => request_schema(),
                SchemaKind::Report => report_schema(),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => AnalyzerConfig::from_env().context("Failed to load config from environment"),
    }
}

fn analyze(tracks: &Path, config: Option<&Path>, out: Option<&Path>, pretty: bool) -> Result<()> {
    info!(tracks = %tracks.display(), "reading tracks");

    let raw = std::fs::read_to_string(tracks)
        .with_context(|| format!("Failed to read tracks file: {}", tracks.display()))?;
    let mut request: AnalyzeRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse tracks file: {}", tracks.display()))?;

    // request-embedded config is the fallback, an explicit --config wins
    if config.is_some() || request.config.is_none() {
        request.config = Some(load_config(config)?);
    }

    let report = analyze_request(&request).context("Formation analysis failed")?;

    for line in report.summary_lines() {
        eprintln!("  {line}");
    }

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            info!(out = %path.display(), "report saved");
        }
        None => println!("{json}"),
    }

    Ok(())
}
