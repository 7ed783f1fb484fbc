use anyhow::Context;
use clap::{Parser, Subcommand};
use cluml::commands;
use cluml::{init_logging, Config};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Check, render and inspect Cluml class diagrams
#[derive(Parser, Debug)]
#[command(name = "cluml")]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
struct Cli {
    /// Settings file (JSON or TOML); defaults to the platform config directory
    #[arg(long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the sanity check on every diagram of a document
    Check {
        /// Document file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Do not report missing visibility markers
        #[arg(long)]
        no_visibility: bool,

        /// Print findings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a diagram as SVG
    Render {
        /// Document file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Diagram to render; the first one when omitted
        #[arg(long, value_name = "NAME")]
        diagram: Option<String>,
    },
    /// List the diagrams of a document
    Info {
        /// Document file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Config::load_or_default().unwrap_or_else(|err| {
            tracing::warn!("Using default settings: {}", err);
            Config::default()
        })),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging()?;
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Check {
            file,
            no_visibility,
            json,
        } => {
            if no_visibility {
                config.sanity.show_visibility = false;
            }
            let mut state = commands::open_document(&file, &config)?;
            let reports = commands::check_document(&mut state)?;
            if json {
                println!("{}", commands::reports_to_json(&reports)?);
            } else {
                print!("{}", commands::format_reports(&reports));
            }
            if reports.iter().any(|r| !r.findings.is_empty()) {
                return Ok(ExitCode::from(1));
            }
        }
        Command::Render {
            file,
            output,
            diagram,
        } => {
            let mut state = commands::open_document(&file, &config)?;
            let svg = commands::render_document(&mut state, diagram.as_deref())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, svg)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("SVG saved to: {}", path.display());
                }
                None => print!("{}", svg),
            }
        }
        Command::Info { file } => {
            let state = commands::open_document(&file, &config)?;
            print!("{}", commands::describe_document(&state));
        }
    }

    Ok(ExitCode::SUCCESS)
}
