// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Culler: sequential photo triage
//!
//! Terminal shell over the review session. Reads one intent per line and
//! prints the resulting view.

use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use culler::catalog::{Catalog, ExtensionFilter};
use culler::history::MoveRecord;
use culler::shared::SharedSession;
use culler::{AppConfig, CullError, Result, ViewState};

/// Culler CLI - keep or reject photos one at a time
#[derive(Parser, Debug)]
#[command(name = "culler")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "0.1.0")]
#[command(about = "Sequential photo triage with undo", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "culler.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for views
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Review a folder interactively (k = keep, d = reject, u = undo, q = quit)
    Review {
        /// Folder holding the photos
        folder: PathBuf,
    },

    /// List the files a review of this folder would walk through
    Scan {
        /// Folder holding the photos
        folder: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "culler.json")]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate,
}

/// One line of operator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Keep,
    Reject,
    Undo,
    Status,
    Quit,
}

fn parse_intent(line: &str) -> Option<Intent> {
    let word = line.trim().to_lowercase();
    match word.as_str() {
        "" | "k" | "keep" | "right" | "space" => Some(Intent::Keep),
        "d" | "reject" | "delete" | "del" => Some(Intent::Reject),
        "u" | "undo" => Some(Intent::Undo),
        "s" | "status" => Some(Intent::Status),
        "q" | "quit" | "exit" => Some(Intent::Quit),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Review { folder } => {
            let config = AppConfig::load(&cli.config)?;
            run_review(config, folder, &cli.format, cli.quiet).await
        }
        Commands::Scan { folder } => {
            let config = AppConfig::load(&cli.config)?;
            run_scan(&config, &folder, &cli.format)
        }
        Commands::Config { action } => run_config_command(action, &cli.config),
    }
}

/// Run the interactive review loop
async fn run_review(config: AppConfig, folder: PathBuf, format: &str, quiet: bool) -> Result<()> {
    let session = SharedSession::new(config);
    let view = session.open(folder.clone()).await?;
    info!("Reviewing {:?} ({} photos)", folder, view.total_count);

    if !quiet && format == "text" {
        println!("k/Enter = keep, d = reject, u = undo, s = status, q = quit");
    }

    let view = session.refresh().await?;
    print_view(&view, format)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let intent = match parse_intent(&line) {
            Some(intent) => intent,
            None => {
                warn!("Unknown command: {:?}", line.trim());
                continue;
            }
        };
        debug!("Intent: {:?}", intent);

        let outcome = match intent {
            Intent::Keep => session.keep().await,
            Intent::Reject => session.reject().await,
            Intent::Undo => session.undo().await,
            Intent::Status => {
                print_rejections(&session.recent_rejections(STATUS_HISTORY_LEN).await, format)?;
                Ok(session.view().await)
            }
            Intent::Quit => break,
        };

        if let Err(e) = outcome {
            report_error(&e);
        }

        let view = session.refresh().await?;
        print_view(&view, format)?;
    }

    info!("Review finished.");
    Ok(())
}

fn report_error(err: &CullError) {
    match err {
        CullError::RestoreTargetMissing(path) => {
            warn!("Cannot undo, rejected file is gone: {:?}", path)
        }
        CullError::MoveFailed { .. } | CullError::NameSpaceExhausted(_) => {
            warn!("{}", err)
        }
        _ => tracing::error!("{}", err),
    }
}

/// Rejections listed by the status command
const STATUS_HISTORY_LEN: usize = 5;

fn print_rejections(records: &[MoveRecord], format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::json!({ "rejections": records }));
        return Ok(());
    }

    if records.is_empty() {
        println!("Nothing to undo.");
    }
    for record in records {
        println!("{}", render_rejection(record));
    }
    Ok(())
}

fn render_rejection(record: &MoveRecord) -> String {
    format!(
        "  {} {} -> {}",
        record.timestamp().with_timezone(&Local).format("%H:%M:%S"),
        record.original_path().display(),
        record.moved_path().display()
    )
}

fn print_view(view: &ViewState, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string(view)?);
    } else {
        println!("{}", render_view(view));
    }
    Ok(())
}

fn render_view(view: &ViewState) -> String {
    let undo = if view.can_undo { " (undo available)" } else { "" };

    match &view.current_path {
        Some(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("[{} / {}] {}{}", view.position, view.total_count, name, undo)
        }
        None if view.initial_count == 0 => format!("[0 / 0] No photos in this folder.{}", undo),
        None => format!("[0 / 0] All photos reviewed.{}", undo),
    }
}

/// List catalog entries in review order
fn run_scan(config: &AppConfig, folder: &Path, format: &str) -> Result<()> {
    let filter = ExtensionFilter::new(&config.extensions);
    let catalog = Catalog::build(folder, &filter)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(catalog.entries())?);
    } else {
        for (i, entry) in catalog.entries().iter().enumerate() {
            println!("{:4}. {}", i + 1, entry.file_name());
        }
        println!("\n{} photos", catalog.len());
    }

    Ok(())
}

/// Run config commands
///
/// `generate` never reads the existing file, so a broken one can be replaced.
fn run_config_command(action: ConfigCommands, config_path: &Path) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let config = AppConfig::load(config_path)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output } => {
            AppConfig::default().save(&output)?;
            println!("Generated config at {:?}", output);
        }
        ConfigCommands::Validate => {
            let config = AppConfig::load(config_path)?;
            println!("Configuration at {:?} is valid", config_path);
            println!("  Extensions: {}", config.extensions.join(", "));
            println!("  Reject folder: {}", config.reject_dir_name);
        }
    }

    Ok(())
}
