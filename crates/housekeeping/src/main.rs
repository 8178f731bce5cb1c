use std::path::PathBuf;

use clap::{Parser, Subcommand};

use housekeeping::conf::CONFIG_FILE_ENV;
use housekeeping::parser::TraceLogEntry;
use housekeeping::runtime::boot;
use housekeeping::store::{TraceLogReport, TraceLogStore};

#[derive(Parser)]
#[command(name = "housekeeping")]
#[command(version, about = "Inspect application trace logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = CONFIG_FILE_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one trace log and print its entries, newest first
    Trace {
        /// File name, relative to the trace log directory
        filename: String,

        /// Trace log directory (overrides the configured one)
        #[arg(long, short = 'd')]
        dir: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Trace { filename, dir, json } => {
            let config = boot::load_config(cli.config.as_deref(), dir.as_deref())?;
            let store = TraceLogStore::with_config(&config.trace_log_dir, &config.trace);
            let report = store.read(&filename).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn print_report(report: &TraceLogReport) {
    for entry in &report.entries {
        println!(
            "{} {:<5} [{}] {} - {}",
            entry
                .timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            entry.level.as_deref().unwrap_or_default(),
            thread_context(entry),
            entry.logger.as_deref().unwrap_or_default(),
            entry.message,
        );
    }

    if let Some(failure) = &report.failure {
        eprintln!(
            "warning: {} could not be read completely ({}); showing {} entries",
            report.filename,
            failure,
            report.entries.len()
        );
    }
}

fn thread_context(entry: &TraceLogEntry) -> String {
    [
        ("P", &entry.process_id),
        ("D", &entry.domain_id),
        ("T", &entry.thread_id),
    ]
    .iter()
    .filter_map(|(tag, id)| id.as_ref().map(|id| format!("{tag}{id}")))
    .collect::<Vec<_>>()
    .join("/")
}
