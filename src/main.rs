//! CLI entry point for the canteen order report.
//!
//! Provides subcommands for building the per-user calorie and food
//! popularity report, passing the raw order export through, listing the
//! calorie table, and regenerating the export from a store snapshot.

use anyhow::Result;
use canteen_report::{
    calories,
    error::ReportError,
    export::{load_snapshot, write_export},
    output::{copy_source, print_pretty, write_json, write_passthrough_error, write_report},
    report::build_report,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_ORDERS_CSV: &str = "src/Data/extract_data.csv";

#[derive(Parser)]
#[command(name = "canteen_report")]
#[command(about = "Order reports for the canteen food-ordering backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the per-user calorie summary and food popularity chart
    Report {
        /// Order export to aggregate
        #[arg(long = "csv", env = "ORDERS_CSV", default_value = DEFAULT_ORDERS_CSV)]
        csv_path: PathBuf,

        /// Write the JSON report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print the raw order export
    Csv {
        /// Order export to print
        #[arg(long = "csv", env = "ORDERS_CSV", default_value = DEFAULT_ORDERS_CSV)]
        csv_path: PathBuf,
    },
    /// List calories per unit for every menu item
    Calories,
    /// Regenerate the order export from a JSON store snapshot
    Export {
        /// JSON file with `users` and `orders` arrays
        #[arg(short, long)]
        input: PathBuf,

        /// Export file to (re)write
        #[arg(short, long, env = "ORDERS_CSV", default_value = DEFAULT_ORDERS_CSV)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/canteen_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("canteen_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            csv_path,
            output,
            pretty,
        } => match build_report(&csv_path).await {
            Ok(report) => {
                print_pretty(&report);
                match output {
                    Some(path) => {
                        write_report(&path, &report, pretty)?;
                        info!(path = %path.display(), "Report written");
                    }
                    None => write_json(std::io::stdout().lock(), &report, pretty)?,
                }
            }
            Err(e) => return Err(report_failure(e)),
        },
        Commands::Csv { csv_path } => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = copy_source(&csv_path, &mut stdout) {
                return Err(passthrough_failure(&mut stdout, e));
            }
        }
        Commands::Calories => {
            write_json(std::io::stdout().lock(), &calories::entries(), true)?;
        }
        Commands::Export { input, output } => {
            let snapshot = load_snapshot(&input)?;
            info!(
                users = snapshot.users.len(),
                orders = snapshot.orders.len(),
                "Snapshot loaded"
            );
            let rows = write_export(&output, &snapshot)?;
            info!(rows, path = %output.display(), "CSV file updated");
        }
    }

    Ok(())
}

/// Prints the plain-text error message the raw passthrough uses and logs the failure.
fn passthrough_failure<W: Write>(out: &mut W, e: ReportError) -> anyhow::Error {
    error!(status = e.status_code(), error = %e, "CSV passthrough failed");
    if let Err(write_err) = write_passthrough_error(out, &e) {
        error!(error = %write_err, "Failed to write error message");
    }
    e.into()
}

/// Prints the HTTP-equivalent error body to stdout and logs the failure.
fn report_failure(e: ReportError) -> anyhow::Error {
    let status = e.status_code();
    error!(status, error = %e, "Report request failed");
    if let Err(write_err) = write_json(std::io::stdout().lock(), &e.body(), false) {
        error!(error = %write_err, "Failed to write error body");
    }
    e.into()
}
