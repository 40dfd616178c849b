//! `thriftdump`: print the contents of raw Thrift Binary Protocol messages.
//!
//! ```text
//! thriftdump capture1.bin capture2.bin
//! thriftdump --format json --max-depth 16 reply.bin
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thriftdump::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Unframed message files to decode
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Maximum struct/collection nesting depth
    #[arg(long, default_value_t = thriftdump::protocol::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log level, used when RUST_LOG is not set
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Renders every successful inspection and collects per-input failures.
///
/// Reports are joined with a blank line between them, in input order.
fn render_batch(
    results: &[Inspection],
    formatter: &dyn ReportFormat,
) -> (String, Vec<String>) {
    let mut reports = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for inspection in results {
        let rendered = inspection
            .result
            .as_ref()
            .map_err(ToString::to_string)
            .and_then(|decoded| formatter.render(decoded).map_err(|e| e.to_string()));
        match rendered {
            Ok(report) => reports.push(report),
            Err(e) => failures.push(format!("{}: {e}", inspection.path.display())),
        }
    }
    (reports.join("\n\n"), failures)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = DecoderConfig::default().with_max_depth(args.max_depth);
    tracing::debug!(files = args.files.len(), format = %args.format, ?config, "starting");

    let results = inspect_files(args.files, config).await;
    let formatter = args.format.formatter();
    let (output, failures) = render_batch(&results, formatter.as_ref());

    if !output.is_empty() {
        println!("{output}");
    }
    for failure in &failures {
        eprintln!("{failure}");
    }

    if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
