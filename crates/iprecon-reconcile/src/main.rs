//! CLI entry point for the iprecon reconciler.
//!
//! With no arguments, scans the current directory and writes the three
//! output tables next to the inputs.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use iprecon_reconcile::config;

#[derive(Parser)]
#[command(name = "iprecon")]
#[command(about = "Extract IPv4 addresses from syslog exports and reconcile them against a device inventory")]
struct Cli {
    /// Working directory holding the syslog and device files.
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Directory for the output tables (default: the working directory).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Config file prefix, relative to --dir unless absolute (default: iprecon).
    #[arg(short, long, default_value = "iprecon")]
    config: String,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    log_json: bool,

    /// Print the run report as JSON on stdout instead of the summary.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.log_json {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    let mut reconcile_config = config::load(&cli.dir, &cli.config)?;
    if let Some(dir) = cli.output_dir {
        reconcile_config.output_dir = Some(dir);
    }

    let out_dir = reconcile_config.output_dir_for(&cli.dir);
    let report = iprecon_reconcile::run(&cli.dir, &out_dir, &reconcile_config)?;

    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("Done!");
        for line in report.summary_lines() {
            println!("{line}");
        }
    }

    Ok(())
}
