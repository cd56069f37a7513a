use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use vidrec_core::{dedup_file, Encoding};

#[derive(Parser)]
#[command(name = "vidrec-dedup")]
#[command(about = "Remove duplicate rows from the raw video CSV", long_about = None)]
struct Cli {
    /// Raw input CSV
    #[arg(long, default_value = "merged_videos(Raw).csv")]
    input: String,
    /// Cleaned output CSV, consumed by the server
    #[arg(long, default_value = "cleaned.csv")]
    output: String,
    /// Input text encoding (utf-8 or latin1)
    #[arg(long, default_value = "latin1")]
    encoding: Encoding,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let report = dedup_file(&cli.input, &cli.output, cli.encoding)?;
    tracing::info!(removed = report.duplicates_removed(), output = %cli.output, "cleaned file saved");
    Ok(())
}
