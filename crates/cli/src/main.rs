use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use attrforge_infra::config::SourceConfig;
use attrforge_infra::pipeline;
use attrforge_infra::sink::{CsvSink, default_output_path};
use attrforge_infra::source::MySqlProductSource;

/// Derive marketing and technical product attributes from the catalog
/// database and export them as CSV.
#[derive(Debug, Parser)]
#[command(name = "attrforge", version, about)]
struct Args {
    /// Output file (default: product_attributes.csv next to the executable).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Read and derive, but do not write any file.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    attrforge_observability::init();
    let args = Args::parse();

    let config = SourceConfig::from_env();
    tracing::info!(database = %config.target(), "starting product attribute export");
    let source = MySqlProductSource::new(config);

    let sink = if args.dry_run {
        None
    } else {
        let path = match args.output {
            Some(path) => path,
            None => default_output_path().context("failed to locate the executable directory")?,
        };
        Some(CsvSink::new(path))
    };

    let summary = pipeline::run(&source, sink.as_ref())
        .await
        .context("product attribute export failed")?;

    match summary.output {
        Some(path) => println!("Wrote {} rows to {}", summary.rows, path.display()),
        None => println!("Derived {} rows (dry run, nothing written)", summary.rows),
    }
    Ok(())
}
