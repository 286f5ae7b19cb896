use anyhow::Result;
use clap::Parser;
use tracing::info;

use dataset_splitter::cli::Cli;
use dataset_splitter::core::dataset::DatasetSplit;
use dataset_splitter::core::pipeline;
use dataset_splitter::logging::setup_logging;
use dataset_splitter::SplitterConfig;

fn main() -> Result<()> {
    let config: SplitterConfig = Cli::parse().into();
    setup_logging(config.log_dir.as_deref())?;

    info!("Starting dataset splitter");
    let summary = pipeline::run(&config)?;

    let counts: Vec<String> = DatasetSplit::all()
        .iter()
        .map(|split| format!("{} {}", summary.get(*split).files.len(), split))
        .collect();
    info!(
        "Split {} files ({}), manifest at {:?}",
        summary.total_files(),
        counts.join(", "),
        summary.manifest_path
    );

    Ok(())
}
