use anyhow::Result;
use clap::Parser;
use lyric_tutor::config::PipelineConfig;
use lyric_tutor::pipeline::export_only;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "export-dataset")]
#[command(about = "Re-export the cached song dataset without fetching anything", long_about = None)]
struct Cli {
    /// Dataset cache file
    #[arg(short, long, default_value = "cache.json")]
    cache: PathBuf,

    /// Output file for the exported table
    #[arg(short, long, default_value = "data.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();

    if !cli.cache.exists() {
        anyhow::bail!("Cache file does not exist: {}", cli.cache.display());
    }

    let config = PipelineConfig {
        cache_path: cli.cache,
        export_path: cli.output,
        ..PipelineConfig::default()
    };

    let count = export_only(&config)?;
    if count == 0 {
        tracing::warn!("Cache holds no songs; wrote an empty table");
    }

    println!("Exported {} songs to {}", count, config.export_path.display());
    Ok(())
}
