use anyhow::{Context, Result};
use clap::Parser;
use lyric_tutor::config::{PipelineConfig, ServiceArgs};
use lyric_tutor::pipeline::{Sources, run_batch};
use lyric_tutor::readability::PronouncingDictionary;
use lyric_tutor::sources::providers::{
    BillboardChartProvider, GeniusLyricsProvider, SpotifyFeaturesProvider,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lyric-tutor")]
#[command(about = "Refresh the song dataset from this week's charts and export it", long_about = None)]
struct Cli {
    /// Dataset cache file
    #[arg(long, default_value = "cache.json")]
    cache: PathBuf,

    /// Exported table consumed by the recommender
    #[arg(long, default_value = "data.json")]
    export: PathBuf,

    /// CMU pronouncing dictionary
    #[arg(long, env = "CMUDICT_PATH", default_value = "cmudict.dict")]
    cmudict: PathBuf,

    #[command(flatten)]
    services: ServiceArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig {
        cache_path: cli.cache,
        export_path: cli.export,
        cmudict_path: cli.cmudict,
    };

    tracing::info!("Cache: {}", config.cache_path.display());
    tracing::info!("Export: {}", config.export_path.display());

    let dictionary = PronouncingDictionary::load(&config.cmudict_path)?;

    let endpoints = cli.services.endpoints();
    let credentials = cli.services.credentials();
    let charts = BillboardChartProvider::new(&endpoints).context("Failed to build chart client")?;
    let features = SpotifyFeaturesProvider::new(&endpoints, &credentials)
        .context("Failed to build Spotify client")?;
    let lyrics = GeniusLyricsProvider::new(&endpoints, &credentials)
        .context("Failed to build Genius client")?;

    let sources = Sources {
        charts: &charts,
        features: &features,
        lyrics: &lyrics,
    };
    let today = chrono::Local::now().date_naive();
    let report = run_batch(&config, sources, &dictionary, today).await?;

    println!("{}", report);
    if !report.skipped.is_empty() {
        println!("\nSkipped songs:");
        for skipped in &report.skipped {
            println!("  {} ({})", skipped.key, skipped.error);
        }
    }

    Ok(())
}
