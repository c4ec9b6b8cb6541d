use anyhow::Context;
use chart_search_rs::{
    BillboardChartApi, ChartEntry, Credentials, GeniusApi, ServiceEndpoints, SpotifyApi,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Chart & Lyrics Lookup
///
/// Query the Hot 100 chart, Spotify audio features or Genius lyrics for a single
/// song. Handy for checking whether page markup or API payloads have changed.
#[derive(Parser, Debug)]
#[command(name = "chart_search")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the Hot 100 entries published for a date (YYYY-MM-DD)
    Chart {
        #[arg(short, long)]
        date: NaiveDate,
    },
    /// Look up a track's Spotify id and audio features
    Track {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        artist: String,
        #[arg(long, env = "SPOTIFY_CID", hide_env_values = true)]
        client_id: String,
        #[arg(long, env = "SPOTIFY_SECRET", hide_env_values = true)]
        client_secret: String,
    },
    /// Find a song's Genius page and print its lyrics
    Lyrics {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        artist: String,
        #[arg(long, env = "GENIUS_TOKEN", hide_env_values = true)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity, warnings and errors by default
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    let endpoints = ServiceEndpoints::default();

    match args.command {
        Command::Chart { date } => {
            let api = BillboardChartApi::new(&endpoints)?;
            let entries = api.get_chart(date).await.context("Failed to fetch chart")?;

            if entries.is_empty() {
                println!("No entries found for {}.", date);
                return Ok(());
            }

            println!("=== Hot 100 for {} ===\n", date);
            for (rank, entry) in entries.iter().enumerate() {
                println!("{:>3}. {} - {}", rank + 1, entry.title, entry.artist);
            }
        }
        Command::Track {
            title,
            artist,
            client_id,
            client_secret,
        } => {
            let credentials = Credentials {
                spotify_client_id: client_id,
                spotify_client_secret: client_secret,
                genius_token: String::new(),
            };
            let api = SpotifyApi::new(&endpoints, &credentials)?;
            let token = api.request_token().await.context("Token exchange failed")?;
            let id = api
                .search_track_id(&token.access_token, &ChartEntry::new(&title, &artist))
                .await
                .context("Track search failed")?;
            let features = api
                .get_audio_features(&token.access_token, &id)
                .await
                .context("Audio features lookup failed")?;

            println!("Track:        {} - {}", title, artist);
            println!("Spotify id:   {}", id);
            println!("Danceability: {:.3}", features.danceability);
            println!("Valence:      {:.3}", features.valence);
            println!("Speechiness:  {:.3}", features.speechiness);
            println!("Energy:       {:.3}", features.energy);
            println!("Tempo:        {:.1} BPM", features.tempo);
        }
        Command::Lyrics {
            title,
            artist,
            token,
        } => {
            let credentials = Credentials {
                spotify_client_id: String::new(),
                spotify_client_secret: String::new(),
                genius_token: token,
            };
            let api = GeniusApi::new(&endpoints, &credentials)?;
            let url = api
                .search_song_url(&ChartEntry::new(&title, &artist))
                .await
                .context("Genius search failed")?;
            let lyrics = api.get_lyrics(&url).await.context("Lyric page fetch failed")?;

            println!("Source: {}\n", url);
            println!("{}", lyrics);
        }
    }

    Ok(())
}
