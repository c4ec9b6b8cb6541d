use anyhow::{Context, Result};
use clap::Parser;
use lyric_tutor::chat::prompts::{GREETING, suggested_prompts};
use lyric_tutor::chat::{ChatSession, OpenAiClient};
use lyric_tutor::classify::{Level, classify};
use lyric_tutor::export::load_export;
use lyric_tutor::recommend::{Difficulty, Mood, Preferences, Recommendation, recommend};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recommend")]
#[command(about = "Recommend an English song to practise with", long_about = None)]
struct Cli {
    /// Exported song table
    #[arg(short, long, default_value = "data.json")]
    data: PathBuf,

    /// How hard the lyrics should be
    #[arg(long, value_enum, default_value = "easy")]
    difficulty: Difficulty,

    /// How much you want to dance
    #[arg(long, value_enum, default_value = "medium")]
    danceability: Level,

    /// What energy you are feeling
    #[arg(long, value_enum, default_value = "neutral")]
    mood: Mood,

    /// Seed for a reproducible pick
    #[arg(long)]
    seed: Option<u64>,

    /// Print the lyrics of the recommended song
    #[arg(long)]
    show_lyrics: bool,

    /// Start a Q&A session about the song
    #[arg(long)]
    chat: bool,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,

    /// Chat model
    #[arg(long)]
    model: Option<String>,

    /// Timeout for each chat API request, in seconds
    #[arg(long)]
    http_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let songs = load_export(&cli.data)?;
    let table = classify(songs).context("Failed to classify songs")?;

    let prefs = Preferences {
        difficulty: cli.difficulty,
        danceability: cli.danceability,
        mood: cli.mood,
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pick = recommend(&table, &prefs, &mut rng)?;

    println!("We would recommend you...\n");
    println!("  {}", pick.title);
    println!("  by {}", pick.artist);
    println!("  {}", pick.track_url);
    if cli.show_lyrics {
        println!("\n{}", pick.lyrics);
    }

    if cli.chat {
        let api_key = cli
            .openai_api_key
            .context("OPENAI_API_KEY is required for --chat")?;
        let mut client = OpenAiClient::new(api_key);
        if let Some(base_url) = cli.openai_base_url {
            client = client.with_base_url(base_url);
        }
        if let Some(model) = cli.model {
            client = client.with_chat_model(model);
        }
        if let Some(secs) = cli.http_timeout_secs {
            client = client
                .with_timeout(Duration::from_secs(secs))
                .context("Failed to build chat client")?;
        }
        chat_loop(&pick, &client).await?;
    }

    Ok(())
}

async fn chat_loop(song: &Recommendation, client: &OpenAiClient) -> Result<()> {
    let mut session = ChatSession::new(&song.lyrics, client, client)
        .await
        .context("Failed to index lyrics")?;
    let prompts = suggested_prompts(&song.title, &song.artist);

    println!("\n{}", GREETING);
    for (index, prompt) in prompts.iter().enumerate() {
        println!("  Prompt {}: {}", index + 1, prompt);
    }
    println!("Type a number to pick a prompt, any other text to ask, or an empty line to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let question = match line.parse::<usize>() {
            Ok(n) if (1..=prompts.len()).contains(&n) => prompts[n - 1].clone(),
            _ => line.to_string(),
        };
        if question != line {
            println!("{}", question);
        }

        match session.ask(&question).await {
            Ok(answer) => println!("\n{}", answer),
            Err(e) => tracing::error!("Chat request failed: {}", e),
        }
    }

    Ok(())
}
