use anyhow::Result;
use auromind_client::HttpChatClient;
use auromind_core::archive::ConversationArchive;
use auromind_core::config::{AuroMindConfig, ConfigLoader};
use auromind_core::session::{FileKeyValueStore, KeyValueStoreBox, MemoryKeyValueStore};
use auromind_core::{pickers, ChatSession, SessionContext};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::Duration;

mod chat;
mod exercises;
mod period;

#[derive(Parser, Debug)]
#[clap(name = "AuroMind", author, version = "0.1.0", about = "AuroMind mental wellness companion")]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(long, short, default_value = "auromind.yaml", help = "Path to the YAML configuration file")]
    config: PathBuf,

    #[clap(long, help = "Companion service URL, overrides backend.base_url")]
    server_url: Option<String>,

    #[clap(long, short, help = "Log level, overrides logging.level")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Talk with the companion (default command)
    Chat,
    /// Run the meditation countdown
    Timer {
        #[clap(long, short, help = "Preset length in minutes: 1, 3, 5 or 10")]
        minutes: Option<u32>,
    },
    /// Follow the 4-4-4 breathing exercise
    Breathe {
        #[clap(long, default_value_t = 1, help = "Number of 12-second cycles")]
        cycles: u32,
    },
    /// Print a random affirmation
    Affirmation,
    /// Print a random joke
    Joke,
    /// Period care: daily tracking, cycle calendar, reminders and tips
    Period {
        #[clap(subcommand)]
        view: period::PeriodView,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Chat);

    let mut config = ConfigLoader::from_file_or_default(&cli.config).await?;
    if let Some(url) = cli.server_url {
        config.backend.base_url = url;
        config.validate()?;
    }

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let log_level_filter = level.parse().unwrap_or(LevelFilter::Info);

    match command {
        Commands::Chat => {
            // The chat loop owns stdout, so logs go to a file.
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.logging.file)?;

            env_logger::Builder::new()
                .filter_level(log_level_filter)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .init();
        }
        _ => {
            env_logger::Builder::new()
                .filter_level(log_level_filter)
                .init();
        }
    }

    match command {
        Commands::Chat => {
            let session = build_chat_session(&config);
            chat::run(session).await
        }
        Commands::Timer { minutes } => exercises::run_timer(config.timer.default_minutes, minutes).await,
        Commands::Breathe { cycles } => exercises::run_breathing(cycles).await,
        Commands::Affirmation => {
            println!("{}", pickers::random_affirmation());
            Ok(())
        }
        Commands::Joke => {
            println!("{}", pickers::random_joke());
            Ok(())
        }
        Commands::Period { view } => period::run(view),
    }
}

fn build_chat_session(config: &AuroMindConfig) -> ChatSession {
    let mut client = HttpChatClient::new(config.backend.base_url.clone());
    if let Some(secs) = config.backend.request_timeout_secs {
        client = client.with_timeout(Duration::from_secs(secs));
    }
    log::info!("Using companion service at {}", client.base_url());

    let store = open_store(config);
    let archive = match ConversationArchive::load(store.as_ref()) {
        Ok(Some(archive)) => archive,
        Ok(None) => ConversationArchive::with_samples(Utc::now()),
        Err(e) => {
            log::warn!("Could not read saved conversations, starting from samples: {}", e);
            ConversationArchive::with_samples(Utc::now())
        }
    };

    ChatSession::new(Box::new(client), SessionContext::new(store)).with_archive(archive)
}

fn open_store(config: &AuroMindConfig) -> KeyValueStoreBox {
    let path = match &config.storage.path {
        Some(path) => path.clone(),
        None => match FileKeyValueStore::default_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}; the session will not survive a restart", e);
                return Box::new(MemoryKeyValueStore::new());
            }
        },
    };
    log::debug!("Session storage at {}", path.display());
    Box::new(FileKeyValueStore::new(path))
}
