mod agents;
mod check;
mod config;
mod crew;
mod interactive;
mod tasks;

use agent::Result;
use clap::{Parser, Subcommand};
use config::Config;
use crew::ContentCrew;
use interactive::Console;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "crew",
    version,
    about = "Research trending topics and draft LinkedIn posts from them"
)]
struct Cli {
    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Discover the five hottest topics, pick one and write a post about it
    Topics {
        /// General area to focus on, e.g. "AI" or "more funny"
        #[arg(long)]
        area: Option<String>,
    },
    /// Research a topic and write a post about it
    Post {
        /// Topic to research; general trends when omitted
        #[arg(long)]
        topic: Option<String>,
    },
    /// Research a topic without writing a post
    Research {
        #[arg(long)]
        topic: Option<String>,
    },
    /// Verify the API keys and the search backend
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    if let Some(Command::Check) = cli.command {
        if !check::run(&config).await? {
            std::process::exit(1);
        }
        return Ok(());
    }

    let missing = config.missing_keys();
    if !missing.is_empty() {
        for key in missing {
            println!("Warning: {key} environment variable not set");
        }
        println!("Please set the keys in a .env file or as environment variables");
        return Ok(());
    }

    let api_key = config
        .openai_api_key
        .as_deref()
        .ok_or(agent::Error::ConfigError("OPENAI_API_KEY is required".to_string()))?;
    let llm = agent::llm::OpenAI::with_api_key(config.model.clone(), api_key);
    info!(model = %config.model, "starting LinkedIn content workflow");

    let crew = ContentCrew::new(llm, &config);
    let mut console = Console::new(BufReader::new(tokio::io::stdin()));

    let result = match cli.command {
        None => interactive::run(&crew, &mut console).await,
        Some(Command::Topics { area }) => {
            match interactive::choose_hot_topic(&crew, &mut console, area).await {
                Ok(topic) => interactive::write_post(&crew, Some(&topic)).await,
                Err(e) => Err(e),
            }
        }
        Some(Command::Post { topic }) => interactive::write_post(&crew, topic.as_deref()).await,
        Some(Command::Research { topic }) => crew
            .research_only(topic.as_deref())
            .await
            .map(|findings| println!("{findings}")),
        Some(Command::Check) => Ok(()),
    };

    if let Err(e) = &result {
        println!("Error: {e}");
        println!("Please check your API keys and try again.");
    }
    result
}
