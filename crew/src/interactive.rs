use crate::crew::ContentCrew;
use agent::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt};

pub const DEFAULT_TOPIC: &str = "AI infrastructure trends";

const RULE: &str = "============================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    HotTopics,
    SpecificTopic,
    GeneralTrends,
}

impl Workflow {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Workflow::HotTopics),
            "2" => Some(Workflow::SpecificTopic),
            "3" => Some(Workflow::GeneralTrends),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicChoice {
    Pick(usize),
    New,
    Refresh,
    Invalid,
}

impl TopicChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "new" => TopicChoice::New,
            "refresh" => TopicChoice::Refresh,
            other => match other.parse::<usize>() {
                Ok(n) if (1..=5).contains(&n) => TopicChoice::Pick(n),
                _ => TopicChoice::Invalid,
            },
        }
    }
}

/// Title of the `number`-th entry of a numbered topic list.
pub fn extract_topic(hot_topics: &str, number: usize) -> Option<String> {
    let marker = format!("{number}.");
    hot_topics
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(&marker))
        .map(|line| {
            line[marker.len()..]
                .trim()
                .trim_matches('*')
                .trim()
                .to_string()
        })
        .filter(|title| !title.is_empty())
}

/// Line-oriented prompts over any async reader.
pub struct Console<R> {
    input: R,
}

impl<R: AsyncBufRead + Unpin> Console<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    pub async fn ask(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let mut line = String::new();
        self.input.read_line(&mut line).await?;
        Ok(line.trim().to_string())
    }

    pub async fn ask_optional(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer = self.ask(prompt).await?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }
}

fn print_section(title: &str, body: &str) {
    println!("\n{RULE}");
    println!("{title}");
    println!("{RULE}");
    println!("{body}");
}

/// Shows hot topics until one is picked and returns it.
pub async fn choose_hot_topic<R: AsyncBufRead + Unpin>(
    crew: &ContentCrew,
    console: &mut Console<R>,
    mut general_area: Option<String>,
) -> Result<String> {
    loop {
        let hot_topics = crew.get_hot_topics(general_area.as_deref()).await?;
        print_section("HOTTEST TOPICS:", &hot_topics);

        println!("\n{RULE}");
        println!("Options:");
        println!("- Enter 1-5 to create a post about that topic");
        println!("- Enter 'new' to get different topics");
        println!("- Enter 'refresh' to search again with custom instructions");

        match TopicChoice::parse(&console.ask("\nYour choice: ").await?) {
            TopicChoice::Pick(n) => match extract_topic(&hot_topics, n) {
                Some(topic) => {
                    println!("\nCreating post about: {topic}");
                    return Ok(topic);
                }
                None => {
                    println!("\nCould not parse topic, using default: {DEFAULT_TOPIC}");
                    return Ok(DEFAULT_TOPIC.to_string());
                }
            },
            TopicChoice::New => {
                println!("\nSearching for different topics...");
            }
            TopicChoice::Refresh => {
                println!("\nWhat kind of topics would you like?");
                println!(
                    "Examples: 'more funny', 'real life related', 'viral moments', 'business drama'"
                );
                if let Some(instruction) = console.ask_optional("Describe what you want: ").await? {
                    println!("\nSearching for topics that are: {instruction}");
                    general_area = Some(instruction);
                }
            }
            TopicChoice::Invalid => {
                println!("Invalid choice. Using default topic.");
                return Ok(DEFAULT_TOPIC.to_string());
            }
        }
    }
}

pub async fn write_post(crew: &ContentCrew, topic: Option<&str>) -> Result<()> {
    println!("\nResearching and creating LinkedIn post...");
    let post = crew.create_post(topic).await?;
    print_section("FINAL LINKEDIN POST:", &post);
    Ok(())
}

pub async fn run<R: AsyncBufRead + Unpin>(
    crew: &ContentCrew,
    console: &mut Console<R>,
) -> Result<()> {
    println!("Choose your workflow:");
    println!("1. Get 5 hottest topics and choose one");
    println!("2. Enter a specific topic directly");
    println!("3. Let AI choose from general trends");

    let topic = match Workflow::parse(&console.ask("\nEnter your choice (1, 2, or 3): ").await?) {
        Some(Workflow::HotTopics) => {
            println!("\nDiscovering the hottest topics...");
            let area = console
                .ask_optional(
                    "Enter a general area (e.g., 'AI', 'enterprise tech') or press Enter for default: ",
                )
                .await?;
            Some(choose_hot_topic(crew, console, area).await?)
        }
        Some(Workflow::SpecificTopic) => {
            console
                .ask_optional("Enter a specific topic to research: ")
                .await?
        }
        Some(Workflow::GeneralTrends) => {
            println!("\nLetting AI choose from general trends...");
            None
        }
        None => {
            println!("Invalid choice. Using general trends.");
            None
        }
    };

    write_post(crew, topic.as_deref()).await
}
