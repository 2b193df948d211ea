use crate::agents::{AgentProfile, CONTENT_CREATOR, MAX_ITERATIONS, RESEARCHER};
use crate::config::Config;
use crate::tasks;
use agent::callbacks::{Callback, MessageLogger};
use agent::llm::LLM;
use agent::search::{SearchError, TrendingSearch};
use agent::tools::{self, TrendingSearchTool};
use agent::{Agent, AgentBuilder, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// The researcher and content creator agents and the pipelines between them.
pub struct ContentCrew {
    llm: Arc<dyn LLM + Send + Sync>,
    search: std::result::Result<TrendingSearch, SearchError>,
    log_dir: Option<PathBuf>,
}

impl ContentCrew {
    pub fn new(llm: Arc<dyn LLM + Send + Sync>, config: &Config) -> Self {
        Self::with_search(
            llm,
            tools::linkup_search(&config.linkup, config.aggregator.clone()),
            config.log_dir.clone(),
        )
    }

    pub fn with_search(
        llm: Arc<dyn LLM + Send + Sync>,
        search: std::result::Result<TrendingSearch, SearchError>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            llm,
            search,
            log_dir,
        }
    }

    fn transcript(
        &self,
        run: &str,
        profile: &AgentProfile,
    ) -> Result<Option<Box<dyn Callback + Send>>> {
        let Some(dir) = &self.log_dir else {
            return Ok(None);
        };

        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{run}.md"));
        info!(path = %path.display(), "writing agent transcript");
        let logger: Box<dyn Callback + Send> =
            MessageLogger::new(profile.role, std::fs::File::create(path)?)?;
        Ok(Some(logger))
    }

    fn builder(&self, run: &str, profile: &AgentProfile) -> Result<AgentBuilder> {
        let mut builder = AgentBuilder::new()
            .name(profile.role)
            .system_prompt(profile.system_prompt())
            .llm(self.llm.clone())
            .max_iterations(MAX_ITERATIONS);

        if let Some(logger) = self.transcript(run, profile)? {
            builder = builder.callback(logger);
        }

        Ok(builder)
    }

    fn research_agent(&self, run: &str) -> Result<Agent> {
        self.builder(run, &RESEARCHER)?
            .tool(TrendingSearchTool::with_search(self.search.clone()))
            .build()
    }

    fn content_creator_agent(&self, run: &str) -> Result<Agent> {
        self.builder(run, &CONTENT_CREATOR)?.build()
    }

    /// The five hottest topics, optionally within a general area.
    pub async fn get_hot_topics(&self, general_area: Option<&str>) -> Result<String> {
        let task = tasks::topic_discovery_task(general_area);
        self.research_agent("topics")?
            .run_task(&task.prompt())
            .await
    }

    pub async fn research_only(&self, topic: Option<&str>) -> Result<String> {
        let task = tasks::research_task(topic);
        self.research_agent("research")?
            .run_task(&task.prompt())
            .await
    }

    /// Researches the topic, then drafts a LinkedIn post from the findings.
    pub async fn create_post(&self, topic: Option<&str>) -> Result<String> {
        let research = self.research_only(topic).await?;

        let task = tasks::content_creation_task(Some(research));
        self.content_creator_agent("post")?
            .run_task(&task.prompt())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent::llm::{CompletionRequest, CompletionResponse, Message};
    use agent::search::{AggregatorConfig, SearchBackend, SearchRequest, SearchResponse};
    use agent::tools::ToolCall;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const ANSWER: &str = "A chipmaker reported record quarterly revenue of $30B, up 94% year over year.";

    struct NewsBackend;

    #[async_trait]
    impl SearchBackend for NewsBackend {
        async fn search(
            &self,
            _request: &SearchRequest,
        ) -> std::result::Result<SearchResponse, SearchError> {
            Ok(SearchResponse {
                answer: Some(ANSWER.to_string()),
                ..SearchResponse::default()
            })
        }
    }

    /// Searches once when a tool is offered, then answers with what it saw.
    #[derive(Default)]
    struct ScriptedLLM {
        prompts: Mutex<Vec<Vec<Message>>>,
    }

    #[async_trait]
    impl LLM for ScriptedLLM {
        async fn completion<'a>(
            &self,
            request: CompletionRequest<'a>,
        ) -> Result<CompletionResponse> {
            self.prompts.lock().unwrap().push(request.messages.to_vec());

            if let Some(Message::Tool { result, .. }) = request.messages.last() {
                return Ok(CompletionResponse {
                    content: format!("BRIEF\n{result}"),
                    tool_calls: vec![],
                });
            }

            if !request.tools.is_empty() {
                return Ok(CompletionResponse {
                    content: String::new(),
                    tool_calls: vec![ToolCall {
                        id: "call1".to_string(),
                        name: request.tools[0].name.clone(),
                        args: "{\"query\":\"AI chips\"}".to_string(),
                    }],
                });
            }

            Ok(CompletionResponse {
                content: "Record revenue. One product line. #AI".to_string(),
                tool_calls: vec![],
            })
        }
    }

    fn system_prompt(history: &[Message]) -> &str {
        match history.first() {
            Some(Message::System(prompt)) => prompt.as_str(),
            _ => "",
        }
    }

    fn last_user_prompt(history: &[Message]) -> &str {
        history
            .iter()
            .rev()
            .find_map(|m| match m {
                Message::User(prompt) => Some(prompt.as_str()),
                _ => None,
            })
            .unwrap_or("")
    }

    fn crew(
        llm: Arc<ScriptedLLM>,
        search: std::result::Result<TrendingSearch, SearchError>,
    ) -> ContentCrew {
        ContentCrew::with_search(llm, search, None)
    }

    fn news_search() -> std::result::Result<TrendingSearch, SearchError> {
        Ok(TrendingSearch::new(
            Arc::new(NewsBackend),
            AggregatorConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_create_post_passes_research_to_writer() -> Result<()> {
        let llm = Arc::new(ScriptedLLM::default());
        let post = crew(llm.clone(), news_search())
            .create_post(Some("AI chips"))
            .await?;

        assert_eq!(post, "Record revenue. One product line. #AI");

        let prompts = llm.prompts.lock().unwrap();
        let writer = prompts.last().unwrap();
        assert!(system_prompt(writer).starts_with("You are LinkedIn Content Creator."));

        let writer_prompt = last_user_prompt(writer);
        assert!(writer_prompt.contains("This is the context you're working with:\nBRIEF\n"));
        assert!(writer_prompt.contains(ANSWER));

        let researcher = &prompts[0];
        assert!(system_prompt(researcher).starts_with("You are Content Researcher."));
        assert!(last_user_prompt(researcher).contains("Search for: 'AI chips'"));
        Ok(())
    }

    #[tokio::test]
    async fn test_hot_topics_use_search_tool() -> Result<()> {
        let llm = Arc::new(ScriptedLLM::default());
        let topics = crew(llm.clone(), news_search())
            .get_hot_topics(Some("enterprise tech"))
            .await?;

        assert!(topics.starts_with("BRIEF\n=== SEARCH: "));
        assert!(topics.contains("=== SEARCH: trending AI chips... ===\n"));
        assert!(topics.contains(ANSWER));
        assert_eq!(llm.prompts.lock().unwrap().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_key_reaches_agent_as_text() -> Result<()> {
        let llm = Arc::new(ScriptedLLM::default());
        let brief = crew(llm, Err(SearchError::MissingApiKey))
            .research_only(None)
            .await?;

        assert_eq!(
            brief,
            "BRIEF\nError: LINKUP_API_KEY environment variable not set"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_transcripts_are_written() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("crew-transcripts-{}", std::process::id()));
        let llm = Arc::new(ScriptedLLM::default());
        ContentCrew::with_search(llm, news_search(), Some(dir.clone()))
            .create_post(None)
            .await?;

        let research = std::fs::read_to_string(dir.join("research.md"))?;
        assert!(research.starts_with("## Content Researcher\n\n"));
        assert!(research.contains(ANSWER));

        let post = std::fs::read_to_string(dir.join("post.md"))?;
        assert!(post.starts_with("## LinkedIn Content Creator\n\n"));

        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
