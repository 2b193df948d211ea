use crate::Result;
use crate::llm::Message;
use crate::search::{
    AggregatorConfig, LinkupClient, LinkupSettings, SearchError, TrendingSearch,
};
use crate::tools::{FunctionalTool, ToolCall, ToolDefinition};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const NAME: &str = "linkup_search";

const DESCRIPTION: &str = "Searches for relevant content and trends using Linkup API. \
Use this tool to find current industry insights, trending topics, \
and professional content that can be used for LinkedIn posts.";

#[derive(Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// The search query to find relevant content
    pub query: String,
}

/// Exposes [`TrendingSearch`] to an agent. Every outcome, including a
/// misconfigured backend, is reported to the model as text.
pub struct TrendingSearchTool {
    search: std::result::Result<TrendingSearch, SearchError>,
}

impl TrendingSearchTool {
    pub fn new(search: TrendingSearch) -> Box<Self> {
        Self::with_search(Ok(search))
    }

    /// A tool whose search could not be set up answers with the setup error.
    pub fn with_search(search: std::result::Result<TrendingSearch, SearchError>) -> Box<Self> {
        Box::new(Self { search })
    }

    pub fn linkup(settings: &LinkupSettings, config: AggregatorConfig) -> Box<Self> {
        Self::with_search(linkup_search(settings, config))
    }
}

/// Builds a [`TrendingSearch`] over the Linkup API.
pub fn linkup_search(
    settings: &LinkupSettings,
    config: AggregatorConfig,
) -> std::result::Result<TrendingSearch, SearchError> {
    let search =
        LinkupClient::new(settings).map(|client| TrendingSearch::new(Arc::new(client), config));
    if let Err(e) = &search {
        warn!(error = %e, "linkup search unavailable");
    }
    search
}

impl TrendingSearchTool {
    async fn run(&self, call: &ToolCall) -> String {
        let search = match &self.search {
            Ok(search) => search,
            Err(e) => return e.to_string(),
        };

        let args: SearchArgs = match call.args() {
            Ok(args) => args,
            Err(e) => return SearchError::Unexpected(e.to_string()).to_string(),
        };

        info!(query = %args.query, "searching for trending topics");
        search.search(Some(&args.query)).await
    }
}

#[async_trait]
impl FunctionalTool for TrendingSearchTool {
    fn definition(&self) -> Result<ToolDefinition> {
        ToolDefinition::new::<SearchArgs>(NAME, DESCRIPTION)
    }

    async fn invoke_fn(&mut self, call: &ToolCall) -> Result<Message> {
        Ok(Message::Tool {
            id: call.id.clone(),
            name: NAME.to_string(),
            result: self.run(call).await,
        })
    }
}
