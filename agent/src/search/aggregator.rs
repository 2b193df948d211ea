use super::SearchBackend;
use super::executor::execute_single_search;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Appended after the collected search sections.
pub const ANALYSIS_BLOCK: &str = include_str!("prompts/analysis.md");

/// Returned verbatim when no query produced usable content.
pub const FALLBACK_BLOCK: &str = include_str!("prompts/fallback.md");

pub const DEFAULT_QUERIES: [&str; 5] = [
    "latest business news",
    "latest tech news",
    "breaking news today",
    "latest CEO news",
    "trending news today",
];

const LABEL_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Queries dispatched concurrently in the first round
    pub parallel_queries: usize,
    pub query_timeout: Duration,
    /// Results at or below this many characters are discarded
    pub min_result_chars: usize,
    /// Below this many first-round results the remaining queries are tried
    pub min_parallel_results: usize,
    pub target_results: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            parallel_queries: 3,
            query_timeout: Duration::from_secs(10),
            min_result_chars: 50,
            min_parallel_results: 2,
            target_results: 3,
        }
    }
}

pub fn build_queries(topic: Option<&str>) -> Vec<String> {
    match topic.map(str::trim).filter(|topic| !topic.is_empty()) {
        Some(topic) => vec![
            format!("latest news {topic}"),
            format!("trending {topic}"),
            format!("breaking news {topic}"),
            format!("recent developments {topic}"),
            format!("{topic} news today"),
        ],
        None => DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
    }
}

fn section(query: &str, result: &str) -> String {
    let label: String = query.chars().take(LABEL_CHARS).collect();
    format!("=== SEARCH: {label}... ===\n{result}\n")
}

/// Multi-query trending search with a sequential second round.
#[derive(Clone)]
pub struct TrendingSearch {
    backend: Arc<dyn SearchBackend>,
    config: AggregatorConfig,
}

impl TrendingSearch {
    pub fn new(backend: Arc<dyn SearchBackend>, config: AggregatorConfig) -> Self {
        Self { backend, config }
    }

    fn is_informative(&self, result: &str) -> bool {
        result.chars().count() > self.config.min_result_chars
    }

    /// Never fails and never returns an empty string.
    pub async fn search(&self, topic: Option<&str>) -> String {
        let queries = build_queries(topic);
        match topic.map(str::trim).filter(|t| !t.is_empty()) {
            Some(topic) => info!(topic, "topic-focused trending search"),
            None => info!("default trending search"),
        }

        let split = self.config.parallel_queries.min(queries.len());
        let (parallel, sequential) = queries.split_at(split);

        let mut sections = Vec::new();
        let mut set = JoinSet::new();
        for query in parallel {
            let backend = self.backend.clone();
            let query = query.clone();
            let limit = self.config.query_timeout;
            set.spawn(async move {
                let result = execute_single_search(backend.as_ref(), &query, limit).await;
                (query, result)
            });
        }

        // completion order, not submission order
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((query, result)) if self.is_informative(&result) => {
                    sections.push(section(&query, &result));
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "search task did not complete"),
            }
        }

        if sections.len() < self.config.min_parallel_results {
            for query in sequential {
                let result =
                    execute_single_search(self.backend.as_ref(), query, self.config.query_timeout)
                        .await;
                if self.is_informative(&result) {
                    sections.push(section(query, &result));
                    if sections.len() >= self.config.target_results {
                        break;
                    }
                }
            }
        }

        if sections.is_empty() {
            warn!("no usable search results, returning fallback topics");
            return FALLBACK_BLOCK.to_string();
        }

        info!(results = sections.len(), "trending search completed");
        let mut report = sections.join("\n");
        report.push_str(ANALYSIS_BLOCK);
        report
    }
}
