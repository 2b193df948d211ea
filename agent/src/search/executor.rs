use super::{SearchBackend, SearchRequest, SearchResponse};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

const PLACEHOLDER_ANSWERS: [&str; 2] = ["undefined", "none"];

/// Runs one query against the backend and returns its answer text.
///
/// Failures and timeouts are logged and come back as an empty string.
pub async fn execute_single_search(
    backend: &dyn SearchBackend,
    query: &str,
    limit: Duration,
) -> String {
    debug!(query, "executing search");
    let request = SearchRequest::sourced_answer(query);

    match timeout(limit, backend.search(&request)).await {
        Ok(Ok(response)) => extract_answer(response),
        Ok(Err(e)) => {
            warn!(query, error = %e, "search failed");
            String::new()
        }
        Err(_) => {
            warn!(query, ?limit, "search timed out");
            String::new()
        }
    }
}

/// Prefers the sourced answer, then the raw results list.
pub fn extract_answer(response: SearchResponse) -> String {
    match response.answer {
        Some(answer) if !answer.is_empty() => {
            let normalized = answer.trim().to_lowercase();
            if normalized.is_empty() || PLACEHOLDER_ANSWERS.contains(&normalized.as_str()) {
                String::new()
            } else {
                answer
            }
        }
        _ => match response.results {
            Some(results) if !results.is_empty() => serde_json::Value::Array(results).to_string(),
            _ => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchError;
    use crate::search::mock::{Reply, ScriptedBackend};
    use serde_json::json;

    #[test]
    fn test_extract_answer() {
        let response = SearchResponse {
            answer: Some("a real answer".to_string()),
            results: Some(vec![json!({"name": "ignored"})]),
            ..SearchResponse::default()
        };
        assert_eq!(extract_answer(response), "a real answer");
    }

    #[test]
    fn test_placeholder_answer_is_rejected() {
        for placeholder in ["undefined", "None", " NONE "] {
            let response = SearchResponse {
                answer: Some(placeholder.to_string()),
                results: Some(vec![json!("not used")]),
                ..SearchResponse::default()
            };
            assert_eq!(extract_answer(response), "");
        }
    }

    #[test]
    fn test_results_are_stringified() {
        let response = SearchResponse {
            answer: Some(String::new()),
            results: Some(vec![json!({"name": "a", "url": "https://a.example"})]),
            ..SearchResponse::default()
        };
        assert_eq!(
            extract_answer(response),
            r#"[{"name":"a","url":"https://a.example"}]"#
        );

        assert_eq!(extract_answer(SearchResponse::default()), "");
        let empty = SearchResponse {
            results: Some(vec![]),
            ..SearchResponse::default()
        };
        assert_eq!(extract_answer(empty), "");
    }

    #[tokio::test]
    async fn test_error_becomes_empty() {
        let backend = ScriptedBackend::new().reply("q", Reply::Fail(SearchError::RateLimited));
        let result = execute_single_search(&backend, "q", Duration::from_secs(1)).await;
        assert_eq!(result, "");
        assert_eq!(backend.calls(), vec!["q".to_string()]);
    }

    #[tokio::test]
    async fn test_timeout_becomes_empty() {
        let backend = ScriptedBackend::new().reply("slow", Reply::Hang);
        let result = execute_single_search(&backend, "slow", Duration::from_millis(50)).await;
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn test_answer_is_returned() {
        let backend = ScriptedBackend::new().answer("q", "answer text");
        let result = execute_single_search(&backend, "q", Duration::from_secs(1)).await;
        assert_eq!(result, "answer text");
    }
}
