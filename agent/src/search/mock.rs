use super::{SearchBackend, SearchError, SearchRequest, SearchResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub(crate) enum Reply {
    Answer(String),
    Fail(SearchError),
    Hang,
}

/// Backend answering from a per-query script and recording every query it sees.
pub(crate) struct ScriptedBackend {
    script: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self {
            script: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn reply(mut self, query: &str, reply: Reply) -> Self {
        self.script.insert(query.to_string(), reply);
        self
    }

    pub(crate) fn answer(self, query: &str, answer: &str) -> Self {
        self.reply(query, Reply::Answer(answer.to_string()))
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        self.calls.lock().unwrap().push(request.q.clone());

        match self.script.get(&request.q) {
            Some(Reply::Answer(answer)) => Ok(SearchResponse {
                answer: Some(answer.clone()),
                ..SearchResponse::default()
            }),
            Some(Reply::Fail(e)) => Err(e.clone()),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(SearchResponse::default())
            }
            None => Err(SearchError::Unexpected(format!("no reply for {}", request.q))),
        }
    }
}
