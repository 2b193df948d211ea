use crate::Result;
use crate::tools::{ToolCall, ToolDefinition};
use async_trait::async_trait;
use std::hash::{DefaultHasher, Hash, Hasher};

mod openai;
pub use openai::OpenAI;

#[derive(Clone, Debug, Hash)]
pub enum Message {
    User(String),
    Assistant(String, Vec<ToolCall>),
    System(String),
    Tool {
        id: String,
        name: String,
        result: String,
    },
}

impl Message {
    pub fn get_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::System(content) => write!(f, "#### System\n\n{}\n\n", content),
            Message::User(content) => write!(f, "#### User\n\n{}\n\n", content),
            Message::Assistant(content, tool_calls) => {
                write!(f, "#### Assistant\n\n{}\n\n", content)?;
                for call in tool_calls {
                    write!(f, "{}", call)?;
                }
                if !tool_calls.is_empty() {
                    writeln!(f)?;
                }
                Ok(())
            }
            Message::Tool { id, name, result } => {
                write!(f, "#### Tool `{}` ({})\n\n{}\n\n", name, id, result)
            }
        }
    }
}

pub struct CompletionRequest<'a> {
    pub messages: &'a [Message],
    pub tools: &'a [ToolDefinition],
}

pub struct CompletionResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

#[async_trait]
pub trait LLM {
    async fn completion<'a>(&self, request: CompletionRequest<'a>) -> Result<CompletionResponse>;
}
