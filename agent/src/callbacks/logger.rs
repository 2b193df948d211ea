use crate::Result;
use crate::callbacks::Callback;
use crate::llm::Message;
use async_trait::async_trait;
use std::io::Write;
use tracing::debug;

/// Writes a markdown transcript of an agent run, one section per step.
///
/// Only messages added since the previous step are written. If the history
/// was rewritten in the meantime the whole history is written again.
pub struct MessageLogger<W: Write + Send> {
    last_hashes: Vec<u64>,
    writer: W,
    step: u32,
}

impl<W: Write + Send> MessageLogger<W> {
    pub fn new(agent: &str, mut writer: W) -> Result<Box<Self>> {
        write!(writer, "## {}\n\n", agent)?;

        Ok(Box::new(Self {
            last_hashes: Vec::new(),
            writer,
            step: 0,
        }))
    }

    fn display_messages(&mut self, messages: &[Message]) -> Result<()> {
        write!(self.writer, "### Step {}\n\n", self.step)?;

        messages
            .iter()
            .try_for_each(|m| write!(self.writer, "{}", m))?;

        write!(self.writer, "---\n\n")?;

        Ok(())
    }

    fn display_history_rewritten(&mut self) -> Result<()> {
        write!(self.writer, "### [HISTORY REWRITTEN]\n\n")?;
        Ok(())
    }

    fn is_continuation(&self, new_hashes: &[u64]) -> bool {
        new_hashes.len() >= self.last_hashes.len()
            && new_hashes
                .iter()
                .zip(self.last_hashes.iter())
                .all(|(a, b)| a == b)
    }
}

#[async_trait]
impl<W: Write + Send> Callback for MessageLogger<W> {
    async fn call(&mut self, messages: Vec<Message>) -> Result<Vec<Message>> {
        let new_hashes = messages.iter().map(Message::get_hash).collect::<Vec<_>>();

        if self.is_continuation(&new_hashes) {
            self.display_messages(&messages[self.last_hashes.len()..])?;
        } else {
            self.display_history_rewritten()?;
            self.display_messages(&messages)?;
        }

        self.writer.flush()?;
        debug!(step = self.step, messages = messages.len(), "transcript step written");

        self.step += 1;
        self.last_hashes = new_hashes;

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::MessageLogger;
    use crate::Result;
    use crate::callbacks::Callback;
    use crate::llm::Message;
    use crate::tools::ToolCall;

    #[tokio::test]
    async fn test_only_new_messages_are_written() -> Result<()> {
        let mut out = Vec::new();
        {
            let mut logger = MessageLogger::new("Content Researcher", &mut out)?;

            let mut history = vec![
                Message::System("system prompt".to_string()),
                Message::User("find trends".to_string()),
            ];
            history = logger.call(history).await?;

            history.push(Message::Assistant(
                String::new(),
                vec![ToolCall {
                    id: "call1".to_string(),
                    name: "linkup_search".to_string(),
                    args: "{\"query\":\"AI\"}".to_string(),
                }],
            ));
            history.push(Message::Tool {
                id: "call1".to_string(),
                name: "linkup_search".to_string(),
                result: "search output".to_string(),
            });
            logger.call(history).await?;
        }

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.starts_with("## Content Researcher\n\n### Step 0\n\n"));
        assert_eq!(transcript.matches("find trends").count(), 1);
        assert!(transcript.contains("### Step 1\n\n#### Assistant"));
        assert!(transcript.contains("- linkup_search (call1)"));
        assert!(transcript.contains("#### Tool `linkup_search` (call1)\n\nsearch output"));
        assert!(!transcript.contains("HISTORY REWRITTEN"));
        Ok(())
    }

    #[tokio::test]
    async fn test_rewritten_history_is_written_again() -> Result<()> {
        let mut out = Vec::new();
        {
            let mut logger = MessageLogger::new("writer", &mut out)?;
            logger
                .call(vec![
                    Message::User("first".to_string()),
                    Message::Assistant("draft".to_string(), vec![]),
                ])
                .await?;
            logger
                .call(vec![Message::User("second".to_string())])
                .await?;
        }

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("### [HISTORY REWRITTEN]\n\n### Step 1\n\n#### User\n\nsecond"));
        Ok(())
    }
}
