use crate::callbacks;
use crate::llm;
use crate::llm::Message;
use crate::tools;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub trait StopCondition {
    fn done(&self, history: &[llm::Message]) -> bool;
}

/// Stops once the model answers without requesting any tool.
pub struct FinalAnswer;

impl StopCondition for FinalAnswer {
    fn done(&self, history: &[llm::Message]) -> bool {
        matches!(history.last(), Some(Message::Assistant(_, tool_calls)) if tool_calls.is_empty())
    }
}

const FORCE_ANSWER_PROMPT: &str = "You have used all of your allowed steps. \
Now it's time you MUST give your absolute best final answer, without calling any more tools.";

type Tool = Box<dyn tools::Tool + Send>;
type Callback = Box<dyn callbacks::Callback + Send>;

pub struct Agent {
    name: String,
    system_prompt: Option<String>,
    llm: Arc<dyn llm::LLM + Send + Sync>,
    tools: HashMap<String, Tool>,
    callbacks: Vec<Callback>,
    tool_defs: Vec<tools::ToolDefinition>,
    stop_condition: Box<dyn StopCondition + Send>,
    max_iterations: Option<usize>,
}

impl Agent {
    pub fn name(&self) -> &str {
        &self.name
    }

    async fn execute_tool_call(
        &mut self,
        tool_call: &tools::ToolCall,
        messages: Vec<llm::Message>,
    ) -> Result<Vec<llm::Message>> {
        let tool = self
            .tools
            .get_mut(&tool_call.name)
            .ok_or(Error::ToolDoesNotExist(tool_call.name.clone()))?;

        debug!(agent = %self.name, tool = %tool_call.name, "invoking tool");
        let messages = tool.invoke(tool_call, messages).await?;

        Ok(messages)
    }

    async fn step(
        &mut self,
        mut messages: Vec<llm::Message>,
        with_tools: bool,
    ) -> Result<Vec<Message>> {
        let tool_defs: &[tools::ToolDefinition] = if with_tools { &self.tool_defs } else { &[] };
        let next = self
            .llm
            .completion(llm::CompletionRequest {
                messages: &messages,
                tools: tool_defs,
            })
            .await?;

        messages.push(llm::Message::Assistant(
            next.content,
            next.tool_calls.clone(),
        ));

        for tool_call in &next.tool_calls {
            messages = self.execute_tool_call(tool_call, messages).await?;
        }

        for callback in &mut self.callbacks {
            messages = callback.call(messages).await?;
        }

        Ok(messages)
    }

    pub async fn run(&mut self, mut messages: Vec<llm::Message>) -> Result<Vec<Message>> {
        let mut iterations = 0;

        while !self.stop_condition.done(&messages) {
            if self.max_iterations.is_some_and(|max| iterations >= max) {
                warn!(agent = %self.name, iterations, "iteration limit reached, forcing final answer");
                messages.push(Message::User(FORCE_ANSWER_PROMPT.to_string()));
                return self.step(messages, false).await;
            }

            messages = self.step(messages, true).await?;
            iterations += 1;
        }

        Ok(messages)
    }

    /// Runs a single task prompt and returns the final answer text.
    pub async fn run_task(&mut self, task: &str) -> Result<String> {
        info!(agent = %self.name, "starting task");

        let mut messages = Vec::new();
        if let Some(system_prompt) = &self.system_prompt {
            messages.push(Message::System(system_prompt.clone()));
        }
        messages.push(Message::User(task.to_string()));

        let history = self.run(messages).await?;

        match history.last() {
            Some(Message::Assistant(content, _)) if !content.trim().is_empty() => {
                info!(agent = %self.name, "task completed");
                Ok(content.clone())
            }
            _ => Err(Error::AgentWorkflowError(format!(
                "{} finished without a final answer",
                self.name
            ))),
        }
    }
}

pub struct AgentBuilder {
    name: String,
    system_prompt: Option<String>,
    llm: Option<Arc<dyn llm::LLM + Send + Sync>>,
    tools: Vec<Tool>,
    callbacks: Vec<Callback>,
    stop_condition: Option<Box<dyn StopCondition + Send>>,
    max_iterations: Option<usize>,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            name: "agent".to_string(),
            system_prompt: None,
            llm: None,
            tools: Vec::new(),
            callbacks: Vec::new(),
            stop_condition: None,
            max_iterations: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = Some(prompt);
        self
    }

    pub fn llm(mut self, llm: Arc<dyn llm::LLM + Send + Sync>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn callback(mut self, callback: Callback) -> Self {
        self.callbacks.push(callback);
        self
    }

    pub fn stop_condition(mut self, cond: Box<dyn StopCondition + Send>) -> Self {
        self.stop_condition = Some(cond);
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn build(self) -> Result<Agent> {
        let mut tool_defs = Vec::new();
        let mut tools = HashMap::new();

        for tool in self.tools {
            let def = tool.definition()?;
            tools.insert(def.name.clone(), tool);
            tool_defs.push(def);
        }

        Ok(Agent {
            name: self.name,
            system_prompt: self.system_prompt,
            llm: self
                .llm
                .ok_or(Error::MissingArg("llm is required for agent".to_string()))?,
            tools,
            tool_defs,
            callbacks: self.callbacks,
            stop_condition: self.stop_condition.unwrap_or_else(|| Box::new(FinalAnswer)),
            max_iterations: self.max_iterations,
        })
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
