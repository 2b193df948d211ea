pub struct AgentProfile {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

impl AgentProfile {
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role,
            self.backstory.trim(),
            self.goal
        )
    }
}

pub const RESEARCHER: AgentProfile = AgentProfile {
    role: "Content Researcher",
    goal: "Find engaging and trending topics related to professional development, \
industry insights, and LinkedIn content strategies using Linkup search",
    backstory: include_str!("prompts/researcher_backstory.md"),
};

pub const CONTENT_CREATOR: AgentProfile = AgentProfile {
    role: "LinkedIn Content Creator",
    goal: "Create engaging, professional LinkedIn posts that drive engagement \
and provide value to the audience based on research findings",
    backstory: include_str!("prompts/creator_backstory.md"),
};

/// Tool-calling rounds each agent gets before it must answer.
pub const MAX_ITERATIONS: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt() {
        let prompt = RESEARCHER.system_prompt();
        assert!(prompt.starts_with("You are Content Researcher. You are a senior AI industry analyst"));
        assert!(prompt.ends_with(&format!("Your personal goal is: {}", RESEARCHER.goal)));
        assert!(CONTENT_CREATOR.system_prompt().contains("LinkedIn Content Creator"));
    }
}
