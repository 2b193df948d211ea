//! Task prompts handed to the crew's agents.

pub const DEFAULT_RESEARCH_QUERY: &str = "latest professional trends linkedin content strategy";

const RESEARCH_DESCRIPTION: &str = include_str!("prompts/research_task.md");
const RESEARCH_EXPECTED: &str = include_str!("prompts/research_expected.md");
const TOPIC_DISCOVERY_DESCRIPTION: &str = include_str!("prompts/topic_discovery_task.md");
const TOPIC_DISCOVERY_EXPECTED: &str = include_str!("prompts/topic_discovery_expected.md");
const CONTENT_CREATION_DESCRIPTION: &str = include_str!("prompts/content_creation_task.md");
const CONTENT_CREATION_EXPECTED: &str = include_str!("prompts/content_creation_expected.md");

/// Words that mark an area as a style request ("more funny") rather than a subject.
const CUSTOM_INSTRUCTION_KEYWORDS: [&str; 17] = [
    "funny",
    "humor",
    "real life",
    "viral",
    "drama",
    "entertainment",
    "cultural",
    "social",
    "personal",
    "human interest",
    "bizarre",
    "weird",
    "surprising",
    "shocking",
    "emotional",
    "trending",
    "moment",
];

pub struct Task {
    pub description: String,
    pub expected_output: String,
    /// Outputs of earlier tasks this one builds on
    pub context: Vec<String>,
}

impl Task {
    pub fn prompt(&self) -> String {
        let mut prompt = format!(
            "{}\n\nThis is the expected criteria for your final answer: {}\n\
you MUST return the actual complete content as the final answer, not a summary.",
            self.description.trim(),
            self.expected_output.trim()
        );

        if !self.context.is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(&self.context.join("\n\n"));
        }

        prompt
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn is_custom_instruction(area: &str) -> bool {
    let area = area.to_lowercase();
    CUSTOM_INSTRUCTION_KEYWORDS
        .iter()
        .any(|keyword| area.contains(keyword))
}

pub fn research_task(topic: Option<&str>) -> Task {
    let search_query = non_blank(topic).unwrap_or(DEFAULT_RESEARCH_QUERY);

    Task {
        description: RESEARCH_DESCRIPTION.replace("{search_query}", search_query),
        expected_output: RESEARCH_EXPECTED.to_string(),
        context: Vec::new(),
    }
}

/// Returns the search focus and the description of what to look for.
pub fn topic_search_focus(general_area: Option<&str>) -> (String, String) {
    match non_blank(general_area) {
        Some(area) if is_custom_instruction(area) => (
            format!("trending viral moments {area}"),
            format!(
                "viral trending topics that are {area} and can be connected to Linkup's expertise"
            ),
        ),
        Some(area) => (area.to_string(), format!("trending topics in {area}")),
        None => (
            "viral trending moments".to_string(),
            "viral trending topics and real-time trending content".to_string(),
        ),
    }
}

pub fn topic_discovery_task(general_area: Option<&str>) -> Task {
    let (search_focus, search_description) = topic_search_focus(general_area);

    Task {
        description: TOPIC_DISCOVERY_DESCRIPTION
            .replace("{search_description}", &search_description)
            .replace("{search_focus}", &search_focus),
        expected_output: TOPIC_DISCOVERY_EXPECTED.to_string(),
        context: Vec::new(),
    }
}

pub fn content_creation_task(research: Option<String>) -> Task {
    Task {
        description: CONTENT_CREATION_DESCRIPTION.to_string(),
        expected_output: CONTENT_CREATION_EXPECTED.to_string(),
        context: research.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_instruction_detection() {
        assert!(is_custom_instruction("more funny"));
        assert!(is_custom_instruction("Real Life related"));
        assert!(is_custom_instruction("business drama"));
        assert!(!is_custom_instruction("enterprise tech"));
        assert!(!is_custom_instruction("AI"));
    }

    #[test]
    fn test_topic_search_focus() {
        assert_eq!(
            topic_search_focus(Some("viral moments")).0,
            "trending viral moments viral moments"
        );
        assert_eq!(
            topic_search_focus(Some("enterprise tech")),
            (
                "enterprise tech".to_string(),
                "trending topics in enterprise tech".to_string()
            )
        );
        assert_eq!(topic_search_focus(None).0, "viral trending moments");
        assert_eq!(topic_search_focus(Some("  ")).0, "viral trending moments");
    }

    #[test]
    fn test_research_task_query() {
        let task = research_task(Some("quantum computing"));
        assert!(task.description.contains("Search for: 'quantum computing'"));

        let task = research_task(None);
        assert!(
            task.description
                .contains(&format!("Search for: '{}'", DEFAULT_RESEARCH_QUERY))
        );
    }

    #[test]
    fn test_topic_discovery_task_has_no_placeholders() {
        let task = topic_discovery_task(Some("enterprise tech"));
        assert!(task.description.contains("trending topics in enterprise tech"));
        assert!(!task.description.contains("{search_"));
    }

    #[test]
    fn test_prompt_includes_context() {
        let task = content_creation_task(Some("brief about AI chips".to_string()));
        let prompt = task.prompt();
        assert!(prompt.contains("This is the expected criteria for your final answer: "));
        assert!(prompt.ends_with("This is the context you're working with:\nbrief about AI chips"));

        let prompt = content_creation_task(None).prompt();
        assert!(!prompt.contains("context you're working with"));
    }
}
