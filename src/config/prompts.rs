//! Prompt templates for tubeqa.
//!
//! The answer prompt can be customized by placing an `answer.toml` file in the custom
//! prompts directory. Templates use `{{name}}` placeholders.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub answer: AnswerPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompt for answering a question about one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerPrompts {
    pub user: String,
}

impl Default for AnswerPrompts {
    fn default() -> Self {
        Self {
            user: r#"You are a helpful AI assistant.
Answer the question based on the given YouTube video transcript.
The transcript contains timestamps in the format [Time: SECONDS].

Your Goal:
1. Answer the question accurately.
2. For every key point you make, you MUST append a clickable link to the video timestamp.
3. The format for the link is: https://youtu.be/{{video_id}}?t=SECONDS
4. Present the answer in bullet points.

Example Output format:
* The speaker explains that Python is versatile. [Watch](https://youtu.be/{{video_id}}?t=120)
* He mentions that memory management is automatic. [Watch](https://youtu.be/{{video_id}}?t=150)

Context:
{{context}}

Question:
{{question}}
"#
            .to_string(),
        }
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("Invalid regex"))
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let answer_path = crate::config::Settings::expand_path(dir).join("answer.toml");
            if answer_path.exists() {
                let content = std::fs::read_to_string(&answer_path)?;
                prompts.answer = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Substitution is a single pass: text inserted for one placeholder is never scanned
    /// for further placeholders. Unknown placeholders are left as they are.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_has_placeholders() {
        let prompts = Prompts::default();
        for name in ["{{context}}", "{{question}}", "{{video_id}}"] {
            assert!(prompts.answer.user.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_does_not_expand_inserted_text() {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), "quote: {{question}}".to_string());
        vars.insert("question".to_string(), "why?".to_string());

        let result = Prompts::render("{{context}} / {{question}} / {{missing}}", &vars);
        assert_eq!(result, "quote: {{question}} / why? / {{missing}}");
    }

    #[test]
    fn test_custom_variables_lose_to_call_site() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("tone".to_string(), "formal".to_string());
        prompts.variables.insert("question".to_string(), "ignored".to_string());

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "what?".to_string());

        let result = prompts.render_with_custom("{{tone}} {{question}}", &vars);
        assert_eq!(result, "formal what?");
    }

    #[test]
    fn test_load_custom_answer_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("answer.toml"),
            "user = \"Q: {{question}}\\nC: {{context}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.answer.user, "Q: {{question}}\nC: {{context}}");
    }
}
