use thiserror::Error;

use crate::config::Config;
use crate::content::prompts::{build_explanation_prompt, build_problem_prompt};
use crate::content::{ExplainRequest, Explanation, Problem};
use crate::store::schema::MathSection;

const PROBLEM_SYSTEM_PROMPT: &str = "You are a math problem generator for kids.";
const EXPLAIN_SYSTEM_PROMPT: &str =
    "You are a friendly math tutor for young children. Respond only with valid JSON.";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("network feature disabled")]
    NetworkDisabled,
    #[error("api key not set in ${0}")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("malformed model response")]
    Malformed,
}

/// Blocking chat-completions client. Callers treat every error identically:
/// substitute the local fallback content.
pub struct ContentClient {
    base_url: String,
    model: String,
    api_key_env: String,
    timeout_secs: u64,
}

impl ContentClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }

    pub fn generate_problem(
        &self,
        section: MathSection,
        level: u8,
    ) -> Result<Problem, ContentError> {
        let raw = self.chat(PROBLEM_SYSTEM_PROMPT, &build_problem_prompt(section, level))?;
        serde_json::from_str(strip_code_fences(&raw)).map_err(|_| ContentError::Malformed)
    }

    pub fn explain(&self, request: &ExplainRequest) -> Result<Explanation, ContentError> {
        let prompt = build_explanation_prompt(
            &request.question,
            request.correct_answer,
            request.wrong_answer,
        );
        let raw = self.chat(EXPLAIN_SYSTEM_PROMPT, &prompt)?;
        serde_json::from_str(strip_code_fences(&raw)).map_err(|_| ContentError::Malformed)
    }

    #[cfg(feature = "network")]
    fn chat(&self, system: &str, user: &str) -> Result<String, ContentError> {
        use serde::Deserialize;
        use serde_json::json;

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMessage,
        }
        #[derive(Deserialize)]
        struct ChoiceMessage {
            content: String,
        }

        let api_key = std::env::var(&self.api_key_env)
            .map_err(|_| ContentError::MissingApiKey(self.api_key_env.clone()))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| ContentError::Request(e.to_string()))?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let response = client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| ContentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentError::Request(format!(
                "status {}",
                response.status()
            )));
        }

        let parsed: ChatResponse = response.json().map_err(|_| ContentError::Malformed)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ContentError::Malformed)
    }

    #[cfg(not(feature = "network"))]
    fn chat(&self, _system: &str, _user: &str) -> Result<String, ContentError> {
        Err(ContentError::NetworkDisabled)
    }
}

/// Models sometimes wrap JSON in markdown fences.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
}
