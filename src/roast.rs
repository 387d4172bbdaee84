//! DeepSeek chat-completion client that roasts a list of artists.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::UpstreamError;

const SERVICE: &str = "DeepSeek";

/// Returned as-is when the user has no top artists.
pub const EMPTY_LIBRARY_ROAST: &str = "Wow... you don't even listen to music?";

const SYSTEM_PROMPT: &str = "You are an AI that roasts people's music taste in a funny way.";

const TEMPERATURE: f32 = 1.0;
const MAX_TOKENS: u32 = 250;
const PRESENCE_PENALTY: f32 = 0.6;
const FREQUENCY_PENALTY: f32 = 0.5;

#[derive(Clone)]
pub struct Roaster {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl Roaster {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.deepseek_api_key.clone(),
            base_url: config.deepseek_api_url.clone(),
            model: config.deepseek_model.clone(),
        }
    }

    /// Roasts the given artists. An empty list never reaches the API.
    pub async fn roast(&self, artists: &[String]) -> Result<String, UpstreamError> {
        if artists.is_empty() {
            return Ok(EMPTY_LIBRARY_ROAST.to_string());
        }

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(artists),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            presence_penalty: PRESENCE_PENALTY,
            frequency_penalty: FREQUENCY_PENALTY,
        };

        // Key goes out verbatim; any provider prefix belongs in the configured value.
        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { service: SERVICE, source })?;

        let body: ChatResponse = UpstreamError::check(SERVICE, res)
            .await?
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed {
                service: SERVICE,
                reason: format!("completion parse failed: {}", e),
            })?;

        body.first_content().ok_or_else(|| UpstreamError::Malformed {
            service: SERVICE,
            reason: "no message content".into(),
        })
    }
}

pub fn build_prompt(artists: &[String]) -> String {
    format!(
        "Roast my music taste based on these artists: {}",
        artists.join(", ")
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}
