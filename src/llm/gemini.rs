use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::llm::parser::parse_classification;
use crate::llm::prompts::build_prompt;
use crate::llm::provider::Summarizer;
use crate::models::Classification;

/// Fixed sleep before every generation call. A rate-limit guard, not a retry
/// mechanism.
const PACING_DELAY: Duration = Duration::from_secs(2);

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    pacing: Duration,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| "gemini-2.0-flash".to_string()),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            pacing: PACING_DELAY,
        })
    }
}

#[async_trait]
impl Summarizer for GeminiProvider {
    async fn summarize(&self, readme: &str, description: &str) -> Result<Classification> {
        tokio::time::sleep(self.pacing).await;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(description, readme),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::AiApi(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::AiApi(format!("Gemini error ({}): {}", status, body)));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::AiApi(format!("Failed to parse Gemini response: {}", e)))?;

        if let Some(error) = result.error {
            return Err(Error::AiApi(error.message));
        }

        let text = result
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(Error::AiApi("Empty response from Gemini".to_string()));
        }

        parse_classification(&text)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
