//! Generative Language (`generateContent`) backed advisor.

use super::{
    advice_prompt, summary_prompt, GenerationHints, StudyAdvisor, ADVICE_EMPTY_FALLBACK,
    ADVICE_ERROR_FALLBACK, ADVICE_HINTS, SUMMARY_EMPTY_FALLBACK, SUMMARY_ERROR_FALLBACK,
    SUMMARY_HINTS,
};
use crate::config::AdvisorConfig;
use crate::model::profile::Profile;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint answered with status {status}")]
    Status { status: u16 },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Advisor backed by the hosted text-generation endpoint.
pub struct GeminiAdvisor {
    client: Client,
    url: String,
    api_key: String,
}

impl Debug for GeminiAdvisor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdvisor")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl GeminiAdvisor {
    /// Builds a client bounded by `config.timeout_secs`.
    pub fn new(config: &AdvisorConfig, api_key: String) -> Result<Self, GeminiError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            client,
            url,
            api_key,
        })
    }

    /// Sends one prompt and returns the raw generated text (maybe empty).
    pub async fn generate(
        &self,
        prompt: &str,
        hints: GenerationHints,
    ) -> Result<String, GeminiError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: hints.temperature,
                max_output_tokens: hints.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeminiError::Status {
                status: status.as_u16(),
            });
        }
        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.into_text())
    }

    async fn generate_or(
        &self,
        operation: &'static str,
        prompt: &str,
        hints: GenerationHints,
        on_error: &str,
        on_empty: &str,
    ) -> String {
        let started_at = Instant::now();
        match self.generate(prompt, hints).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!(
                    "event=advisor_call module=advisor status=ok op={operation} duration_ms={} chars={}",
                    started_at.elapsed().as_millis(),
                    text.len()
                );
                text
            }
            Ok(_) => {
                warn!(
                    "event=advisor_call module=advisor status=empty op={operation} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                on_empty.to_string()
            }
            Err(err) => {
                warn!(
                    "event=advisor_call module=advisor status=error op={operation} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                on_error.to_string()
            }
        }
    }
}

#[async_trait]
impl StudyAdvisor for GeminiAdvisor {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn advice(&self, profile: &Profile, pending_titles: &[String]) -> String {
        let prompt = advice_prompt(profile, pending_titles);
        self.generate_or(
            "advice",
            &prompt,
            ADVICE_HINTS,
            ADVICE_ERROR_FALLBACK,
            ADVICE_EMPTY_FALLBACK,
        )
        .await
    }

    async fn summarize(&self, content: &str) -> String {
        let prompt = summary_prompt(content);
        self.generate_or(
            "summarize",
            &prompt,
            SUMMARY_HINTS,
            SUMMARY_ERROR_FALLBACK,
            SUMMARY_EMPTY_FALLBACK,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::GenerateResponse;

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Stay "},{"text":"focused."}]}},
                {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text(), "Stay focused.");
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.into_text(), "");

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.into_text(), "");
    }
}
