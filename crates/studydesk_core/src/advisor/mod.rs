//! Best-effort AI study advisor.
//!
//! # Responsibility
//! - Define the advisor capability consumed by the application shell.
//! - Build prompts from a profile snapshot or note text.
//! - Pick the network-backed or static implementation from config.
//!
//! # Invariants
//! - Advisor calls never fail from the caller's point of view: every error,
//!   timeout or empty answer is replaced by a fixed fallback string.
//! - Calls are never retried automatically.

mod board;
mod fallback;
mod gemini;

pub use board::{AdviceBoard, AdviceTicket, ADVICE_PLACEHOLDER};
pub use fallback::StaticAdvisor;
pub use gemini::{GeminiAdvisor, GeminiError};

use crate::config::AdvisorConfig;
use crate::model::profile::Profile;
use async_trait::async_trait;
use log::{info, warn};
use std::fmt::Debug;
use std::sync::Arc;

/// Advice shown when generation fails.
pub const ADVICE_ERROR_FALLBACK: &str = "Focus on your goals and take one step at a time.";
/// Advice shown when generation returns no text.
pub const ADVICE_EMPTY_FALLBACK: &str = "Keep pushing forward! Your hard work will pay off.";
/// Summary shown when generation fails.
pub const SUMMARY_ERROR_FALLBACK: &str = "Summary failed to generate.";
/// Summary shown when generation returns no text.
pub const SUMMARY_EMPTY_FALLBACK: &str = "No summary available.";

/// Output-length and creativity hints sent with a generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationHints {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

pub const ADVICE_HINTS: GenerationHints = GenerationHints {
    temperature: 0.7,
    max_output_tokens: 200,
};

pub const SUMMARY_HINTS: GenerationHints = GenerationHints {
    temperature: 0.5,
    max_output_tokens: 150,
};

/// Study advice and note summarization capability.
#[async_trait]
pub trait StudyAdvisor: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Short motivational advice for `profile` given pending task titles.
    async fn advice(&self, profile: &Profile, pending_titles: &[String]) -> String;

    /// Two or three sentence summary of a note body.
    async fn summarize(&self, content: &str) -> String;
}

pub fn advice_prompt(profile: &Profile, pending_titles: &[String]) -> String {
    format!(
        "I am a student in class {} studying {}. My daily goal is {} hours. \
         My pending tasks are: {}. \
         Give me 3 short, motivational bullet points to stay productive today.",
        profile.class_name,
        profile.stream,
        profile.daily_goal,
        pending_titles.join(", ")
    )
}

pub fn summary_prompt(content: &str) -> String {
    format!("Summarize the following study note in 2-3 concise sentences: {content}")
}

/// Network advisor when an API key is configured, static advisor otherwise.
pub fn advisor_from_config(config: &AdvisorConfig) -> Arc<dyn StudyAdvisor> {
    match config.resolve_api_key() {
        Some(api_key) => match GeminiAdvisor::new(config, api_key) {
            Ok(advisor) => {
                info!(
                    "event=advisor_select module=advisor status=ok kind=gemini model={}",
                    config.model
                );
                Arc::new(advisor)
            }
            Err(err) => {
                warn!(
                    "event=advisor_select module=advisor status=error kind=gemini error={err}"
                );
                Arc::new(StaticAdvisor)
            }
        },
        None => {
            info!("event=advisor_select module=advisor status=ok kind=static reason=no_api_key");
            Arc::new(StaticAdvisor)
        }
    }
}
