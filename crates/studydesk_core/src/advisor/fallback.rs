use super::{StudyAdvisor, ADVICE_ERROR_FALLBACK, SUMMARY_EMPTY_FALLBACK};
use crate::model::profile::Profile;
use async_trait::async_trait;

/// Offline advisor returning fixed text; used when no API key is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAdvisor;

#[async_trait]
impl StudyAdvisor for StaticAdvisor {
    fn name(&self) -> &str {
        "static"
    }

    async fn advice(&self, _profile: &Profile, _pending_titles: &[String]) -> String {
        ADVICE_ERROR_FALLBACK.to_string()
    }

    async fn summarize(&self, _content: &str) -> String {
        SUMMARY_EMPTY_FALLBACK.to_string()
    }
}
