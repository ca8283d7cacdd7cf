//! Environment configuration for the classifier model

use super::{LlmError, LlmService, LoggingService, OpenAIService};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the `DeepSeek` (OpenAI-compatible) endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Upper bound on one classification call, enforced by the runtime
    pub classify_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            classify_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_key: get("DEEPSEEK_API_KEY"),
            base_url: get("DEEPSEEK_BASE_URL").unwrap_or(defaults.base_url),
            model: get("DEEPSEEK_MODEL").unwrap_or(defaults.model),
            classify_timeout: get("FEE_DESK_CLASSIFY_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .map_or(defaults.classify_timeout, Duration::from_secs),
        }
    }

    /// Create the logged model service, or `None` when no API key is configured
    pub fn build_service(&self) -> Result<Option<Arc<dyn LlmService>>, LlmError> {
        let Some(api_key) = &self.api_key else {
            return Ok(None);
        };

        let service = OpenAIService::new(
            api_key.clone(),
            self.model.clone(),
            &self.base_url,
            self.classify_timeout,
        )?;
        Ok(Some(Arc::new(LoggingService::new(Arc::new(service)))))
    }
}
