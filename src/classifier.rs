//! Intent classification
//!
//! The classifier sees only the raw utterance. Interpreting failures is left
//! to the runtime, which treats any error as [`Intent::Other`].

use crate::llm::{LlmError, LlmRequest, LlmService};
use crate::state_machine::Intent;
use async_trait::async_trait;
use std::sync::Arc;

const CLASSIFY_PROMPT: &str =
    "你只需要判断用户输入是否是查询电费，是返回check_electric_fee，否返回other，仅返回这两个值之一。";

/// Labels are a handful of tokens; cap the answer length
const CLASSIFY_MAX_TOKENS: u32 = 16;

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, utterance: &str) -> Result<Intent, LlmError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: IntentClassifier + ?Sized> IntentClassifier for Arc<T> {
    async fn classify(&self, utterance: &str) -> Result<Intent, LlmError> {
        (**self).classify(utterance).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Classifier backed by a chat model
pub struct LlmIntentClassifier {
    llm: Arc<dyn LlmService>,
}

impl LlmIntentClassifier {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    fn build_request(utterance: &str) -> LlmRequest {
        LlmRequest::single(CLASSIFY_PROMPT, utterance).with_max_tokens(CLASSIFY_MAX_TOKENS)
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, utterance: &str) -> Result<Intent, LlmError> {
        let response = self.llm.complete(&Self::build_request(utterance)).await?;
        let intent = Intent::from_label(&response.text);
        tracing::debug!(
            label = %response.text.trim(),
            intent = intent.as_str(),
            "Classified utterance"
        );
        Ok(intent)
    }

    fn name(&self) -> &str {
        self.llm.model_id()
    }
}

/// Offline classifier used when no model is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    const KEYWORD: &'static str = "电费";
}

#[async_trait]
impl IntentClassifier for KeywordClassifier {
    async fn classify(&self, utterance: &str) -> Result<Intent, LlmError> {
        Ok(if utterance.contains(Self::KEYWORD) {
            Intent::CheckFee
        } else {
            Intent::Other
        })
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
