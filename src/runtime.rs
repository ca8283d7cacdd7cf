//! Turn orchestration
//!
//! One turn: classify the utterance, route, run exactly one flow. Classifier
//! errors and timeouts degrade to [`Intent::Other`], so a turn never fails.

#[cfg(test)]
pub mod testing;

use crate::classifier::IntentClassifier;
use crate::state_machine::{route, DialogueState, Intent, PersistedState};
use std::time::Duration;

/// Runs turns against a classifier with a bounded wait
pub struct TurnRunner<C> {
    classifier: C,
    classify_timeout: Duration,
}

impl<C: IntentClassifier> TurnRunner<C> {
    pub fn new(classifier: C, classify_timeout: Duration) -> Self {
        Self {
            classifier,
            classify_timeout,
        }
    }

    async fn classify(&self, utterance: &str) -> Intent {
        match tokio::time::timeout(self.classify_timeout, self.classifier.classify(utterance)).await
        {
            Ok(Ok(intent)) => intent,
            Ok(Err(e)) => {
                tracing::warn!(
                    classifier = self.classifier.name(),
                    error = %e,
                    kind = ?e.kind,
                    "Classification failed, treating as other"
                );
                Intent::Other
            }
            Err(_) => {
                tracing::warn!(
                    classifier = self.classifier.name(),
                    timeout_ms = %self.classify_timeout.as_millis(),
                    "Classification timed out, treating as other"
                );
                Intent::Other
            }
        }
    }

    /// Execute one turn on a working copy of `state`
    pub async fn run_turn(&self, mut state: DialogueState, input: &str) -> DialogueState {
        state.user_input = input.to_string();
        let intent = self.classify(&state.user_input).await;
        state.intent = Some(intent);

        let flow = route(intent);
        flow.apply(&mut state);

        tracing::debug!(
            intent = intent.as_str(),
            flow = flow.as_str(),
            step = state.step.index(),
            "Turn complete"
        );
        state
    }
}

/// Caller-side session holding only the persisted subset of dialogue state
#[derive(Debug, Clone, Default)]
pub struct Session {
    persisted: PersistedState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn from_persisted(persisted: PersistedState) -> Self {
        Self { persisted }
    }

    pub fn persisted(&self) -> &PersistedState {
        &self.persisted
    }

    /// Run one turn and commit `step` and `account_id` for the next one
    pub async fn respond<C: IntentClassifier>(
        &mut self,
        runner: &TurnRunner<C>,
        input: &str,
    ) -> String {
        let result = runner
            .run_turn(DialogueState::resume(&self.persisted), input)
            .await;
        self.persisted = result.persisted();
        result.reply
    }
}
