//! Dialogue state types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse category assigned to a user utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    CheckFee,
    Other,
}

impl Intent {
    /// Label the classifier model is asked to answer with for a fee lookup
    pub const CHECK_FEE_LABEL: &'static str = "check_electric_fee";

    /// Map a raw classifier label to an intent.
    ///
    /// Only the exact fee label (after trimming) selects `CheckFee`; every other
    /// answer, including an empty one, is `Other`.
    pub fn from_label(label: &str) -> Self {
        if label.trim() == Self::CHECK_FEE_LABEL {
            Intent::CheckFee
        } else {
            Intent::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::CheckFee => "check_fee",
            Intent::Other => "other",
        }
    }
}

/// Position within the fee-lookup flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FeeStep {
    #[default]
    AwaitingRequest,
    AwaitingAccountId,
    Completed,
}

impl FeeStep {
    #[allow(dead_code)] // Used by tests
    pub const ALL: [FeeStep; 3] = [
        FeeStep::AwaitingRequest,
        FeeStep::AwaitingAccountId,
        FeeStep::Completed,
    ];

    /// Integer form surfaced to callers (0, 1 or 2)
    pub fn index(self) -> u8 {
        match self {
            FeeStep::AwaitingRequest => 0,
            FeeStep::AwaitingAccountId => 1,
            FeeStep::Completed => 2,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid fee step {0} (expected 0, 1 or 2)")]
pub struct StepError(pub u8);

impl TryFrom<u8> for FeeStep {
    type Error = StepError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FeeStep::AwaitingRequest),
            1 => Ok(FeeStep::AwaitingAccountId),
            2 => Ok(FeeStep::Completed),
            other => Err(StepError(other)),
        }
    }
}

impl From<FeeStep> for u8 {
    fn from(step: FeeStep) -> Self {
        step.index()
    }
}

/// The subset of dialogue state a caller carries between turns
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedState {
    pub step: FeeStep,
    /// Last validated account identifier, empty until one is collected
    #[serde(default)]
    pub account_id: String,
}

/// Working record for a single turn.
///
/// `user_input`, `intent` and `reply` are turn-local; `step` and `account_id`
/// are the only fields that survive into the next turn (see [`PersistedState`]).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogueState {
    pub user_input: String,
    /// `None` until the classifier has run this turn
    pub intent: Option<Intent>,
    pub account_id: String,
    pub reply: String,
    pub step: FeeStep,
}

impl DialogueState {
    /// Fresh working state for a turn, seeded from what the caller persisted.
    /// Turn-local fields start empty.
    pub fn resume(persisted: &PersistedState) -> Self {
        Self {
            step: persisted.step,
            account_id: persisted.account_id.clone(),
            ..Self::default()
        }
    }

    /// The fields the caller commits before the next turn
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            step: self.step,
            account_id: self.account_id.clone(),
        }
    }
}
