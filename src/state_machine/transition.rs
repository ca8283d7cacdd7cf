//! Pure dialogue transitions
//!
//! Routing plus the two flow handlers. Nothing here performs I/O; given the
//! same state and intent every function produces the same result.

use super::{DialogueState, FeeStep, Intent};
use regex::Regex;
use std::sync::LazyLock;

const MIN_ACCOUNT_ID_DIGITS: usize = 10;
const MAX_ACCOUNT_ID_DIGITS: usize = 12;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit run pattern is valid"));

pub const ASK_ACCOUNT_ID: &str = "为了帮你查询电费，请提供你的用电户号（如1234567890）。";
pub const INVALID_ACCOUNT_ID: &str =
    "你输入的户号格式错误（需10-12位纯数字），本次查询结束。如需重新查询，请再次输入'查电费'。";
pub const ALREADY_COMPLETED: &str = "你已完成电费查询，如需再次查询，请重新输入'查电费'。";
pub const FALLBACK: &str = "暂仅支持电费查询服务，如需查询电费，请输入'查电费'。";

/// Canned statement returned for every valid account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeStatement {
    pub amount: &'static str,
    pub bill_date: &'static str,
    pub due_date: &'static str,
}

pub const CANNED_STATEMENT: FeeStatement = FeeStatement {
    amount: "125.6元",
    bill_date: "2026-01-27",
    due_date: "2026-02-15",
};

impl FeeStatement {
    pub fn reply_for(&self, account_id: &str) -> String {
        format!(
            "你的用电户号{account_id}本月电费为：{}，账单日期：{}，缴费截止日期：{}。",
            self.amount, self.bill_date, self.due_date
        )
    }
}

/// Handler selected for a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    FeeLookup,
    Fallback,
}

impl Flow {
    pub fn as_str(self) -> &'static str {
        match self {
            Flow::FeeLookup => "fee_lookup",
            Flow::Fallback => "fallback",
        }
    }

    /// Run this flow against the working state
    pub fn apply(self, state: &mut DialogueState) {
        match self {
            Flow::FeeLookup => fee_lookup(state),
            Flow::Fallback => fallback(state),
        }
    }
}

/// Map an intent to the flow that handles the turn
pub fn route(intent: Intent) -> Flow {
    match intent {
        Intent::CheckFee => Flow::FeeLookup,
        Intent::Other => Flow::Fallback,
    }
}

/// Fee-lookup flow: one step per turn.
///
/// AwaitingRequest asks for the account id. AwaitingAccountId either answers
/// with the statement or reports a malformed id and starts over. Completed
/// tells the user to ask again and starts over.
pub fn fee_lookup(state: &mut DialogueState) {
    match state.step {
        FeeStep::AwaitingRequest => {
            state.reply = ASK_ACCOUNT_ID.to_string();
            state.step = FeeStep::AwaitingAccountId;
        }
        FeeStep::AwaitingAccountId => match extract_account_id(&state.user_input) {
            Some(account_id) => {
                state.reply = CANNED_STATEMENT.reply_for(account_id);
                state.account_id = account_id.to_string();
                state.step = FeeStep::Completed;
            }
            None => {
                // No retry loop: the user has to start a new request
                state.reply = INVALID_ACCOUNT_ID.to_string();
                state.step = FeeStep::AwaitingRequest;
            }
        },
        FeeStep::Completed => {
            state.reply = ALREADY_COMPLETED.to_string();
            state.step = FeeStep::AwaitingRequest;
        }
    }
}

/// Fallback flow for anything that is not a fee lookup
pub fn fallback(state: &mut DialogueState) {
    state.reply = FALLBACK.to_string();
    state.step = FeeStep::AwaitingRequest;
}

/// First maximal run of ASCII digits whose length is within 10..=12.
///
/// Runs outside that range are skipped whole; a 13-digit run never yields a
/// 12-digit prefix.
pub fn extract_account_id(input: &str) -> Option<&str> {
    DIGIT_RUN
        .find_iter(input)
        .map(|m| m.as_str())
        .find(|run| (MIN_ACCOUNT_ID_DIGITS..=MAX_ACCOUNT_ID_DIGITS).contains(&run.len()))
}
