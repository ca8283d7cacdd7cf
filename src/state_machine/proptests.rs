//! Property-based tests for the dialogue state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::transition::*;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_step() -> impl Strategy<Value = FeeStep> {
    prop_oneof![
        Just(FeeStep::AwaitingRequest),
        Just(FeeStep::AwaitingAccountId),
        Just(FeeStep::Completed),
    ]
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![Just(Intent::CheckFee), Just(Intent::Other)]
}

/// Free text mixing CJK, ASCII letters, spaces and digits
fn arb_utterance() -> impl Strategy<Value = String> {
    "[查电费户号是谢a-z 0-9]{0,40}"
}

fn arb_state() -> impl Strategy<Value = DialogueState> {
    (arb_step(), "[0-9]{0,12}", arb_utterance()).prop_map(|(step, account_id, user_input)| {
        DialogueState {
            user_input,
            intent: None,
            account_id,
            reply: String::new(),
            step,
        }
    })
}

/// Digit runs separated by non-digit text, so each run is maximal
fn arb_digit_runs() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[0-9]{1,15}", 0..6)
}

// ============================================================================
// Helpers
// ============================================================================

fn run_flow(mut state: DialogueState, intent: Intent) -> DialogueState {
    state.intent = Some(intent);
    route(intent).apply(&mut state);
    state
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: every transition lands on a valid step and writes a reply
    #[test]
    fn prop_transitions_are_total(state in arb_state(), intent in arb_intent()) {
        let result = run_flow(state, intent);
        prop_assert!(result.step.index() <= 2);
        prop_assert!(!result.reply.is_empty());
    }

    // Invariant 2: fallback always resets the step and never touches account_id
    #[test]
    fn prop_fallback_resets_step(state in arb_state()) {
        let account_id = state.account_id.clone();
        let result = run_flow(state, Intent::Other);
        prop_assert_eq!(result.step, FeeStep::AwaitingRequest);
        prop_assert_eq!(result.reply, FALLBACK);
        prop_assert_eq!(result.account_id, account_id);
    }

    // Invariant 3: identical inputs give identical outputs
    #[test]
    fn prop_transitions_are_deterministic(state in arb_state(), intent in arb_intent()) {
        let a = run_flow(state.clone(), intent);
        let b = run_flow(state, intent);
        prop_assert_eq!(a, b);
    }

    // Invariant 4: account_id only changes when a lookup completes
    #[test]
    fn prop_account_id_changes_only_on_completion(state in arb_state(), intent in arb_intent()) {
        let before = state.account_id.clone();
        let result = run_flow(state, intent);
        if result.account_id != before {
            prop_assert_eq!(result.step, FeeStep::Completed);
        }
    }

    // Invariant 5: extraction returns the first run whose length is in 10..=12
    #[test]
    fn prop_extract_first_valid_run(runs in arb_digit_runs()) {
        let input = runs.join("号");
        let expected = runs.iter().find(|r| (10..=12).contains(&r.len())).map(String::as_str);
        prop_assert_eq!(extract_account_id(&input), expected);
    }

    // Invariant 6: a valid id at step 1 always completes and is echoed back
    #[test]
    fn prop_valid_id_completes(
        prefix in "[查电费户号是 ]{0,10}",
        id in "[0-9]{10,12}",
        suffix in "[谢谢 ]{0,5}",
    ) {
        let state = DialogueState {
            user_input: format!("{prefix}{id}{suffix}"),
            step: FeeStep::AwaitingAccountId,
            ..DialogueState::default()
        };
        let result = run_flow(state, Intent::CheckFee);
        prop_assert_eq!(result.step, FeeStep::Completed);
        prop_assert!(result.reply.contains(&id));
        prop_assert_eq!(result.account_id, id);
    }
}
