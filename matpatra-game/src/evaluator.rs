//! Decision evaluation: pure scoring of a player's call against a ballot.

use serde::{Deserialize, Serialize};

use crate::ballot::Ballot;
use crate::session::SessionConfig;

/// The player's binary call on a ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    /// The verdict that matches a ballot's ground truth.
    #[must_use]
    pub const fn matching(is_valid: bool) -> Self {
        if is_valid { Self::Valid } else { Self::Invalid }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

/// Raw deltas produced by evaluating a single decision. Clamping the score
/// floor and the clock window is the session's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub was_correct: bool,
    pub score_delta: i32,
    pub time_delta: i32,
}

/// Evaluate a player's verdict against a ballot. Pure and reproducible:
/// identical inputs always yield identical outcomes.
#[must_use]
pub fn evaluate(ballot: &Ballot, verdict: Verdict, cfg: &SessionConfig) -> DecisionOutcome {
    let was_correct = (verdict == Verdict::Valid) == ballot.is_valid;
    if was_correct {
        DecisionOutcome {
            was_correct,
            score_delta: cfg.score_correct_delta,
            time_delta: cfg.time_correct_delta,
        }
    } else {
        DecisionOutcome {
            was_correct,
            score_delta: cfg.score_incorrect_delta,
            time_delta: cfg.time_incorrect_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::{InvalidCategory, Mark, MarkList};

    fn blank_invalid() -> Ballot {
        Ballot {
            id: 1,
            is_valid: false,
            marks: MarkList::new(),
            has_signature: true,
            has_tear: false,
            tear_position: None,
            identifying_text: None,
            identifying_position: None,
            invalid_category: Some(InvalidCategory::Blank),
            sloppy_mark: false,
        }
    }

    fn plainly_valid() -> Ballot {
        Ballot {
            id: 2,
            is_valid: true,
            marks: MarkList::from_slice(&[Mark::in_cell(3, 2)]),
            has_signature: true,
            has_tear: false,
            tear_position: None,
            identifying_text: None,
            identifying_position: None,
            invalid_category: None,
            sloppy_mark: false,
        }
    }

    #[test]
    fn catching_a_blank_ballot_rewards_the_clerk() {
        let outcome = evaluate(&blank_invalid(), Verdict::Invalid, &SessionConfig::default());
        assert!(outcome.was_correct);
        assert_eq!(outcome.score_delta, 10);
        assert_eq!(outcome.time_delta, 2);
    }

    #[test]
    fn rejecting_a_valid_ballot_costs_score_and_time() {
        let outcome = evaluate(&plainly_valid(), Verdict::Invalid, &SessionConfig::default());
        assert!(!outcome.was_correct);
        assert_eq!(outcome.score_delta, -5);
        assert_eq!(outcome.time_delta, -8);
    }

    #[test]
    fn evaluation_is_reproducible() {
        let cfg = SessionConfig::default();
        let ballot = plainly_valid();
        let first = evaluate(&ballot, Verdict::Valid, &cfg);
        let second = evaluate(&ballot, Verdict::Valid, &cfg);
        assert_eq!(first, second);
        assert!(first.was_correct);
    }

    #[test]
    fn matching_verdict_mirrors_ground_truth() {
        assert_eq!(Verdict::matching(true), Verdict::Valid);
        assert_eq!(Verdict::matching(false), Verdict::Invalid);
    }
}
