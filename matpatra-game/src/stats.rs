//! Session statistics: the append-only decision log and its accumulator.

use serde::{Deserialize, Serialize};

use crate::ballot::InvalidCategory;
use crate::evaluator::Verdict;
use crate::numbers::percent;

/// One resolved ballot, recorded once and never revised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub ballot_id: u32,
    pub verdict: Verdict,
    pub was_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_category: Option<InvalidCategory>,
}

/// Accumulator owned by the session state machine. Mutated only through the
/// decision transition; frozen exactly once at termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionStats {
    pub score: i32,
    pub correct: u32,
    pub incorrect: u32,
    pub total_seen: u32,
    #[serde(default)]
    pub decisions: Vec<Decision>,
    pub elapsed_secs: u32,
}

impl SessionStats {
    /// Record one decision, clamping the score floor at zero.
    pub(crate) fn record(&mut self, decision: Decision, score_delta: i32) {
        self.score = (self.score + score_delta).max(0);
        if decision.was_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.total_seen += 1;
        self.decisions.push(decision);
    }

    /// Rounded accuracy percentage; zero before anything was reviewed.
    #[must_use]
    pub fn accuracy_pct(&self) -> u32 {
        percent(self.correct, self.total_seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(id: u32, was_correct: bool) -> Decision {
        Decision {
            ballot_id: id,
            verdict: if was_correct {
                Verdict::Valid
            } else {
                Verdict::Invalid
            },
            was_correct,
            invalid_category: None,
        }
    }

    #[test]
    fn record_accumulates_counts_in_order() {
        let mut stats = SessionStats::default();
        stats.record(decision(1, true), 10);
        stats.record(decision(2, false), -5);
        stats.record(decision(3, true), 10);

        assert_eq!(stats.score, 15);
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.incorrect, 1);
        assert_eq!(stats.total_seen, 3);
        let ids: Vec<u32> = stats.decisions.iter().map(|d| d.ballot_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn score_never_goes_negative() {
        let mut stats = SessionStats::default();
        for id in 0..10 {
            stats.record(decision(id, false), -5);
        }
        assert_eq!(stats.score, 0);
        assert_eq!(stats.incorrect, 10);
    }

    #[test]
    fn accuracy_handles_empty_sessions() {
        let stats = SessionStats::default();
        assert_eq!(stats.accuracy_pct(), 0);

        let mut seen = SessionStats::default();
        seen.record(decision(1, true), 10);
        seen.record(decision(2, false), -5);
        assert_eq!(seen.accuracy_pct(), 50);
    }
}
