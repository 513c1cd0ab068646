//! Matpatra Game Engine
//!
//! Platform-agnostic core game logic for the Matpatra ballot review game.
//! This crate provides ballot generation, decision scoring, and the session
//! state machine without UI or platform-specific dependencies.

pub mod ballot;
pub mod catalog;
pub mod constants;
pub mod evaluator;
pub mod generator;
pub mod numbers;
pub mod report;
pub mod rules;
pub mod session;
pub mod stats;
pub mod voter;

// Re-export commonly used types
pub use ballot::{
    Ballot, BallotAnchor, BorderDirection, InvalidCategory, Mark, MarkList, MarkStyle,
    TearPosition,
};
pub use catalog::{
    GRID_COLS, GRID_ROWS, SYMBOL_CATALOG, SYMBOL_COUNT, SymbolSlot, index_to_cell, slot_at,
};
pub use evaluator::{DecisionOutcome, Verdict, evaluate};
pub use generator::{BallotGenerator, BallotKind, CountingRng, GeneratorError, StreamBundle};
pub use report::{Grade, ShiftReport, grade_for, shift_report};
pub use rules::{INVALID_RULES, RuleEntry, VALID_RULES};
pub use session::{
    DecideOutcome, FeedbackSignal, Session, SessionConfig, SessionHandle, SessionObserver,
    SessionPhase, TickOutcome,
};
pub use stats::{Decision, SessionStats};
pub use voter::VoterProfile;

/// Trait for the external results collaborator that receives each session's
/// finalized statistics record. Platform-specific implementations should
/// provide this.
pub trait ResultsSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Accept a finalized statistics record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be accepted.
    fn submit_report(&self, stats: &SessionStats) -> Result<(), Self::Error>;
}

/// Main engine facade for starting sessions and delivering their results.
pub struct StationEngine<R>
where
    R: ResultsSink,
{
    config: SessionConfig,
    results: R,
}

impl<R> StationEngine<R>
where
    R: ResultsSink,
{
    /// Create a new engine with the provided configuration and results sink.
    pub const fn new(config: SessionConfig, results: R) -> Self {
        Self { config, results }
    }

    /// Configuration shared by every session this engine starts.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Begin a new session: fresh queue, fresh stats, full clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured queue length cannot hold the
    /// guaranteed category coverage.
    pub fn start_session(&self, seed: u64) -> Result<Session, GeneratorError> {
        let mut generator = BallotGenerator::from_seed(seed);
        let queue = generator.generate_queue(self.config.queue_length)?;
        Ok(Session::new(queue, self.config.clone()))
    }

    /// Finalize a terminated session and hand its statistics record to the
    /// results sink. Idempotent: only the first call per session delivers.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the record.
    pub fn deliver_results(&self, session: &mut Session) -> Result<Option<SessionStats>, anyhow::Error>
    where
        R::Error: Into<anyhow::Error>,
    {
        let Some(stats) = session.finalize() else {
            return Ok(None);
        };
        let stats = stats.clone();
        self.results.submit_report(&stats).map_err(Into::into)?;
        Ok(Some(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemorySink {
        reports: Rc<RefCell<Vec<SessionStats>>>,
    }

    impl ResultsSink for MemorySink {
        type Error = Infallible;

        fn submit_report(&self, stats: &SessionStats) -> Result<(), Self::Error> {
            self.reports.borrow_mut().push(stats.clone());
            Ok(())
        }
    }

    #[test]
    fn engine_starts_sessions_with_fresh_state() {
        let engine = StationEngine::new(SessionConfig::default(), MemorySink::default());
        let session = engine.start_session(0xABCD).unwrap();
        assert_eq!(session.queue_len(), 25);
        assert_eq!(session.seconds_left(), 120);
        assert_eq!(session.stats().total_seen, 0);
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn engine_rejects_configs_below_coverage_minimum() {
        let config = SessionConfig {
            queue_length: 5,
            ..SessionConfig::default()
        };
        let engine = StationEngine::new(config, MemorySink::default());
        assert!(matches!(
            engine.start_session(1),
            Err(GeneratorError::QueueTooShort { requested: 5, .. })
        ));
    }

    #[test]
    fn results_are_delivered_exactly_once() {
        let sink = MemorySink::default();
        let engine = StationEngine::new(SessionConfig::default(), sink.clone());
        let mut session = engine.start_session(9).unwrap();

        while !session.termination_pending() {
            let truth = session.current_ballot().unwrap().is_valid;
            session.decide(Verdict::matching(truth));
            session.feedback_complete();
        }

        let delivered = engine.deliver_results(&mut session).unwrap();
        assert_eq!(delivered.as_ref().map(|s| s.total_seen), Some(25));
        assert!(engine.deliver_results(&mut session).unwrap().is_none());
        assert_eq!(sink.reports.borrow().len(), 1);
        assert_eq!(sink.reports.borrow()[0].score, 250);
    }
}
