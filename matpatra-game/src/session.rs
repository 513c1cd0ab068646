//! Session state machine: ballot progression, countdown, lockout, and
//! end-of-session aggregation.
//!
//! The machine is fully synchronous. The two real-time triggers (the 1 Hz
//! clock and player input) are serialized by construction because every
//! transition takes `&mut self`; a multithreaded embedder must put a mutex
//! or actor boundary around the session. The feedback lockout is cleared by
//! an explicit [`Session::feedback_complete`] transition fired by the
//! presentation layer rather than an internal timer.

use serde::{Deserialize, Serialize};

use crate::ballot::Ballot;
use crate::constants::{
    DEFAULT_QUEUE_LENGTH, END_GRACE_MILLIS, FEEDBACK_MILLIS, INITIAL_CLOCK_SECS,
    LOG_CLOCK_EXPIRED, LOG_DECISION_CORRECT, LOG_DECISION_INCORRECT, LOG_QUEUE_EXHAUSTED,
    LOG_SESSION_FINALIZED, LOG_SESSION_START, SCORE_CORRECT_DELTA, SCORE_INCORRECT_DELTA,
    TIME_CORRECT_DELTA, TIME_INCORRECT_DELTA,
};
use crate::evaluator::{Verdict, evaluate};
use crate::stats::{Decision, SessionStats};

/// Named session parameters. Not runtime-configurable in the shipped game,
/// but injectable for tests and alternate drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub queue_length: usize,
    pub initial_clock_secs: u32,
    pub score_correct_delta: i32,
    pub score_incorrect_delta: i32,
    pub time_correct_delta: i32,
    pub time_incorrect_delta: i32,
    /// How long the presentation layer keeps feedback visible before firing
    /// `feedback_complete`. Owned by the presentation collaborator.
    pub feedback_millis: u64,
    /// Pause the driver observes between termination and stats delivery, so
    /// in-flight feedback animation can finish.
    pub end_grace_millis: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            queue_length: DEFAULT_QUEUE_LENGTH,
            initial_clock_secs: INITIAL_CLOCK_SECS,
            score_correct_delta: SCORE_CORRECT_DELTA,
            score_incorrect_delta: SCORE_INCORRECT_DELTA,
            time_correct_delta: TIME_CORRECT_DELTA,
            time_incorrect_delta: TIME_INCORRECT_DELTA,
            feedback_millis: FEEDBACK_MILLIS,
            end_grace_millis: END_GRACE_MILLIS,
        }
    }
}

impl SessionConfig {
    /// Load a session configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a valid config.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Active,
    Ended,
}

/// Payload delivered to the presentation layer after every accepted
/// decision. `explanation` is empty for correctly-shaped valid ballots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSignal {
    pub was_correct: bool,
    pub explanation: String,
}

/// Result of a `decide` transition. Invalid transitions are ordinary UI
/// races (stale keypresses), so they are ignored rather than signaled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecideOutcome {
    Accepted(FeedbackSignal),
    Ignored,
}

/// Result of a 1 Hz clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { seconds_left: u32 },
    Expired,
    Ignored,
}

/// One complete play-through: pre-generated queue, countdown clock, input
/// lockout, and the accumulating statistics record.
#[derive(Debug, Clone)]
pub struct Session {
    cfg: SessionConfig,
    queue: Vec<Ballot>,
    index: usize,
    clock: u32,
    locked: bool,
    termination_scheduled: bool,
    phase: SessionPhase,
    stats: SessionStats,
    elapsed_secs: u32,
    logs: Vec<String>,
}

impl Session {
    /// Start a fresh session over an already-generated queue.
    #[must_use]
    pub fn new(queue: Vec<Ballot>, cfg: SessionConfig) -> Self {
        let clock = cfg.initial_clock_secs;
        Self {
            cfg,
            queue,
            index: 0,
            clock,
            locked: false,
            termination_scheduled: false,
            phase: SessionPhase::Active,
            stats: SessionStats::default(),
            elapsed_secs: 0,
            logs: vec![String::from(LOG_SESSION_START)],
        }
    }

    /// The ballot currently presented, if any remain.
    #[must_use]
    pub fn current_ballot(&self) -> Option<&Ballot> {
        self.queue.get(self.index)
    }

    /// Zero-based index of the ballot under review.
    #[must_use]
    pub const fn ballot_index(&self) -> usize {
        self.index
    }

    /// Total ballots in this session's queue.
    #[must_use]
    pub const fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Seconds remaining on the countdown clock.
    #[must_use]
    pub const fn seconds_left(&self) -> u32 {
        self.clock
    }

    /// Whether input is currently suspended for feedback display.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether termination has been triggered (exactly once per session).
    #[must_use]
    pub const fn termination_pending(&self) -> bool {
        self.termination_scheduled
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Live view of the running statistics for score display.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Session configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.cfg
    }

    /// Log keys accumulated so far.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Apply the player's verdict to the current ballot. No-op while locked,
    /// after termination, with the clock at zero, or past the queue end.
    pub fn decide(&mut self, verdict: Verdict) -> DecideOutcome {
        if self.locked
            || self.termination_scheduled
            || self.phase == SessionPhase::Ended
            || self.clock == 0
        {
            return DecideOutcome::Ignored;
        }
        let Some(ballot) = self.queue.get(self.index) else {
            return DecideOutcome::Ignored;
        };

        let outcome = evaluate(ballot, verdict, &self.cfg);
        let decision = Decision {
            ballot_id: ballot.id,
            verdict,
            was_correct: outcome.was_correct,
            invalid_category: ballot.invalid_category,
        };
        let explanation = ballot.explanation().unwrap_or_default().to_string();

        self.stats.record(decision, outcome.score_delta);
        let adjusted = i64::from(self.clock) + i64::from(outcome.time_delta);
        let ceiling = i64::from(self.cfg.initial_clock_secs);
        self.clock = u32::try_from(adjusted.clamp(0, ceiling)).unwrap_or(0);
        self.locked = true;
        self.logs.push(String::from(if outcome.was_correct {
            LOG_DECISION_CORRECT
        } else {
            LOG_DECISION_INCORRECT
        }));
        if self.clock == 0 {
            self.schedule_termination(LOG_CLOCK_EXPIRED);
        }

        DecideOutcome::Accepted(FeedbackSignal {
            was_correct: outcome.was_correct,
            explanation,
        })
    }

    /// Presentation-fired transition ending the feedback lockout window.
    /// Returns whether the session advanced to the next ballot.
    pub fn feedback_complete(&mut self) -> bool {
        if !self.locked || self.phase == SessionPhase::Ended {
            return false;
        }
        self.locked = false;
        self.index += 1;
        if self.index >= self.queue.len() {
            self.schedule_termination(LOG_QUEUE_EXHAUSTED);
        }
        true
    }

    /// Advance the countdown by one second. Fired once per second while the
    /// session is live; ignored after expiry or termination.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase == SessionPhase::Ended || self.termination_scheduled || self.clock == 0 {
            return TickOutcome::Ignored;
        }
        self.elapsed_secs += 1;
        self.clock -= 1;
        if self.clock == 0 {
            self.schedule_termination(LOG_CLOCK_EXPIRED);
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            seconds_left: self.clock,
        }
    }

    /// Freeze the statistics record. Idempotent: the first call moves the
    /// session to `Ended` and returns the finalized stats; later calls
    /// return `None`.
    pub fn finalize(&mut self) -> Option<&SessionStats> {
        if self.phase == SessionPhase::Ended {
            return None;
        }
        self.phase = SessionPhase::Ended;
        self.stats.elapsed_secs = self.elapsed_secs;
        self.logs.push(String::from(LOG_SESSION_FINALIZED));
        Some(&self.stats)
    }

    fn schedule_termination(&mut self, log_key: &str) {
        if self.termination_scheduled {
            return;
        }
        self.termination_scheduled = true;
        self.logs.push(String::from(log_key));
    }
}

/// Presentation-layer subscriber surface: per-second clock updates, decision
/// feedback, and the one-shot finalized statistics record.
pub trait SessionObserver {
    fn on_tick(&mut self, _seconds_left: u32) {}
    fn on_feedback(&mut self, _feedback: &FeedbackSignal) {}
    fn on_session_end(&mut self, _stats: &SessionStats) {}
}

/// High-level handle binding a session to an observer, dispatching events
/// as transitions produce them.
#[derive(Debug, Clone)]
pub struct SessionHandle<O: SessionObserver> {
    session: Session,
    observer: O,
}

impl<O: SessionObserver> SessionHandle<O> {
    #[must_use]
    pub fn new(session: Session, observer: O) -> Self {
        Self { session, observer }
    }

    /// Forward a verdict, notifying the observer on accepted decisions.
    pub fn decide(&mut self, verdict: Verdict) -> DecideOutcome {
        let outcome = self.session.decide(verdict);
        if let DecideOutcome::Accepted(feedback) = &outcome {
            self.observer.on_feedback(feedback);
        }
        outcome
    }

    /// Forward a clock tick, notifying the observer of live clock changes.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        match outcome {
            TickOutcome::Running { seconds_left } => self.observer.on_tick(seconds_left),
            TickOutcome::Expired => self.observer.on_tick(0),
            TickOutcome::Ignored => {}
        }
        outcome
    }

    /// Forward the presentation layer's end-of-feedback signal.
    pub fn feedback_complete(&mut self) -> bool {
        self.session.feedback_complete()
    }

    /// Finalize and deliver the statistics record exactly once. The caller
    /// observes the configured grace delay before invoking this.
    pub fn finish(&mut self) -> Option<&SessionStats> {
        let stats = self.session.finalize()?;
        self.observer.on_session_end(stats);
        Some(stats)
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    #[must_use]
    pub fn into_session(self) -> Session {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::BallotGenerator;

    fn queue_of(length: usize, seed: u64) -> Vec<Ballot> {
        BallotGenerator::from_seed(seed)
            .generate_queue(length)
            .unwrap()
    }

    fn active_session() -> Session {
        Session::new(queue_of(25, 42), SessionConfig::default())
    }

    #[test]
    fn decide_locks_until_feedback_completes() {
        let mut session = active_session();
        let truth = session.current_ballot().unwrap().is_valid;

        let first = session.decide(Verdict::matching(truth));
        assert!(matches!(first, DecideOutcome::Accepted(_)));
        assert!(session.is_locked());

        let stats_before = session.stats().clone();
        let clock_before = session.seconds_left();
        let second = session.decide(Verdict::Valid);
        assert_eq!(second, DecideOutcome::Ignored);
        assert_eq!(session.stats(), &stats_before);
        assert_eq!(session.seconds_left(), clock_before);

        assert!(session.feedback_complete());
        assert!(!session.is_locked());
        assert_eq!(session.ballot_index(), 1);
    }

    #[test]
    fn correct_decision_rewards_score_and_time() {
        let mut session = active_session();
        for _ in 0..5 {
            session.tick();
        }
        assert_eq!(session.seconds_left(), 115);

        let truth = session.current_ballot().unwrap().is_valid;
        session.decide(Verdict::matching(truth));
        assert_eq!(session.stats().score, 10);
        assert_eq!(session.seconds_left(), 117);
    }

    #[test]
    fn clock_never_exceeds_the_initial_window() {
        let mut session = active_session();
        let truth = session.current_ballot().unwrap().is_valid;
        session.decide(Verdict::matching(truth));
        // +2 on a full clock clamps back to the 120s ceiling.
        assert_eq!(session.seconds_left(), 120);
    }

    #[test]
    fn wrong_answers_floor_score_at_zero_and_drain_clock() {
        let mut session = active_session();
        for _ in 0..3 {
            let truth = session.current_ballot().unwrap().is_valid;
            let wrong = Verdict::matching(!truth);
            assert!(matches!(session.decide(wrong), DecideOutcome::Accepted(_)));
            session.feedback_complete();
        }
        assert_eq!(session.stats().score, 0);
        assert_eq!(session.stats().incorrect, 3);
        assert_eq!(session.seconds_left(), 120 - 3 * 8);
    }

    #[test]
    fn expiry_terminates_exactly_once_with_no_decisions() {
        let cfg = SessionConfig {
            initial_clock_secs: 2,
            ..SessionConfig::default()
        };
        let mut session = Session::new(queue_of(25, 7), cfg);

        assert_eq!(session.tick(), TickOutcome::Running { seconds_left: 1 });
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert!(session.termination_pending());
        assert_eq!(session.tick(), TickOutcome::Ignored);

        assert_eq!(session.decide(Verdict::Valid), DecideOutcome::Ignored);

        let stats = session.finalize().cloned().unwrap();
        assert_eq!(stats.total_seen, 0);
        assert_eq!(stats.elapsed_secs, 2);
        assert!(session.finalize().is_none());
    }

    #[test]
    fn clearing_the_whole_queue_correctly_scores_250() {
        let mut session = active_session();
        while !session.termination_pending() {
            let truth = session.current_ballot().unwrap().is_valid;
            assert!(matches!(
                session.decide(Verdict::matching(truth)),
                DecideOutcome::Accepted(_)
            ));
            session.feedback_complete();
        }
        let stats = session.finalize().unwrap();
        assert_eq!(stats.correct, 25);
        assert_eq!(stats.incorrect, 0);
        assert_eq!(stats.total_seen, 25);
        assert_eq!(stats.score, 250);
    }

    #[test]
    fn decisions_record_in_presentation_order() {
        let mut session = active_session();
        for _ in 0..4 {
            let truth = session.current_ballot().unwrap().is_valid;
            session.decide(Verdict::matching(truth));
            session.feedback_complete();
        }
        let ids: Vec<u32> = session.stats().decisions.iter().map(|d| d.ballot_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn feedback_signal_carries_category_explanation() {
        let mut session = active_session();
        loop {
            let ballot = session.current_ballot().unwrap();
            let is_valid = ballot.is_valid;
            let expected = ballot.explanation().unwrap_or_default().to_string();
            match session.decide(Verdict::matching(is_valid)) {
                DecideOutcome::Accepted(feedback) => {
                    assert!(feedback.was_correct);
                    assert_eq!(feedback.explanation, expected);
                    if !is_valid {
                        assert!(!feedback.explanation.is_empty());
                        break;
                    }
                }
                DecideOutcome::Ignored => panic!("decision refused"),
            }
            session.feedback_complete();
        }
    }

    #[test]
    fn observer_receives_ticks_feedback_and_final_stats() {
        #[derive(Default)]
        struct Recording {
            ticks: Vec<u32>,
            feedback: Vec<bool>,
            ended: Vec<u32>,
        }
        impl SessionObserver for Recording {
            fn on_tick(&mut self, seconds_left: u32) {
                self.ticks.push(seconds_left);
            }
            fn on_feedback(&mut self, feedback: &FeedbackSignal) {
                self.feedback.push(feedback.was_correct);
            }
            fn on_session_end(&mut self, stats: &SessionStats) {
                self.ended.push(stats.total_seen);
            }
        }

        let cfg = SessionConfig {
            initial_clock_secs: 3,
            ..SessionConfig::default()
        };
        let session = Session::new(queue_of(25, 3), cfg);
        let mut handle = SessionHandle::new(session, Recording::default());

        let truth = handle.session().current_ballot().unwrap().is_valid;
        handle.decide(Verdict::matching(truth));
        handle.feedback_complete();
        handle.tick();
        handle.tick();
        handle.tick();
        assert!(handle.session().termination_pending());
        assert!(handle.finish().is_some());
        assert!(handle.finish().is_none());

        let observer = &handle.observer;
        assert_eq!(observer.feedback, vec![true]);
        assert!(!observer.ticks.is_empty());
        assert_eq!(observer.ended, vec![1]);
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = SessionConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let restored = SessionConfig::from_json(&json).unwrap();
        assert_eq!(restored, cfg);

        let partial = SessionConfig::from_json(r#"{"initial_clock_secs": 30}"#).unwrap();
        assert_eq!(partial.initial_clock_secs, 30);
        assert_eq!(partial.queue_length, 25);
    }
}
