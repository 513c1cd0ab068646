//! Centralized balance and tuning constants for Matpatra game logic.
//!
//! These values define the deterministic math for the review session.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_SESSION_START: &str = "log.session.start";
pub(crate) const LOG_DECISION_CORRECT: &str = "log.decision.correct";
pub(crate) const LOG_DECISION_INCORRECT: &str = "log.decision.incorrect";
pub(crate) const LOG_CLOCK_EXPIRED: &str = "log.clock.expired";
pub(crate) const LOG_QUEUE_EXHAUSTED: &str = "log.queue.exhausted";
pub(crate) const LOG_SESSION_FINALIZED: &str = "log.session.finalized";

// Session defaults ---------------------------------------------------------
pub const DEFAULT_QUEUE_LENGTH: usize = 25;
pub const INITIAL_CLOCK_SECS: u32 = 120;
pub const SCORE_CORRECT_DELTA: i32 = 10;
pub const SCORE_INCORRECT_DELTA: i32 = -5;
pub const TIME_CORRECT_DELTA: i32 = 2;
pub const TIME_INCORRECT_DELTA: i32 = -8;
/// Contract with the presentation layer: how long feedback stays visible.
pub const FEEDBACK_MILLIS: u64 = 1_800;
/// Contract with the presentation layer: pause before end-of-session delivery.
pub const END_GRACE_MILLIS: u64 = 700;

// Generator tuning ---------------------------------------------------------
/// Guaranteed head of every queue: two valid ballots plus one of each of the
/// six invalid categories.
pub const MIN_QUEUE_LENGTH: usize = 8;
pub(crate) const GUARANTEED_VALID_COUNT: usize = 2;
pub(crate) const VALID_DRAW_RATIO: f32 = 0.45;
pub(crate) const SLOPPY_MARK_CHANCE: f32 = 0.20;
pub(crate) const IDENTIFYING_MARK_CHANCE: f32 = 0.5;
pub(crate) const MULTI_MARK_MIN: usize = 2;
pub(crate) const MULTI_MARK_MAX: usize = 4;
