use anyhow::{Context, Result};
use serde::Serialize;

use matpatra_game::{
    BallotGenerator, DecideOutcome, FeedbackSignal, Session, SessionConfig, SessionHandle,
    SessionObserver, SessionStats, ShiftReport, Verdict, VoterProfile, shift_report,
};

use crate::logic::policy::{ClerkCall, ReviewStrategy};

/// Configuration for one simulated shift.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub strategy: ReviewStrategy,
    pub queue_length: usize,
    pub initial_clock_secs: u32,
    /// Simulated seconds the clerk spends looking at each ballot before
    /// stamping it.
    pub review_secs: u32,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(strategy: ReviewStrategy, seed: u64) -> Self {
        let defaults = SessionConfig::default();
        Self {
            seed,
            strategy,
            queue_length: defaults.queue_length,
            initial_clock_secs: defaults.initial_clock_secs,
            review_secs: 3,
        }
    }

    #[must_use]
    pub fn with_queue_length(mut self, queue_length: usize) -> Self {
        self.queue_length = queue_length;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, initial_clock_secs: u32) -> Self {
        self.initial_clock_secs = initial_clock_secs;
        self
    }

    #[must_use]
    pub fn with_review_secs(mut self, review_secs: u32) -> Self {
        self.review_secs = review_secs;
        self
    }
}

/// Snapshot of one stamped ballot.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRecord {
    pub ballot_id: u32,
    pub verdict: Verdict,
    pub was_correct: bool,
    pub category: Option<String>,
    pub rationale: Option<String>,
}

/// Observer counting the event traffic a real presentation layer would see.
#[derive(Debug, Default, Clone)]
struct EventProbe {
    ticks: u32,
    feedback: u32,
    end_fires: u32,
}

impl SessionObserver for EventProbe {
    fn on_tick(&mut self, _seconds_left: u32) {
        self.ticks += 1;
    }

    fn on_feedback(&mut self, _feedback: &FeedbackSignal) {
        self.feedback += 1;
    }

    fn on_session_end(&mut self, _stats: &SessionStats) {
        self.end_fires += 1;
    }
}

/// Result of one complete simulated shift.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub seed: u64,
    pub policy_name: String,
    pub stats: SessionStats,
    pub report: ShiftReport,
    pub decisions: Vec<DecisionRecord>,
    pub ticks_observed: u32,
    pub end_fires: u32,
}

/// Aggregate over every seed a strategy was run against.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyResult {
    pub strategy_name: String,
    pub sessions_run: usize,
    pub avg_score: f64,
    pub avg_accuracy_pct: f64,
    pub grades: Vec<String>,
    pub passed: bool,
    pub failures: Vec<String>,
}

/// Drive one session to termination under the given strategy.
pub fn run_session(config: &SimulationConfig) -> Result<SessionRecord> {
    let session_cfg = SessionConfig {
        queue_length: config.queue_length,
        initial_clock_secs: config.initial_clock_secs,
        ..SessionConfig::default()
    };
    let queue = BallotGenerator::from_seed(config.seed)
        .generate_queue(config.queue_length)
        .with_context(|| format!("building queue for seed {}", config.seed))?;
    let mut handle = SessionHandle::new(Session::new(queue, session_cfg), EventProbe::default());
    let mut policy = config.strategy.create_policy(config.seed);

    let mut decisions = Vec::new();
    while !handle.session().termination_pending() {
        // The clock keeps running while the clerk examines the ballot.
        for _ in 0..config.review_secs {
            handle.tick();
        }
        if handle.session().termination_pending() {
            break;
        }

        let voter = VoterProfile::for_ballot(handle.session().ballot_index());
        let Some(ballot) = handle.session().current_ballot() else {
            break;
        };
        let ballot_id = ballot.id;
        let category = ballot.invalid_category.map(|c| c.label().to_string());
        let ClerkCall { verdict, rationale } = policy.review(ballot);

        match handle.decide(verdict) {
            DecideOutcome::Accepted(feedback) => {
                log::debug!(
                    "[{}] seed {} ballot {ballot_id} ({}, {}): {verdict} -> correct={}",
                    policy.name(),
                    config.seed,
                    voter.name,
                    voter.district,
                    feedback.was_correct
                );
                decisions.push(DecisionRecord {
                    ballot_id,
                    verdict,
                    was_correct: feedback.was_correct,
                    category,
                    rationale,
                });
            }
            DecideOutcome::Ignored => continue,
        }
        handle.feedback_complete();
    }

    let stats = handle
        .finish()
        .cloned()
        .context("session terminated without finalizable stats")?;
    let probe = handle.observer().clone();
    Ok(SessionRecord {
        seed: config.seed,
        policy_name: config.strategy.label().to_string(),
        report: shift_report(&stats),
        stats,
        decisions,
        ticks_observed: probe.ticks,
        end_fires: probe.end_fires,
    })
}

/// Run a strategy across all seeds and validate the engine-level
/// expectations every session must satisfy.
pub fn run_strategy(
    strategy: ReviewStrategy,
    seeds: &[u64],
    queue_length: usize,
    review_secs: u32,
) -> Result<(StrategyResult, Vec<SessionRecord>)> {
    let mut records = Vec::with_capacity(seeds.len());
    let mut failures = Vec::new();

    for &seed in seeds {
        let config = SimulationConfig::new(strategy, seed)
            .with_queue_length(queue_length)
            .with_review_secs(review_secs);
        let record = run_session(&config)?;
        validate_record(&record, strategy, &mut failures);
        records.push(record);
    }

    let sessions_run = records.len();
    let total_score: i64 = records.iter().map(|r| i64::from(r.stats.score)).sum();
    let total_accuracy: u64 = records
        .iter()
        .map(|r| u64::from(r.report.accuracy_pct))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let (avg_score, avg_accuracy_pct) = {
        let divisor = sessions_run.max(1) as f64;
        (total_score as f64 / divisor, total_accuracy as f64 / divisor)
    };
    let result = StrategyResult {
        strategy_name: strategy.label().to_string(),
        sessions_run,
        avg_score,
        avg_accuracy_pct,
        grades: records.iter().map(|r| r.report.grade.to_string()).collect(),
        passed: failures.is_empty(),
        failures,
    };
    Ok((result, records))
}

fn validate_record(record: &SessionRecord, strategy: ReviewStrategy, failures: &mut Vec<String>) {
    let seed = record.seed;
    if record.end_fires != 1 {
        failures.push(format!(
            "seed {seed}: session end fired {} times",
            record.end_fires
        ));
    }
    if record.stats.score < 0 {
        failures.push(format!("seed {seed}: negative score {}", record.stats.score));
    }
    if record.stats.total_seen != record.stats.correct + record.stats.incorrect {
        failures.push(format!("seed {seed}: decision counts do not add up"));
    }
    if strategy == ReviewStrategy::Diligent && record.report.accuracy_pct != 100 {
        failures.push(format!(
            "seed {seed}: diligent clerk scored {}% accuracy",
            record.report.accuracy_pct
        ));
    }
    if strategy == ReviewStrategy::RubberStamp {
        let missed_invalid = record
            .decisions
            .iter()
            .any(|d| d.category.is_some() && d.was_correct);
        if missed_invalid {
            failures.push(format!(
                "seed {seed}: rubber stamp was credited for an invalid ballot"
            ));
        }
    }
}
