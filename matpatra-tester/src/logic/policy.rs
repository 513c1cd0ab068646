use std::fmt;

use matpatra_game::{Ballot, Verdict};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Decision returned by a [`ClerkPolicy`]
#[derive(Debug, Clone)]
pub struct ClerkCall {
    pub verdict: Verdict,
    pub rationale: Option<String>,
}

impl ClerkCall {
    #[must_use]
    pub fn new(verdict: Verdict, rationale: Option<String>) -> Self {
        Self { verdict, rationale }
    }
}

/// Policy interface for automated review strategies.
pub trait ClerkPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Produce a verdict for the ballot under review.
    fn review(&mut self, ballot: &Ballot) -> ClerkCall;
}

/// Built-in clerk strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReviewStrategy {
    Diligent,
    Hasty,
    Coin,
    RubberStamp,
    Hardliner,
}

impl ReviewStrategy {
    pub const ALL: [Self; 5] = [
        Self::Diligent,
        Self::Hasty,
        Self::Coin,
        Self::RubberStamp,
        Self::Hardliner,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ReviewStrategy::Diligent => "Diligent",
            ReviewStrategy::Hasty => "Hasty",
            ReviewStrategy::Coin => "Coin Flip",
            ReviewStrategy::RubberStamp => "Rubber Stamp",
            ReviewStrategy::Hardliner => "Hardliner",
        }
    }

    /// Parse a CLI token into a strategy.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "diligent" => Some(Self::Diligent),
            "hasty" => Some(Self::Hasty),
            "coin" => Some(Self::Coin),
            "rubber-stamp" | "rubberstamp" => Some(Self::RubberStamp),
            "hardliner" => Some(Self::Hardliner),
            _ => None,
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn ClerkPolicy + Send> {
        match self {
            ReviewStrategy::Diligent => Box::new(DiligentPolicy),
            ReviewStrategy::Hasty => Box::new(HastyPolicy::new(seed)),
            ReviewStrategy::Coin => Box::new(CoinPolicy::new(seed)),
            ReviewStrategy::RubberStamp => Box::new(RubberStampPolicy),
            ReviewStrategy::Hardliner => Box::new(HardlinerPolicy),
        }
    }
}

impl fmt::Display for ReviewStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Apply the written rules to the observable ballot features, without
/// peeking at the ground-truth flag.
fn rule_book_verdict(ballot: &Ballot) -> Verdict {
    let acceptable = ballot.marks.len() == 1
        && !ballot.marks[0].is_border
        && ballot.has_signature
        && !ballot.has_tear
        && ballot.identifying_text.is_none();
    if acceptable {
        Verdict::Valid
    } else {
        Verdict::Invalid
    }
}

struct DiligentPolicy;
struct RubberStampPolicy;
struct HardlinerPolicy;

struct HastyPolicy {
    rng: ChaCha20Rng,
    slip_chance: f64,
}

impl HastyPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            slip_chance: 0.2,
        }
    }
}

struct CoinPolicy {
    rng: ChaCha20Rng,
}

impl CoinPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl ClerkPolicy for DiligentPolicy {
    fn name(&self) -> &'static str {
        "Diligent"
    }

    fn review(&mut self, ballot: &Ballot) -> ClerkCall {
        let verdict = rule_book_verdict(ballot);
        ClerkCall::new(verdict, Some(format!("{} marks", ballot.marks.len())))
    }
}

impl ClerkPolicy for HastyPolicy {
    fn name(&self) -> &'static str {
        "Hasty"
    }

    fn review(&mut self, ballot: &Ballot) -> ClerkCall {
        let careful = rule_book_verdict(ballot);
        if self.rng.random_bool(self.slip_chance) {
            let slipped = match careful {
                Verdict::Valid => Verdict::Invalid,
                Verdict::Invalid => Verdict::Valid,
            };
            return ClerkCall::new(slipped, Some(String::from("slipped")));
        }
        ClerkCall::new(careful, None)
    }
}

impl ClerkPolicy for CoinPolicy {
    fn name(&self) -> &'static str {
        "Coin Flip"
    }

    fn review(&mut self, _ballot: &Ballot) -> ClerkCall {
        let verdict = if self.rng.random_bool(0.5) {
            Verdict::Valid
        } else {
            Verdict::Invalid
        };
        ClerkCall::new(verdict, None)
    }
}

impl ClerkPolicy for RubberStampPolicy {
    fn name(&self) -> &'static str {
        "Rubber Stamp"
    }

    fn review(&mut self, _ballot: &Ballot) -> ClerkCall {
        ClerkCall::new(Verdict::Valid, None)
    }
}

impl ClerkPolicy for HardlinerPolicy {
    fn name(&self) -> &'static str {
        "Hardliner"
    }

    fn review(&mut self, _ballot: &Ballot) -> ClerkCall {
        ClerkCall::new(Verdict::Invalid, None)
    }
}
