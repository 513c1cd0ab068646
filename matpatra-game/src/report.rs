//! End-of-shift performance report: letter grade and summary figures
//! derived from a finalized statistics record.

use serde::{Deserialize, Serialize};

use crate::stats::SessionStats;

/// Letter grade stamped on the end-of-shift report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "EXEMPLARY",
            Self::A => "COMMENDABLE",
            Self::B => "SATISFACTORY",
            Self::C => "MARGINAL",
            Self::D => "INADEQUATE",
            Self::F => "FAILED",
        }
    }

    #[must_use]
    pub const fn label_nepali(self) -> &'static str {
        match self {
            Self::S => "उत्कृष्ट",
            Self::A => "प्रशंसनीय",
            Self::B => "सन्तोषजनक",
            Self::C => "सामान्य",
            Self::D => "अपर्याप्त",
            Self::F => "असफल",
        }
    }

    /// Commission flavor text accompanying the grade.
    #[must_use]
    pub const fn flavor_text(self) -> &'static str {
        match self {
            Self::S => {
                "\"Your dedication to electoral integrity is unmatched. The Commission is proud.\""
            }
            Self::A => "\"Well done. The democratic process is in capable hands.\"",
            Self::B => "\"Satisfactory performance. Further training may improve accuracy.\"",
            Self::C => "\"Several errors were noted. A review of procedures is recommended.\"",
            Self::D => "\"Significant errors compromised ballot integrity. Retraining required.\"",
            Self::F => {
                "\"Your performance has jeopardized the election. You are relieved of duty.\""
            }
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::S => f.write_str("S"),
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
            Self::C => f.write_str("C"),
            Self::D => f.write_str("D"),
            Self::F => f.write_str("F"),
        }
    }
}

/// Select the grade from accuracy and score. Grade S requires both the
/// accuracy and the score threshold; the rest go by accuracy alone.
#[must_use]
pub const fn grade_for(accuracy_pct: u32, score: i32) -> Grade {
    if accuracy_pct >= 90 && score >= 100 {
        return Grade::S;
    }
    if accuracy_pct >= 80 {
        return Grade::A;
    }
    if accuracy_pct >= 70 {
        return Grade::B;
    }
    if accuracy_pct >= 60 {
        return Grade::C;
    }
    if accuracy_pct >= 50 {
        return Grade::D;
    }
    Grade::F
}

/// Complete summary of one shift for the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftReport {
    pub grade: Grade,
    pub accuracy_pct: u32,
    pub score: i32,
    pub correct: u32,
    pub incorrect: u32,
    pub total_seen: u32,
    pub elapsed_secs: u32,
}

/// Build the end-of-shift report from a finalized statistics record.
#[must_use]
pub fn shift_report(stats: &SessionStats) -> ShiftReport {
    let accuracy_pct = stats.accuracy_pct();
    ShiftReport {
        grade: grade_for(accuracy_pct, stats.score),
        accuracy_pct,
        score: stats.score,
        correct: stats.correct,
        incorrect: stats.incorrect,
        total_seen: stats.total_seen,
        elapsed_secs: stats.elapsed_secs,
    }
}
