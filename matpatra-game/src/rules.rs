//! Rules-reference text consumed by the presentation layer's side panel.
//! Pure static data; validity logic lives in the generator and evaluator.

use serde::Serialize;

/// One entry in the invalid-ballot reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleEntry {
    pub label: &'static str,
    pub desc: &'static str,
}

/// What a valid ballot must satisfy.
pub const VALID_RULES: [&str; 5] = [
    "Exactly ONE mark in ONE party box",
    "Mark must be clearly inside a single cell",
    "Election officer signature present at bottom",
    "Ballot is intact — no tears or damage",
    "No identifying marks, names, or writing",
];

/// Reference list of rejection reasons. Broader than the six generated
/// categories: the panel also names smudge and fingerprint cases the clerk
/// may encounter in training material.
pub const INVALID_RULES: [RuleEntry; 8] = [
    RuleEntry { label: "Multiple Marks", desc: "Two or more cells are marked" },
    RuleEntry { label: "Blank Ballot", desc: "No mark made anywhere on the ballot" },
    RuleEntry { label: "Border Mark", desc: "Mark falls between two cells — intent unclear" },
    RuleEntry { label: "Identifying Marks", desc: "Name, signature, or other writing on ballot" },
    RuleEntry { label: "No Signature", desc: "Election officer signature is missing" },
    RuleEntry { label: "Torn / Damaged", desc: "Physical damage makes intent unreadable" },
    RuleEntry { label: "Smudged Mark", desc: "Ink has spread beyond the cell — intent illegible" },
    RuleEntry {
        label: "Fingerprint",
        desc: "Voter's ink thumbprint found on ballot — identity revealed",
    },
];
