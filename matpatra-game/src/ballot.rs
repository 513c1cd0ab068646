//! Ballot data model: marks, invalidity categories, and the generated
//! ballot scenario the player is asked to classify.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum marks a generated ballot can carry without extra allocations.
pub type MarkList = SmallVec<[Mark; 4]>;

/// Visual style of a mark. The generator only emits [`MarkStyle::Check`];
/// the remaining variants exist for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarkStyle {
    #[default]
    Check,
    Cross,
    Dot,
    Scribble,
}

/// Which neighboring cell a border mark bleeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderDirection {
    Right,
    Bottom,
}

/// Corner carrying the tear on a damaged ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TearPosition {
    TopRight,
    BottomRight,
    TopLeft,
}

impl TearPosition {
    pub const ALL: [Self; 3] = [Self::TopRight, Self::BottomRight, Self::TopLeft];
}

/// A single ink mark referencing a grid cell by coordinate. Coordinates are
/// sufficient for both rendering and validity logic; marks never reference
/// symbol identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub row: u8,
    pub col: u8,
    #[serde(default)]
    pub is_border: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_direction: Option<BorderDirection>,
    #[serde(default)]
    pub smudged: bool,
    #[serde(default)]
    pub style: MarkStyle,
}

impl Mark {
    /// A clean mark fully inside one cell.
    #[must_use]
    pub fn in_cell(row: u8, col: u8) -> Self {
        Self {
            row,
            col,
            is_border: false,
            border_direction: None,
            smudged: false,
            style: MarkStyle::Check,
        }
    }

    /// A mark straddling the border toward the given neighbor.
    #[must_use]
    pub fn on_border(row: u8, col: u8, direction: BorderDirection) -> Self {
        Self {
            row,
            col,
            is_border: true,
            border_direction: Some(direction),
            smudged: false,
            style: MarkStyle::Check,
        }
    }
}

/// The six fixed reasons a ballot can be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidCategory {
    MultipleMarks,
    Blank,
    BorderMark,
    IdentifyingMarks,
    NoSignature,
    Torn,
}

impl InvalidCategory {
    pub const ALL: [Self; 6] = [
        Self::MultipleMarks,
        Self::Blank,
        Self::BorderMark,
        Self::IdentifyingMarks,
        Self::NoSignature,
        Self::Torn,
    ];

    /// Short label for reports and summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MultipleMarks => "Multiple Marks",
            Self::Blank => "Blank Ballot",
            Self::BorderMark => "Border Mark",
            Self::IdentifyingMarks => "Identifying Marks",
            Self::NoSignature => "No Signature",
            Self::Torn => "Torn / Damaged",
        }
    }

    /// Rationale shown to the player when a ballot of this category is
    /// resolved.
    #[must_use]
    pub const fn explanation(self) -> &'static str {
        match self {
            Self::MultipleMarks => {
                "TWO OR MORE PARTY SYMBOLS WERE MARKED — Only one mark is permitted per ballot."
            }
            Self::Blank => {
                "NO PARTY SYMBOL WAS MARKED — A valid ballot must have exactly one mark."
            }
            Self::BorderMark => {
                "MARK FALLS ON THE BORDER BETWEEN TWO CELLS — Voter intent is ambiguous."
            }
            Self::IdentifyingMarks => {
                "VOTER'S IDENTITY REVEALED — Writing, marks, or signatures that identify the voter invalidate the ballot."
            }
            Self::NoSignature => {
                "ELECTION OFFICER'S SIGNATURE IS MISSING — Unsigned ballots cannot be counted."
            }
            Self::Torn => {
                "BALLOT IS PHYSICALLY DAMAGED — A torn or mutilated ballot cannot be accepted."
            }
        }
    }
}

impl std::fmt::Display for InvalidCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized on-ballot anchor for identifying writing, in percent of the
/// ballot's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotAnchor {
    pub top_pct: u8,
    pub left_pct: u8,
}

/// One generated ballot scenario. `is_valid` is ground truth, set once at
/// creation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    pub id: u32,
    pub is_valid: bool,
    #[serde(default)]
    pub marks: MarkList,
    pub has_signature: bool,
    pub has_tear: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tear_position: Option<TearPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifying_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifying_position: Option<BallotAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_category: Option<InvalidCategory>,
    /// Cosmetic only: the single mark renders imprecisely but remains
    /// unambiguous. Never affects `is_valid`.
    #[serde(default)]
    pub sloppy_mark: bool,
}

impl Ballot {
    /// Rationale text for an invalid ballot; `None` on valid ballots.
    #[must_use]
    pub fn explanation(&self) -> Option<&'static str> {
        self.invalid_category.map(InvalidCategory::explanation)
    }

    /// Structural invariant check: category presence must mirror validity,
    /// tears must carry a corner, and identifying text travels with its
    /// anchor.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.invalid_category.is_some() == self.is_valid {
            return false;
        }
        if self.has_tear != self.tear_position.is_some() {
            return false;
        }
        self.identifying_text.is_some() == self.identifying_position.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_constructors_set_border_fields() {
        let clean = Mark::in_cell(3, 2);
        assert!(!clean.is_border);
        assert!(clean.border_direction.is_none());
        assert_eq!(clean.style, MarkStyle::Check);

        let border = Mark::on_border(1, 1, BorderDirection::Bottom);
        assert!(border.is_border);
        assert_eq!(border.border_direction, Some(BorderDirection::Bottom));
    }

    #[test]
    fn category_explanations_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for category in InvalidCategory::ALL {
            assert!(seen.insert(category.explanation()));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn consistency_flags_category_validity_mismatch() {
        let mut ballot = Ballot {
            id: 1,
            is_valid: true,
            marks: MarkList::new(),
            has_signature: true,
            has_tear: false,
            tear_position: None,
            identifying_text: None,
            identifying_position: None,
            invalid_category: None,
            sloppy_mark: false,
        };
        assert!(ballot.is_consistent());

        ballot.invalid_category = Some(InvalidCategory::Blank);
        assert!(!ballot.is_consistent());

        ballot.is_valid = false;
        assert!(ballot.is_consistent());

        ballot.has_tear = true;
        assert!(!ballot.is_consistent());
    }

    #[test]
    fn ballot_serde_round_trips() {
        let ballot = Ballot {
            id: 7,
            is_valid: false,
            marks: MarkList::from_slice(&[Mark::on_border(2, 3, BorderDirection::Right)]),
            has_signature: true,
            has_tear: false,
            tear_position: None,
            identifying_text: None,
            identifying_position: None,
            invalid_category: Some(InvalidCategory::BorderMark),
            sloppy_mark: false,
        };
        let json = serde_json::to_string(&ballot).unwrap();
        let restored: Ballot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ballot);
        assert_eq!(restored.explanation(), Some(InvalidCategory::BorderMark.explanation()));
    }
}
