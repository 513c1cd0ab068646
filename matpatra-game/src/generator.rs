//! Ballot generation: per-kind constructors and shuffled session queues.
//!
//! All randomness flows through deterministic streams derived from a single
//! user seed, segregated by concern so that adding draws to one concern
//! never perturbs another.

use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use thiserror::Error;

use crate::ballot::{
    Ballot, BallotAnchor, BorderDirection, InvalidCategory, Mark, MarkList, TearPosition,
};
use crate::catalog::{GRID_COLS, GRID_ROWS, SYMBOL_COUNT, index_to_cell};
use crate::constants::{
    GUARANTEED_VALID_COUNT, IDENTIFYING_MARK_CHANCE, MIN_QUEUE_LENGTH, MULTI_MARK_MAX,
    MULTI_MARK_MIN, SLOPPY_MARK_CHANCE, VALID_DRAW_RATIO,
};

/// Errors raised when queue construction invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("queue length {requested} is below the guaranteed minimum of {minimum}")]
    QueueTooShort { requested: usize, minimum: usize },
}

/// Kind of scenario a single ballot represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallotKind {
    Valid,
    Invalid(InvalidCategory),
}

// Weighted draw list for invalid fills; multiple_marks carries double weight.
const WEIGHTED_INVALID: [InvalidCategory; 7] = [
    InvalidCategory::MultipleMarks,
    InvalidCategory::MultipleMarks,
    InvalidCategory::Blank,
    InvalidCategory::BorderMark,
    InvalidCategory::IdentifyingMarks,
    InvalidCategory::NoSignature,
    InvalidCategory::Torn,
];

// Writing samples for the identifying-marks category.
const IDENTIFYING_TEXTS: [&str; 12] = [
    "राम बहादुर",
    "सीता देवी",
    "कृष्ण प्रसाद",
    "लक्ष्मी कुमारी",
    "बिमल थापा",
    "सुनिता श्रेष्ठ",
    "हरि बहादुर",
    "मनिता गुरुङ",
    "RB-042",
    "VTR-7",
    "रमेश",
    "✗ VOID",
];

// Anchor positions that keep identifying writing clear of header and footer.
const IDENTIFYING_ANCHORS: [BallotAnchor; 6] = [
    BallotAnchor { top_pct: 15, left_pct: 5 },
    BallotAnchor { top_pct: 15, left_pct: 70 },
    BallotAnchor { top_pct: 45, left_pct: 3 },
    BallotAnchor { top_pct: 60, left_pct: 72 },
    BallotAnchor { top_pct: 80, left_pct: 10 },
    BallotAnchor { top_pct: 80, left_pct: 65 },
];

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes())
        .expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl<R: SeedableRng + rand::RngCore> CountingRng<R> {
    fn seeded(seed: u64) -> Self {
        Self {
            rng: R::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }
}

/// Deterministic bundle of RNG streams segregated by generation concern.
#[derive(Debug, Clone)]
pub struct StreamBundle {
    category: CountingRng<SmallRng>,
    layout: CountingRng<SmallRng>,
    shuffle: CountingRng<ChaCha20Rng>,
}

impl StreamBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            category: CountingRng::seeded(derive_stream_seed(seed, b"category")),
            layout: CountingRng::seeded(derive_stream_seed(seed, b"layout")),
            shuffle: CountingRng::seeded(derive_stream_seed(seed, b"shuffle")),
        }
    }

    /// Draw counts per stream, for instrumentation and tests.
    #[must_use]
    pub const fn draw_counts(&self) -> (u64, u64, u64) {
        (
            self.category.draws(),
            self.layout.draws(),
            self.shuffle.draws(),
        )
    }
}

/// Seeded ballot factory. The id counter is owned here rather than shared
/// process state; queue assembly reassigns final ids after shuffling.
#[derive(Debug, Clone)]
pub struct BallotGenerator {
    streams: StreamBundle,
    next_id: u32,
}

impl BallotGenerator {
    /// Construct a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            streams: StreamBundle::from_user_seed(seed),
            next_id: 0,
        }
    }

    /// Borrow the RNG streams, for instrumentation and tests.
    #[must_use]
    pub const fn streams(&self) -> &StreamBundle {
        &self.streams
    }

    /// Assemble a shuffled session queue of exactly `length` ballots with at
    /// least two valid ballots and one of each invalid category.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::QueueTooShort`] when `length` cannot hold
    /// the guaranteed coverage set.
    pub fn generate_queue(&mut self, length: usize) -> Result<Vec<Ballot>, GeneratorError> {
        if length < MIN_QUEUE_LENGTH {
            return Err(GeneratorError::QueueTooShort {
                requested: length,
                minimum: MIN_QUEUE_LENGTH,
            });
        }

        let mut queue = Vec::with_capacity(length);
        for _ in 0..GUARANTEED_VALID_COUNT {
            queue.push(self.valid_ballot());
        }
        for category in InvalidCategory::ALL {
            queue.push(self.invalid_ballot(category));
        }
        while queue.len() < length {
            queue.push(self.draw_ballot());
        }

        queue.shuffle(&mut self.streams.shuffle);
        queue.truncate(length);
        for (position, ballot) in queue.iter_mut().enumerate() {
            ballot.id = u32::try_from(position + 1).unwrap_or(u32::MAX);
        }
        Ok(queue)
    }

    /// One independent draw: 45% valid, 55% invalid with weighted category.
    pub fn draw_ballot(&mut self) -> Ballot {
        if self.streams.category.random::<f32>() < VALID_DRAW_RATIO {
            return self.valid_ballot();
        }
        let index = self.streams.category.random_range(0..WEIGHTED_INVALID.len());
        self.invalid_ballot(WEIGHTED_INVALID[index])
    }

    /// Construct one ballot of the requested kind.
    pub fn ballot_of_kind(&mut self, kind: BallotKind) -> Ballot {
        match kind {
            BallotKind::Valid => self.valid_ballot(),
            BallotKind::Invalid(category) => self.invalid_ballot(category),
        }
    }

    /// A correctly cast ballot: one in-cell mark, signed, intact.
    pub fn valid_ballot(&mut self) -> Ballot {
        let mark = self.random_cell_mark();
        let mut ballot = self.scaffold();
        ballot.is_valid = true;
        ballot.marks.push(mark);
        ballot.sloppy_mark = self.streams.layout.random::<f32>() < SLOPPY_MARK_CHANCE;
        ballot
    }

    /// Construct one invalid ballot of the given category.
    pub fn invalid_ballot(&mut self, category: InvalidCategory) -> Ballot {
        match category {
            InvalidCategory::MultipleMarks => self.multiple_marks_ballot(),
            InvalidCategory::Blank => self.blank_ballot(),
            InvalidCategory::BorderMark => self.border_mark_ballot(),
            InvalidCategory::IdentifyingMarks => self.identifying_marks_ballot(),
            InvalidCategory::NoSignature => self.no_signature_ballot(),
            InvalidCategory::Torn => self.torn_ballot(),
        }
    }

    fn multiple_marks_ballot(&mut self) -> Ballot {
        let count = self
            .streams
            .layout
            .random_range(MULTI_MARK_MIN..=MULTI_MARK_MAX);
        let cells =
            rand::seq::index::sample(&mut self.streams.layout, usize::from(SYMBOL_COUNT), count);
        let mut ballot = self.scaffold();
        ballot.invalid_category = Some(InvalidCategory::MultipleMarks);
        for cell in cells.iter() {
            let (row, col) = index_to_cell(u8::try_from(cell).unwrap_or(0));
            ballot.marks.push(Mark::in_cell(row, col));
        }
        ballot
    }

    fn blank_ballot(&mut self) -> Ballot {
        let mut ballot = self.scaffold();
        ballot.invalid_category = Some(InvalidCategory::Blank);
        ballot
    }

    fn border_mark_ballot(&mut self) -> Ballot {
        // Constrained so a right or bottom neighbor always exists.
        let row = self.streams.layout.random_range(0..GRID_ROWS - 1);
        let col = self.streams.layout.random_range(0..GRID_COLS - 1);
        let direction = if self.streams.layout.random_bool(0.5) {
            BorderDirection::Right
        } else {
            BorderDirection::Bottom
        };
        let mut ballot = self.scaffold();
        ballot.invalid_category = Some(InvalidCategory::BorderMark);
        ballot.marks.push(Mark::on_border(row, col, direction));
        ballot
    }

    fn identifying_marks_ballot(&mut self) -> Ballot {
        let text_index = self.streams.layout.random_range(0..IDENTIFYING_TEXTS.len());
        let anchor_index = self
            .streams
            .layout
            .random_range(0..IDENTIFYING_ANCHORS.len());
        // Half the time the voter also cast an otherwise-valid mark; the
        // writing alone invalidates the ballot either way.
        let marked = self.streams.layout.random::<f32>() < IDENTIFYING_MARK_CHANCE;
        let mark = self.random_cell_mark();
        let mut ballot = self.scaffold();
        ballot.invalid_category = Some(InvalidCategory::IdentifyingMarks);
        ballot.identifying_text = Some(IDENTIFYING_TEXTS[text_index].to_string());
        ballot.identifying_position = Some(IDENTIFYING_ANCHORS[anchor_index]);
        if marked {
            ballot.marks.push(mark);
        }
        ballot
    }

    fn no_signature_ballot(&mut self) -> Ballot {
        let mark = self.random_cell_mark();
        let mut ballot = self.scaffold();
        ballot.invalid_category = Some(InvalidCategory::NoSignature);
        ballot.has_signature = false;
        ballot.marks.push(mark);
        ballot
    }

    fn torn_ballot(&mut self) -> Ballot {
        let mark = self.random_cell_mark();
        let corner_index = self.streams.layout.random_range(0..TearPosition::ALL.len());
        let mut ballot = self.scaffold();
        ballot.invalid_category = Some(InvalidCategory::Torn);
        ballot.has_tear = true;
        ballot.tear_position = Some(TearPosition::ALL[corner_index]);
        ballot.marks.push(mark);
        ballot
    }

    fn random_cell_mark(&mut self) -> Mark {
        let index = self.streams.layout.random_range(0..SYMBOL_COUNT);
        let (row, col) = index_to_cell(index);
        Mark::in_cell(row, col)
    }

    fn scaffold(&mut self) -> Ballot {
        self.next_id = self.next_id.wrapping_add(1);
        Ballot {
            id: self.next_id,
            is_valid: false,
            marks: MarkList::new(),
            has_signature: true,
            has_tear: false,
            tear_position: None,
            identifying_text: None,
            identifying_position: None,
            invalid_category: None,
            sloppy_mark: false,
        }
    }
}
