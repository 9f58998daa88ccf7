// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The role a candidate plays in the count.
///
/// Blank and vacant candidates are ordinary participants in the pairwise
/// comparisons. They only change the outcome when seats are handed out, and
/// in the round-based count.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum CandidateKind {
    Regular,
    /// "I abstain": ballots whose current preference is blank are set aside
    /// in the round-based count.
    Blank,
    /// "I prefer an empty seat to everyone ranked below".
    Vacant,
}

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub kind: CandidateKind,
}

impl Candidate {
    pub fn new(id: &str, name: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: name.to_string(),
            kind: CandidateKind::Regular,
        }
    }

    pub fn blank(id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: "Blank".to_string(),
            kind: CandidateKind::Blank,
        }
    }

    pub fn vacant(id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: "Vacant".to_string(),
            kind: CandidateKind::Vacant,
        }
    }

    /// Blank and vacant candidates are symbolic: they cap the seat allocation.
    pub fn is_symbolic(&self) -> bool {
        self.kind != CandidateKind::Regular
    }
}

/// A ranking that has been checked against the candidate set of its election.
///
/// It can only be obtained through [crate::normalize_ballot] (or the builder),
/// so holding one means that every candidate appears exactly once.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    pub(crate) ranking: Vec<String>,
}

impl Ballot {
    /// The candidate ids, most preferred first.
    pub fn ranking(&self) -> &[String] {
        &self.ranking
    }
}

/// The number of seats to fill. Both values are fixed for the duration of a count.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ElectionParams {
    pub(crate) mandates: usize,
    pub(crate) extra_mandates: usize,
}

impl ElectionParams {
    /// The arguments are signed so that configuration mistakes (negative
    /// numbers) are reported instead of silently wrapping.
    pub fn new(mandates: i64, extra_mandates: i64) -> Result<ElectionParams, VotingErrors> {
        if mandates < 1 || extra_mandates < 0 {
            return Err(VotingErrors::InvalidParameters {
                mandates,
                extra_mandates,
            });
        }
        Ok(ElectionParams {
            mandates: mandates as usize,
            extra_mandates: extra_mandates as usize,
        })
    }

    pub fn mandates(&self) -> usize {
        self.mandates
    }

    pub fn extra_mandates(&self) -> usize {
        self.extra_mandates
    }
}

// ******** Output data structures *********

/// A square matrix of counts, indexed by the registration order of the candidates.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Matrix {
    size: usize,
    cells: Vec<u64>,
}

impl Matrix {
    pub(crate) fn zeros(size: usize) -> Matrix {
        Matrix {
            size,
            cells: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.cells[row * self.size + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: u64) {
        self.cells[row * self.size + col] = value;
    }

    pub(crate) fn increment(&mut self, row: usize, col: usize) {
        self.cells[row * self.size + col] += 1;
    }

    pub fn rows(&self) -> Vec<Vec<u64>> {
        self.cells.chunks(self.size.max(1)).map(|r| r.to_vec()).collect()
    }

    /// The same matrix with rows and columns permuted: entry (i, j) of the
    /// result is entry (order[i], order[j]) of this matrix.
    pub fn permuted(&self, order: &[usize]) -> Vec<Vec<u64>> {
        order
            .iter()
            .map(|&i| order.iter().map(|&j| self.get(i, j)).collect())
            .collect()
    }
}

/// The ranking split into the three contiguous bands.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SeatAssignment {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub not_elected: Vec<String>,
}

/// Everything produced by one count.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CountResult {
    /// Candidate ids, most preferred first.
    pub ranking: Vec<String>,
    pub total_votes: u64,
    /// Candidate ids in the order used to index the matrices.
    pub candidate_order: Vec<String>,
    /// Number of ballots ranking each candidate first, in matrix order.
    pub first_preferences: Vec<u64>,
    pub preference_matrix: Matrix,
    pub strongest_path_matrix: Matrix,
    pub seat_assignment: SeatAssignment,
}

impl CountResult {
    /// Matrix indices of the candidates, in ranking order.
    pub fn ranking_indices(&self) -> Vec<usize> {
        self.ranking
            .iter()
            .filter_map(|id| self.candidate_order.iter().position(|c| c == id))
            .collect()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StageCandidate {
    pub id: String,
    pub votes: u64,
    pub eliminated: bool,
}

/// Statistics for one stage of the round-based count.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StageStats {
    pub stage: u32,
    /// Ballots currently resting on the blank candidate.
    pub blanks: u64,
    /// Ballots counted towards the majority, blanks excluded.
    pub total: u64,
    /// Sorted by decreasing number of votes.
    pub candidates: Vec<StageCandidate>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StageCountResult {
    pub winner: Option<String>,
    pub stages: Vec<StageStats>,
}

/// What is wrong with a submitted ranking.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum BallotDefect {
    /// A candidate of the election is not ranked.
    Missing(String),
    /// The ranking names something that is not a candidate of the election.
    Unknown(String),
    /// A candidate is ranked more than once.
    Duplicate(String),
}

impl Display for BallotDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BallotDefect::Missing(id) => write!(f, "candidate {} is not ranked", id),
            BallotDefect::Unknown(id) => write!(f, "unknown candidate {}", id),
            BallotDefect::Duplicate(id) => write!(f, "candidate {} is ranked twice", id),
        }
    }
}

/// Errors that prevent a count from completing. None of them is transient.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// The ranking is not a permutation of the candidate set.
    MalformedBallot { defect: BallotDefect },
    /// The ballot was submitted for another election.
    UnknownElection(String),
    UnknownCandidate(String),
    /// A ballot handed to the count does not match the candidate set.
    InvalidBallotSet { ballot_index: usize },
    InvalidParameters { mandates: i64, extra_mandates: i64 },
    /// The election has no regular candidate.
    EmptyElection,
    DuplicateCandidate(String),
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::MalformedBallot { defect } => write!(f, "malformed ballot: {}", defect),
            VotingErrors::UnknownElection(id) => write!(f, "unknown election {}", id),
            VotingErrors::UnknownCandidate(id) => write!(f, "unknown candidate {}", id),
            VotingErrors::InvalidBallotSet { ballot_index } => {
                write!(f, "ballot #{} does not rank the candidates of this election", ballot_index)
            }
            VotingErrors::InvalidParameters {
                mandates,
                extra_mandates,
            } => write!(
                f,
                "invalid seat parameters: mandates={} (must be >= 1), extra mandates={} (must be >= 0)",
                mandates, extra_mandates
            ),
            VotingErrors::EmptyElection => write!(f, "the election has no regular candidate"),
            VotingErrors::DuplicateCandidate(id) => write!(f, "candidate id {} is registered twice", id),
        }
    }
}

// ********* Configuration **********

/// How to order candidates that the strongest paths cannot separate.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// More first-place mentions first, then the smaller candidate id.
    FirstPreferencesThenId,
    /// The order in which the candidates were registered.
    UseCandidateOrder,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CountRules {
    pub tiebreak_mode: TieBreakMode,
}

impl CountRules {
    pub const DEFAULT_RULES: CountRules = CountRules {
        tiebreak_mode: TieBreakMode::FirstPreferencesThenId,
    };
}

impl Default for CountRules {
    fn default() -> Self {
        CountRules::DEFAULT_RULES
    }
}
