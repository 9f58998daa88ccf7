/*!
Tallying engine for ranked-ballot ("urnval") elections.

Every voter ranks all the candidates of an election. The engine turns these
ballots into a pairwise preference matrix, the Schulze strongest-path matrix,
one deterministic ranking of the candidates, and finally the seats: primary
mandates, extra mandates, and everybody else.

Two kinds of pseudo candidates take part in the election like everyone else:
*blank* and *vacant*. Nobody ranked at or below the first of them can get a
seat.

```
use urnval::*;

let election = Election::new(
    "board-2024",
    &[
        Candidate::new("anna", "Anna"),
        Candidate::new("bob", "Bob"),
        Candidate::vacant("vacant"),
    ],
)?;
let params = ElectionParams::new(1, 1)?;

let mut ballots = Vec::new();
for ranking in [["anna", "bob", "vacant"], ["bob", "anna", "vacant"], ["anna", "vacant", "bob"]] {
    let ranking: Vec<String> = ranking.iter().map(|s| s.to_string()).collect();
    ballots.push(normalize_ballot(&election, "board-2024", &ranking)?);
}

let result = count_election(&election, &ballots, &params, &CountRules::DEFAULT_RULES)?;
assert_eq!(result.seat_assignment.primary, vec!["anna".to_string()]);
assert_eq!(result.seat_assignment.secondary, vec!["bob".to_string()]);
# Ok::<(), VotingErrors>(())
```
*/
mod config;
mod irv;
mod normalize;
mod preference;
mod ranking;
mod schulze;
mod seats;

pub mod builder;
pub mod manual;
pub mod receipt;

use log::{debug, info};
use std::collections::HashMap;

pub use crate::config::*;
pub use crate::irv::run_stage_count;
pub use crate::normalize::normalize_ballot;
pub use crate::preference::build_preference_matrix;
pub use crate::ranking::rank_candidates;
pub use crate::schulze::strongest_paths;
pub use crate::seats::allocate_seats;

// **** Private structures ****

/// Position of a candidate in the registration order of its election.
/// All the matrices are indexed by it.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub(crate) struct CandidateIdx(pub(crate) usize);

/// The candidate set of one election, with a stable index for each candidate.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Election {
    id: String,
    candidates: Vec<Candidate>,
    index_by_id: HashMap<String, CandidateIdx>,
}

impl Election {
    /// Registers the candidates, in order.
    ///
    /// Fails if two candidates share an id or if only symbolic candidates are given.
    pub fn new(id: &str, candidates: &[Candidate]) -> Result<Election, VotingErrors> {
        let mut index_by_id: HashMap<String, CandidateIdx> = HashMap::new();
        for (idx, c) in candidates.iter().enumerate() {
            if index_by_id.insert(c.id.clone(), CandidateIdx(idx)).is_some() {
                return Err(VotingErrors::DuplicateCandidate(c.id.clone()));
            }
        }
        if !candidates.iter().any(|c| !c.is_symbolic()) {
            return Err(VotingErrors::EmptyElection);
        }
        Ok(Election {
            id: id.to_string(),
            candidates: candidates.to_vec(),
            index_by_id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The candidates in registration order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidate(&self, id: &str) -> Result<&Candidate, VotingErrors> {
        self.index_of(id)
            .map(|idx| &self.candidates[idx.0])
            .ok_or_else(|| VotingErrors::UnknownCandidate(id.to_string()))
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<CandidateIdx> {
        self.index_by_id.get(id).copied()
    }

    pub(crate) fn at(&self, idx: CandidateIdx) -> &Candidate {
        &self.candidates[idx.0]
    }
}

/// Runs the complete count for a closed snapshot of ballots.
///
/// Arguments:
/// * `election` the candidates of the election
/// * `ballots` the accepted ballots, one per voter
/// * `params` the number of seats to fill
/// * `rules` how to break ties the strongest paths leave open
///
/// The result only depends on the arguments: counting twice gives identical results.
pub fn count_election(
    election: &Election,
    ballots: &[Ballot],
    params: &ElectionParams,
    rules: &CountRules,
) -> Result<CountResult, VotingErrors> {
    info!(
        "Counting {:?} ballots for election {:?}: {:?} candidates, {:?} mandates, {:?} extra mandates",
        ballots.len(),
        election.id(),
        election.len(),
        params.mandates(),
        params.extra_mandates()
    );
    for (idx, c) in election.candidates().iter().enumerate() {
        debug!("Candidate: {}: {} ({:?})", idx, c.id, c.kind);
    }

    let indexed = preference::index_ballots(election, ballots)?;
    let d = preference::preference_matrix(election.len(), &indexed);
    let first_preferences = preference::first_preferences(election.len(), &indexed);
    debug!("count_election: preference matrix: {:?}", d.rows());
    debug!("count_election: first preferences: {:?}", first_preferences);

    let p = strongest_paths(&d);
    debug!("count_election: strongest paths: {:?}", p.rows());

    let order = ranking::rank(&p, &first_preferences, election, rules.tiebreak_mode);
    let ranked: Vec<&Candidate> = order.iter().map(|idx| election.at(*idx)).collect();
    let seat_assignment = allocate_seats(&ranked, params);
    info!(
        "count_election: ranking {:?}, primary {:?}, secondary {:?}",
        ranked.iter().map(|c| c.id.as_str()).collect::<Vec<&str>>(),
        seat_assignment.primary,
        seat_assignment.secondary
    );

    Ok(CountResult {
        ranking: ranked.iter().map(|c| c.id.clone()).collect(),
        total_votes: ballots.len() as u64,
        candidate_order: election.candidates().iter().map(|c| c.id.clone()).collect(),
        first_preferences,
        preference_matrix: d,
        strongest_path_matrix: p,
        seat_assignment,
    })
}
