use crate::config::*;
use crate::{CandidateIdx, Election};

/// A ballot translated to candidate indices, most preferred first.
#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct IndexedBallot(pub(crate) Vec<CandidateIdx>);

/// Translates the ballots to candidate indices.
///
/// Ballots are normalized on entry, so this only fails if a ballot of some
/// other candidate set was mixed in. The count is then refused as a whole.
pub(crate) fn index_ballots(
    election: &Election,
    ballots: &[Ballot],
) -> Result<Vec<IndexedBallot>, VotingErrors> {
    let n = election.len();
    let mut res: Vec<IndexedBallot> = Vec::with_capacity(ballots.len());
    for (ballot_index, b) in ballots.iter().enumerate() {
        let invalid = VotingErrors::InvalidBallotSet { ballot_index };
        if b.ranking.len() != n {
            return Err(invalid);
        }
        let mut seen = vec![false; n];
        let mut indices: Vec<CandidateIdx> = Vec::with_capacity(n);
        for id in b.ranking.iter() {
            match election.index_of(id) {
                Some(idx) if !seen[idx.0] => {
                    seen[idx.0] = true;
                    indices.push(idx);
                }
                _ => return Err(invalid),
            }
        }
        res.push(IndexedBallot(indices));
    }
    Ok(res)
}

/// d[x][y] = number of ballots ranking x strictly above y.
pub(crate) fn preference_matrix(num_candidates: usize, ballots: &[IndexedBallot]) -> Matrix {
    let mut d = Matrix::zeros(num_candidates);
    for b in ballots.iter() {
        for (pos, winner) in b.0.iter().enumerate() {
            for loser in b.0[pos + 1..].iter() {
                d.increment(winner.0, loser.0);
            }
        }
    }
    d
}

pub(crate) fn first_preferences(num_candidates: usize, ballots: &[IndexedBallot]) -> Vec<u64> {
    let mut res = vec![0; num_candidates];
    for b in ballots.iter() {
        if let Some(first) = b.0.first() {
            res[first.0] += 1;
        }
    }
    res
}

/// Builds the pairwise preference matrix of an election.
///
/// Rows and columns follow the registration order of the candidates.
pub fn build_preference_matrix(
    election: &Election,
    ballots: &[Ballot],
) -> Result<Matrix, VotingErrors> {
    let indexed = index_ballots(election, ballots)?;
    Ok(preference_matrix(election.len(), &indexed))
}
