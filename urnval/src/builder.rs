pub use crate::config::*;
use crate::{count_election, normalize_ballot, run_stage_count, Election};

/// A builder for collecting the ballots of one election.
///
/// Ballots are checked when they are added, so the count itself only fails
/// on configuration problems.
///
/// ```
/// pub use urnval::builder::Builder;
/// pub use urnval::{Candidate, CountRules, ElectionParams};
/// # use urnval::VotingErrors;
///
/// let mut builder = Builder::new(&ElectionParams::new(1, 0)?)
///     .election_id("board")
///     .candidates(&[Candidate::new("anna", "Anna"), Candidate::new("bob", "Bob")])?;
///
/// builder.add_ballot(&["anna".to_string(), "bob".to_string()])?;
/// assert!(builder.add_ballot(&["anna".to_string()]).is_err());
///
/// let result = builder.count(&CountRules::DEFAULT_RULES)?;
/// assert_eq!(result.ranking, vec!["anna".to_string(), "bob".to_string()]);
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _params: ElectionParams,
    pub(crate) _election_id: String,
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _election: Option<Election>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(params: &ElectionParams) -> Builder {
        Builder {
            _params: *params,
            _election_id: String::new(),
            _candidates: Vec::new(),
            _election: None,
            _ballots: Vec::new(),
        }
    }

    pub fn election_id(self, id: &str) -> Builder {
        Builder {
            _election_id: id.to_string(),
            _election: None,
            _ballots: Vec::new(),
            ..self
        }
    }

    /// Replaces the candidates. Ballots added so far are dropped.
    pub fn candidates(self, cands: &[Candidate]) -> Result<Builder, VotingErrors> {
        let election = Election::new(&self._election_id, cands)?;
        Ok(Builder {
            _candidates: cands.to_vec(),
            _election: Some(election),
            _ballots: Vec::new(),
            ..self
        })
    }

    /// Registers one more candidate. Ballots added so far are dropped.
    pub fn candidate(mut self, cand: Candidate) -> Result<Builder, VotingErrors> {
        if self._candidates.iter().any(|c| c.id == cand.id) {
            return Err(VotingErrors::DuplicateCandidate(cand.id));
        }
        self._candidates.push(cand);
        self._election = None;
        self._ballots.clear();
        Ok(self)
    }

    /// Checks the ranking against the candidates and keeps it.
    pub fn add_ballot(&mut self, ranking: &[String]) -> Result<(), VotingErrors> {
        let election = match self._election.take() {
            Some(e) => e,
            None => Election::new(&self._election_id, &self._candidates)?,
        };
        let res = normalize_ballot(&election, &self._election_id, ranking);
        self._election = Some(election);
        self._ballots.push(res?);
        Ok(())
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self._ballots
    }

    fn with_election<T>(
        &self,
        f: impl FnOnce(&Election) -> Result<T, VotingErrors>,
    ) -> Result<T, VotingErrors> {
        match &self._election {
            Some(e) => f(e),
            None => f(&Election::new(&self._election_id, &self._candidates)?),
        }
    }

    /// Runs the Schulze count over the ballots added so far.
    pub fn count(&self, rules: &CountRules) -> Result<CountResult, VotingErrors> {
        self.with_election(|e| count_election(e, &self._ballots, &self._params, rules))
    }

    /// Runs the round-based count over the ballots added so far.
    pub fn stage_count(&self) -> Result<StageCountResult, VotingErrors> {
        self.with_election(|e| run_stage_count(e, &self._ballots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn candidates_one_by_one() {
        let mut b = Builder::new(&ElectionParams::new(1, 1).unwrap())
            .candidate(Candidate::new("a", "A"))
            .unwrap()
            .candidate(Candidate::new("b", "B"))
            .unwrap()
            .candidate(Candidate::vacant("v"))
            .unwrap();
        b.add_ballot(&s(&["a", "v", "b"])).unwrap();
        b.add_ballot(&s(&["a", "b", "v"])).unwrap();
        b.add_ballot(&s(&["v", "a", "b"])).unwrap();
        let res = b.count(&CountRules::DEFAULT_RULES).unwrap();
        assert_eq!(res.ranking, s(&["a", "v", "b"]));
        assert_eq!(res.seat_assignment.primary, s(&["a"]));
        assert!(res.seat_assignment.secondary.is_empty());
    }

    #[test]
    fn rejects_duplicate_candidate() {
        let res = Builder::new(&ElectionParams::new(1, 0).unwrap())
            .candidate(Candidate::new("a", "A"))
            .unwrap()
            .candidate(Candidate::new("a", "A again"));
        assert_eq!(
            res.err(),
            Some(VotingErrors::DuplicateCandidate("a".to_string()))
        );
    }

    #[test]
    fn malformed_ballot_is_not_kept() {
        let mut b = Builder::new(&ElectionParams::new(1, 0).unwrap())
            .candidates(&[Candidate::new("a", "A"), Candidate::new("b", "B")])
            .unwrap();
        let err = b.add_ballot(&s(&["a", "a"])).unwrap_err();
        assert_eq!(
            err,
            VotingErrors::MalformedBallot {
                defect: BallotDefect::Duplicate("a".to_string())
            }
        );
        assert!(b.ballots().is_empty());
        b.add_ballot(&s(&["b", "a"])).unwrap();
        assert_eq!(b.ballots().len(), 1);
    }

    #[test]
    fn new_candidate_drops_ballots() {
        let mut b = Builder::new(&ElectionParams::new(1, 0).unwrap())
            .candidates(&[Candidate::new("a", "A"), Candidate::new("b", "B")])
            .unwrap();
        b.add_ballot(&s(&["b", "a"])).unwrap();
        let b = b.candidate(Candidate::new("c", "C")).unwrap();
        assert!(b.ballots().is_empty());
    }

    #[test]
    fn only_symbolic_candidates() {
        let mut b = Builder::new(&ElectionParams::new(1, 0).unwrap())
            .candidate(Candidate::blank("blank"))
            .unwrap();
        assert_eq!(
            b.add_ballot(&s(&["blank"])),
            Err(VotingErrors::EmptyElection)
        );
        assert_eq!(b.stage_count(), Err(VotingErrors::EmptyElection));
    }

    #[test]
    fn stage_count_through_builder() {
        let mut b = Builder::new(&ElectionParams::new(1, 0).unwrap())
            .candidates(&[Candidate::new("a", "A"), Candidate::new("b", "B")])
            .unwrap();
        b.add_ballot(&s(&["b", "a"])).unwrap();
        b.add_ballot(&s(&["b", "a"])).unwrap();
        b.add_ballot(&s(&["a", "b"])).unwrap();
        let res = b.stage_count().unwrap();
        assert_eq!(res.winner, Some("b".to_string()));
    }
}
