use std::collections::HashSet;

use crate::config::*;
use crate::Election;

/// Checks one submitted ranking and turns it into a [Ballot].
///
/// The ranking must name every candidate of the election exactly once, in
/// order of preference. Nothing is coerced: a ranking with a missing, unknown
/// or repeated candidate is rejected as a whole.
///
/// Arguments:
/// * `election` the authoritative candidate set
/// * `election_id` the election the voter submitted the ranking for
/// * `ranking` candidate ids, most preferred first
pub fn normalize_ballot(
    election: &Election,
    election_id: &str,
    ranking: &[String],
) -> Result<Ballot, VotingErrors> {
    if election_id != election.id() {
        return Err(VotingErrors::UnknownElection(election_id.to_string()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for id in ranking.iter() {
        if election.index_of(id).is_none() {
            return Err(VotingErrors::MalformedBallot {
                defect: BallotDefect::Unknown(id.clone()),
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(VotingErrors::MalformedBallot {
                defect: BallotDefect::Duplicate(id.clone()),
            });
        }
    }

    // All the names are known and distinct, so only omissions remain.
    if let Some(missing) = election
        .candidates()
        .iter()
        .find(|c| !seen.contains(c.id.as_str()))
    {
        return Err(VotingErrors::MalformedBallot {
            defect: BallotDefect::Missing(missing.id.clone()),
        });
    }

    Ok(Ballot {
        ranking: ranking.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::election;

    fn ids(s: &[&str]) -> Vec<String> {
        s.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn accepts_permutation_and_keeps_order() {
        let e = election(&["a", "b", "blank"]);
        let b = normalize_ballot(&e, "test", &ids(&["blank", "b", "a"])).unwrap();
        assert_eq!(b.ranking(), ids(&["blank", "b", "a"]).as_slice());
    }

    #[test]
    fn rejects_missing_candidate() {
        let e = election(&["a", "b", "c"]);
        let res = normalize_ballot(&e, "test", &ids(&["a", "c"]));
        assert_eq!(
            res,
            Err(VotingErrors::MalformedBallot {
                defect: BallotDefect::Missing("b".to_string())
            })
        );
    }

    #[test]
    fn rejects_unknown_candidate() {
        let e = election(&["a", "b"]);
        let res = normalize_ballot(&e, "test", &ids(&["a", "b", "x"]));
        assert_eq!(
            res,
            Err(VotingErrors::MalformedBallot {
                defect: BallotDefect::Unknown("x".to_string())
            })
        );
    }

    #[test]
    fn rejects_duplicate_even_with_correct_length() {
        let e = election(&["a", "b", "c"]);
        let res = normalize_ballot(&e, "test", &ids(&["a", "b", "a"]));
        assert_eq!(
            res,
            Err(VotingErrors::MalformedBallot {
                defect: BallotDefect::Duplicate("a".to_string())
            })
        );
    }

    #[test]
    fn rejects_empty_ranking() {
        let e = election(&["a"]);
        assert!(matches!(
            normalize_ballot(&e, "test", &[]),
            Err(VotingErrors::MalformedBallot { .. })
        ));
    }

    #[test]
    fn rejects_other_election() {
        let e = election(&["a", "b"]);
        let res = normalize_ballot(&e, "other", &ids(&["a", "b"]));
        assert_eq!(res, Err(VotingErrors::UnknownElection("other".to_string())));
    }
}
