use log::debug;
use std::cmp::Ordering;

use crate::config::*;
use crate::{CandidateIdx, Election};

/// x is ranked above y when its strongest path to y is stronger than the way back.
fn beats(p: &Matrix, x: CandidateIdx, y: CandidateIdx) -> bool {
    p.get(x.0, y.0) > p.get(y.0, x.0)
}

// Less means "better placed".
fn tiebreak_order(
    a: CandidateIdx,
    b: CandidateIdx,
    first_preferences: &[u64],
    election: &Election,
    mode: TieBreakMode,
) -> Ordering {
    match mode {
        TieBreakMode::FirstPreferencesThenId => first_preferences[b.0]
            .cmp(&first_preferences[a.0])
            .then_with(|| election.at(a).id.cmp(&election.at(b).id)),
        TieBreakMode::UseCandidateOrder => a.cmp(&b),
    }
}

/// Orders all the candidates, best first.
///
/// The Schulze relation only orders some pairs. The order is built one
/// position at a time: among the remaining candidates that nobody remaining
/// beats, the best one under the tiebreak rule takes the next position. The
/// relation is a strict partial order, so such a candidate always exists and
/// the result extends it.
pub(crate) fn rank(
    p: &Matrix,
    first_preferences: &[u64],
    election: &Election,
    mode: TieBreakMode,
) -> Vec<CandidateIdx> {
    let mut remaining: Vec<CandidateIdx> = (0..election.len()).map(CandidateIdx).collect();
    let mut res: Vec<CandidateIdx> = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let unbeaten: Vec<CandidateIdx> = remaining
            .iter()
            .filter(|&&x| !remaining.iter().any(|&y| beats(p, y, x)))
            .cloned()
            .collect();
        // Only empty when `p` is not a strongest-path matrix.
        let pool = if unbeaten.is_empty() {
            remaining.clone()
        } else {
            unbeaten
        };
        if pool.len() > 1 {
            debug!(
                "rank: position {}: tiebreak between {:?}",
                res.len(),
                pool.iter().map(|c| &election.at(*c).id).collect::<Vec<_>>()
            );
        }
        let next = pool
            .iter()
            .cloned()
            .min_by(|a, b| tiebreak_order(*a, *b, first_preferences, election, mode));
        match next {
            Some(next) => {
                remaining.retain(|c| *c != next);
                res.push(next);
            }
            None => break,
        }
    }
    res
}

/// Orders the candidates of an election from a strongest-path matrix.
///
/// `first_preferences` gives, in registration order, the number of ballots
/// ranking each candidate first. It is only looked at to break ties.
pub fn rank_candidates(
    election: &Election,
    p: &Matrix,
    first_preferences: &[u64],
    mode: TieBreakMode,
) -> Vec<String> {
    rank(p, first_preferences, election, mode)
        .iter()
        .map(|idx| election.at(*idx).id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ballots, election};
    use crate::{build_preference_matrix, strongest_paths};

    fn count(e: &Election, rankings: &[&str], mode: TieBreakMode) -> Vec<String> {
        let bs = ballots(e, rankings);
        let p = strongest_paths(&build_preference_matrix(e, &bs).unwrap());
        let mut firsts = vec![0; e.len()];
        for b in bs.iter() {
            let idx = e.index_of(&b.ranking()[0]).unwrap();
            firsts[idx.0] += 1;
        }
        rank_candidates(e, &p, &firsts, mode)
    }

    #[test]
    fn follows_strongest_paths() {
        let e = election(&["c", "b", "a"]);
        let r = count(
            &e,
            &["a>b>c", "a>b>c", "b>c>a"],
            TieBreakMode::FirstPreferencesThenId,
        );
        assert_eq!(r, vec!["a", "b", "c"]);
    }

    #[test]
    fn cycle_uses_first_preferences_then_id() {
        let e = election(&["c", "b", "a"]);
        let r = count(
            &e,
            &["a>b>c", "b>c>a", "c>a>b"],
            TieBreakMode::FirstPreferencesThenId,
        );
        assert_eq!(r, vec!["a", "b", "c"]);
    }

    #[test]
    fn first_preferences_win_over_id() {
        // Every pair is tied 2-2, c has two first places.
        let e = election(&["a", "b", "c"]);
        let r = count(
            &e,
            &["a>b>c", "b>a>c", "c>a>b", "c>b>a"],
            TieBreakMode::FirstPreferencesThenId,
        );
        assert_eq!(r, vec!["c", "a", "b"]);
    }

    #[test]
    fn cycle_with_candidate_order() {
        let e = election(&["c", "b", "a"]);
        let r = count(
            &e,
            &["a>b>c", "b>c>a", "c>a>b"],
            TieBreakMode::UseCandidateOrder,
        );
        assert_eq!(r, vec!["c", "b", "a"]);
    }

    #[test]
    fn wikipedia_example_order() {
        let e = election(&["a", "b", "c", "d", "e"]);
        let mut rankings: Vec<&str> = Vec::new();
        rankings.extend(std::iter::repeat("a>c>b>e>d").take(5));
        rankings.extend(std::iter::repeat("a>d>e>c>b").take(5));
        rankings.extend(std::iter::repeat("b>e>d>a>c").take(8));
        rankings.extend(std::iter::repeat("c>a>b>e>d").take(3));
        rankings.extend(std::iter::repeat("c>a>e>b>d").take(7));
        rankings.extend(std::iter::repeat("c>b>a>d>e").take(2));
        rankings.extend(std::iter::repeat("d>c>e>b>a").take(7));
        rankings.extend(std::iter::repeat("e>b>a>d>c").take(8));
        let r = count(&e, &rankings, TieBreakMode::FirstPreferencesThenId);
        assert_eq!(r, vec!["e", "a", "c", "b", "d"]);
    }

    #[test]
    fn tiebreak_never_overrides_a_defeat() {
        // b beats a 4-3, although a has more first places and a smaller id.
        let e = election(&["a", "b", "c"]);
        let r = count(
            &e,
            &[
                "a>b>c", "a>b>c", "a>b>c", "b>a>c", "b>a>c", "c>b>a", "c>b>a",
            ],
            TieBreakMode::FirstPreferencesThenId,
        );
        assert_eq!(r, vec!["b", "a", "c"]);
    }
}
