use log::{debug, info};

use crate::config::*;
use crate::preference::{index_ballots, IndexedBallot};
use crate::{CandidateIdx, Election};

/// Each ballot goes to its highest ranked candidate that is still running.
fn compute_tally(ballots: &[IndexedBallot], eliminated: &[bool]) -> Vec<u64> {
    let mut tally = vec![0; eliminated.len()];
    for b in ballots.iter() {
        if let Some(cid) = b.0.iter().find(|cid| !eliminated[cid.0]) {
            tally[cid.0] += 1;
        }
    }
    tally
}

// Blank and vacant candidates are never eliminated. Among the tied last
// candidates, the one registered last goes first.
fn find_eliminated_candidate(
    tally: &[u64],
    eliminated: &[bool],
    election: &Election,
) -> Option<CandidateIdx> {
    let running: Vec<CandidateIdx> = (0..tally.len())
        .map(CandidateIdx)
        .filter(|cid| !eliminated[cid.0] && election.at(*cid).kind == CandidateKind::Regular)
        .collect();
    let min_count = running.iter().map(|cid| tally[cid.0]).min()?;
    let all_smallest: Vec<CandidateIdx> = running
        .iter()
        .filter(|cid| tally[cid.0] == min_count)
        .cloned()
        .collect();
    if all_smallest.len() > 1 {
        debug!(
            "find_eliminated_candidate: tie at {} votes between {:?}",
            min_count, all_smallest
        );
    }
    all_smallest.last().cloned()
}

/// Runs the round-based count ("alternativsomröstning").
///
/// Every stage gives each ballot to its highest ranked candidate still
/// running. Ballots resting on the blank candidate are reported separately and
/// do not count towards the majority. The count ends as soon as a candidate
/// holds a strict majority of the remaining ballots; otherwise the regular
/// candidate with the fewest ballots is eliminated and the next stage starts.
/// The count also ends, without a winner, when nobody can be eliminated or no
/// ballot counts towards the majority.
pub fn run_stage_count(
    election: &Election,
    ballots: &[Ballot],
) -> Result<StageCountResult, VotingErrors> {
    info!(
        "run_stage_count: {:?} ballots, {:?} candidates",
        ballots.len(),
        election.len()
    );
    let indexed = index_ballots(election, ballots)?;
    let mut eliminated = vec![false; election.len()];
    let mut stages: Vec<StageStats> = Vec::new();

    // Every stage but the last eliminates one candidate.
    while stages.len() <= election.len() {
        let stage_id = (stages.len() + 1) as u32;
        let tally = compute_tally(&indexed, &eliminated);
        debug!("run_stage_count: stage {}: tally {:?}", stage_id, tally);

        let mut blanks: u64 = 0;
        let mut total: u64 = 0;
        let mut running: Vec<(CandidateIdx, u64)> = Vec::new();
        for (idx, &count) in tally.iter().enumerate() {
            let cid = CandidateIdx(idx);
            if eliminated[idx] {
                continue;
            }
            if election.at(cid).kind == CandidateKind::Blank {
                blanks += count;
            } else {
                total += count;
                running.push((cid, count));
            }
        }
        // Stable: equal counts stay in registration order.
        running.sort_by(|a, b| b.1.cmp(&a.1));

        let leader = running.first().cloned();
        let has_majority = matches!(leader, Some((_, count)) if total > 0 && count * 2 > total);
        let to_eliminate = if has_majority || total == 0 {
            None
        } else {
            find_eliminated_candidate(&tally, &eliminated, election)
        };

        stages.push(StageStats {
            stage: stage_id,
            blanks,
            total,
            candidates: running
                .iter()
                .map(|(cid, count)| StageCandidate {
                    id: election.at(*cid).id.clone(),
                    votes: *count,
                    eliminated: Some(*cid) == to_eliminate,
                })
                .collect(),
        });

        if has_majority {
            let winner = leader.map(|(cid, _)| election.at(cid).id.clone());
            info!("run_stage_count: stage {}: winner {:?}", stage_id, winner);
            return Ok(StageCountResult { winner, stages });
        }
        match to_eliminate {
            Some(cid) => {
                debug!(
                    "run_stage_count: stage {}: eliminating {:?}",
                    stage_id,
                    election.at(cid).id
                );
                eliminated[cid.0] = true;
            }
            None => break,
        }
    }

    info!("run_stage_count: no candidate reached a majority");
    Ok(StageCountResult {
        winner: None,
        stages,
    })
}
