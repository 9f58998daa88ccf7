use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use urnval::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::count::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_json;

#[derive(Debug, Snafu)]
pub enum CountError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Expected a positive integer, found {value:?}"))]
    ParsingJsonNumber { value: Option<JSValue> },
    #[snafu(display("Error opening the CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of a CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno} of a CSV file has not enough columns"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Election {election} is not finalized, refusing to count it"))]
    NotFinalized { election: String },
    #[snafu(display("Invalid election description"))]
    InvalidElection { source: VotingErrors },
    #[snafu(display("The count could not complete"))]
    Counting { source: VotingErrors },
    #[snafu(display("Error serializing the summary"))]
    SerializingSummary { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the summary and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type UrnvalResult<T> = Result<T, CountError>;

/// A ballot, as read from a source.
/// It has not been checked against the candidates yet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: String,
    pub ranking: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum CountingMethod {
    Schulze,
    StageCount,
}

fn counting_method(args: &Args, rules: &ConfigRules) -> UrnvalResult<CountingMethod> {
    let name = args
        .method
        .clone()
        .or_else(|| rules.counting_method.clone())
        .unwrap_or_else(|| "schulze".to_string());
    match name.as_str() {
        "schulze" => Ok(CountingMethod::Schulze),
        "irv" => Ok(CountingMethod::StageCount),
        x => whatever!("unknown counting method: {}", x),
    }
}

fn build_election(config: &ElectionConfig) -> UrnvalResult<(Election, ElectionParams)> {
    let candidates: Vec<Candidate> = config
        .candidates
        .iter()
        .map(|c| c.to_candidate())
        .collect();
    let election = Election::new(&config.election.id, &candidates).context(InvalidElectionSnafu)?;
    let params = ElectionParams::new(
        config.election.mandates,
        config.election.extra_mandates.unwrap_or(0),
    )
    .context(InvalidElectionSnafu)?;
    Ok((election, params))
}

fn read_ballot_source(root_path: &Path, cfs: &BallotSource) -> UrnvalResult<Vec<ParsedBallot>> {
    let p: PathBuf = root_path.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read ballot file {:?}", p2);
    match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_ballots(&p2, cfs),
        "json" => io_json::read_json_ballots(&p2),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

fn read_ballots(
    config: &ElectionConfig,
    config_path: &Path,
    args: &Args,
) -> UrnvalResult<Vec<ParsedBallot>> {
    // A file given on the command line replaces everything in the configuration.
    if let Some(input) = &args.input {
        let provider = args.input_type.clone().unwrap_or_else(|| "csv".to_string());
        let source = BallotSource::from_path(&provider, input);
        return read_ballot_source(Path::new(""), &source);
    }

    let mut res: Vec<ParsedBallot> = config
        .ballots
        .iter()
        .enumerate()
        .map(|(idx, b)| ParsedBallot {
            id: b.id.clone().unwrap_or_else(|| format!("inline-{:08}", idx + 1)),
            ranking: b.ranking.clone(),
        })
        .collect();
    let root_p = config_path.parent().unwrap_or_else(|| Path::new(""));
    for cfs in config.ballot_sources.iter() {
        let mut file_data = read_ballot_source(root_p, cfs)?;
        res.append(&mut file_data);
    }
    if res.is_empty() {
        warn!("No ballots found for election {:?}", config.election.id);
    }
    Ok(res)
}

/// Keeps the ballots that rank every candidate exactly once.
/// Returns them with the number of rejected ballots.
fn accept_ballots(election: &Election, parsed: &[ParsedBallot]) -> (Vec<Ballot>, u64) {
    let mut res: Vec<Ballot> = Vec::new();
    let mut rejected: u64 = 0;
    for pb in parsed.iter() {
        match normalize_ballot(election, election.id(), &pb.ranking) {
            Ok(b) => res.push(b),
            Err(e) => {
                warn!("Rejecting ballot {}: {}", pb.id, e);
                rejected += 1;
            }
        }
    }
    (res, rejected)
}

fn config_js(config: &ElectionConfig) -> JSValue {
    json!({
        "id": config.election.id,
        "name": config.election.name,
        "mandates": config.election.mandates,
        "extraMandates": config.election.extra_mandates.unwrap_or(0),
    })
}

fn candidate_js(c: &Candidate) -> JSValue {
    json!({"id": c.id, "name": c.name, "symbolic": c.is_symbolic()})
}

/// The matrices are given twice: in ranking order for display, and in
/// registration order under `matrices`.
fn schulze_summary_js(
    config: &ElectionConfig,
    election: &Election,
    res: &CountResult,
    rejected: u64,
) -> JSValue {
    let order = res.ranking_indices();
    let ranking: Vec<JSValue> = order
        .iter()
        .map(|idx| candidate_js(&election.candidates()[*idx]))
        .collect();
    json!({
        "config": config_js(config),
        "method": "schulze",
        "ranking": ranking,
        "totalVotes": res.total_votes,
        "rejectedBallots": rejected,
        "voteMatrix": res.preference_matrix.permuted(&order),
        "schulzeMatrix": res.strongest_path_matrix.permuted(&order),
        "seats": {
            "primary": res.seat_assignment.primary,
            "secondary": res.seat_assignment.secondary,
            "notElected": res.seat_assignment.not_elected,
        },
        "matrices": {
            "candidates": res.candidate_order,
            "firstPreferences": res.first_preferences,
            "preferences": res.preference_matrix.rows(),
            "strongestPaths": res.strongest_path_matrix.rows(),
        },
    })
}

fn stage_summary_js(
    config: &ElectionConfig,
    res: &StageCountResult,
    total_votes: usize,
    rejected: u64,
) -> JSValue {
    let stages: Vec<JSValue> = res
        .stages
        .iter()
        .map(|s| {
            let candidates: Vec<JSValue> = s
                .candidates
                .iter()
                .map(|c| json!({"id": c.id, "votes": c.votes, "eliminated": c.eliminated}))
                .collect();
            json!({"stage": s.stage, "blanks": s.blanks, "total": s.total, "candidates": candidates})
        })
        .collect();
    json!({
        "config": config_js(config),
        "method": "irv",
        "totalVotes": total_votes,
        "rejectedBallots": rejected,
        "winner": res.winner,
        "stages": stages,
    })
}

fn write_summary(out: &Option<String>, pretty_js: &str) -> UrnvalResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty_js);
            Ok(())
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingSummarySnafu { path })
        }
    }
}

fn check_reference(path: &str, pretty_js_stats: &str) -> UrnvalResult<()> {
    let summary_ref = read_summary(path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(SerializingSummarySnafu)?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu { path }.fail();
    }
    info!("The summary matches the reference {:?}", path);
    Ok(())
}

/// Counts the election described by the arguments and returns its summary.
pub fn count_summary(args: &Args) -> UrnvalResult<JSValue> {
    let config = read_config(&args.config)?;
    debug!("config: {:?}", config);

    if !config.election.finalized.unwrap_or(true) {
        return NotFinalizedSnafu {
            election: config.election.id.clone(),
        }
        .fail();
    }

    let method = counting_method(args, &config.rules)?;
    let rules = config.rules.count_rules()?;
    let (election, params) = build_election(&config)?;

    let parsed = read_ballots(&config, Path::new(args.config.as_str()), args)?;
    let (ballots, rejected) = accept_ballots(&election, &parsed);
    info!(
        "Election {:?}: {} ballots accepted, {} rejected",
        election.id(),
        ballots.len(),
        rejected
    );

    let summary = match method {
        CountingMethod::Schulze => {
            let res = count_election(&election, &ballots, &params, &rules)
                .context(CountingSnafu)?;
            schulze_summary_js(&config, &election, &res, rejected)
        }
        CountingMethod::StageCount => {
            let res = run_stage_count(&election, &ballots).context(CountingSnafu)?;
            stage_summary_js(&config, &res, ballots.len(), rejected)
        }
    };
    Ok(summary)
}

pub fn run_count(args: &Args) -> UrnvalResult<()> {
    let summary = count_summary(args)?;
    let pretty_js_stats = serde_json::to_string_pretty(&summary).context(SerializingSummarySnafu)?;
    write_summary(&args.out, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        check_reference(summary_p, &pretty_js_stats)?;
    }
    Ok(())
}
