// Reader for ballots stored as JSON.

use crate::count::config_reader::ConfigBallot;
use crate::count::io_common::make_default_id;
use crate::count::*;

/// Reads a JSON array of `{"id": .., "ranking": [..]}` objects. The id is optional.
pub fn read_json_ballots(path: &str) -> UrnvalResult<Vec<ParsedBallot>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let entries: Vec<ConfigBallot> =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    let default_id = make_default_id(path);
    let res: Vec<ParsedBallot> = entries
        .into_iter()
        .enumerate()
        .map(|(idx, b)| ParsedBallot {
            id: b.id.unwrap_or_else(|| default_id(idx + 1)),
            ranking: b.ranking,
        })
        .collect();
    debug!("read_json_ballots: {} ballots from {:?}", res.len(), path);
    Ok(res)
}
