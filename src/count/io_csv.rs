// Primitives for reading CSV files.

use std::fs::File;

use crate::count::config_reader::BallotSource;
use crate::count::io_common::make_default_id;
use crate::count::*;

/// Reads one ballot per line. Every cell from the first vote column on holds
/// a candidate id, most preferred first. Empty cells are ignored.
///
/// ```text
/// id,choice 1,choice 2,choice 3
/// id1,a,b,c
/// id2,b,c,a
/// ```
pub fn read_csv_ballots(path: &str, cfs: &BallotSource) -> UrnvalResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(path);

    let id_idx_o = cfs.id_column_index()?;
    let choices_start_col = cfs.first_vote_column_index()?;

    let mut res: Vec<ParsedBallot> = Vec::new();
    let (records, row_offset) = get_records(path, cfs)?;

    for (idx, line_r) in records.enumerate() {
        let lineno = idx + row_offset + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let id = if let Some(id_idx) = id_idx_o {
            line.get(id_idx)
                .context(CsvLineTooShortSnafu { lineno })?
                .to_string()
        } else {
            default_id(lineno)
        };
        if line.len() <= choices_start_col {
            return CsvLineTooShortSnafu { lineno }.fail();
        }

        let ranking: Vec<String> = line
            .iter()
            .skip(choices_start_col)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();
        debug!(
            "read_csv_ballots: lineno: {:?} ranking: {:?}",
            lineno, &ranking
        );
        res.push(ParsedBallot { id, ranking });
    }
    Ok(res)
}

fn get_records(
    path: &str,
    cfs: &BallotSource,
) -> UrnvalResult<(csv::StringRecordsIntoIter<File>, usize)> {
    let first_row = cfs.first_vote_row_index()?;
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();
    for _ in 0..first_row {
        _ = records.next();
    }
    Ok((records, first_row))
}
