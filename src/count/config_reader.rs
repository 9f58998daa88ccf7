use crate::count::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionSettings {
    pub id: String,
    pub name: Option<String>,
    // Signed, so that negative values reach the parameter check of the engine.
    pub mandates: i64,
    #[serde(rename = "extraMandates")]
    pub extra_mandates: Option<i64>,
    pub finalized: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConfigCandidate {
    pub id: String,
    pub name: Option<String>,
    pub symbolic: Option<bool>,
}

impl ConfigCandidate {
    /// A symbolic candidate named "Blank" stands for a blank vote, any other
    /// symbolic candidate for a vacant seat.
    pub fn to_candidate(&self) -> Candidate {
        let name = self.name.clone().unwrap_or_else(|| self.id.clone());
        let kind = match self.symbolic {
            Some(true) if name.eq_ignore_ascii_case("blank") => CandidateKind::Blank,
            Some(true) => CandidateKind::Vacant,
            _ => CandidateKind::Regular,
        };
        Candidate {
            id: self.id.clone(),
            name,
            kind,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConfigBallot {
    pub id: Option<String>,
    pub ranking: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BallotSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstVoteColumnIndex")]
    _first_vote_column_index: Option<JSValue>,
    #[serde(rename = "firstVoteRowIndex")]
    _first_vote_row_index: Option<JSValue>,
    #[serde(rename = "idColumnIndex")]
    _id_column_index: Option<JSValue>,
}

impl BallotSource {
    /// A source for a file given on the command line, with the default layout.
    pub fn from_path(provider: &str, file_path: &str) -> BallotSource {
        BallotSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            _first_vote_column_index: None,
            _first_vote_row_index: None,
            _id_column_index: None,
        }
    }

    // The indices are 1-based in the configuration file, as in spreadsheets.

    /// 0-based column of the first choice (default: the first column).
    pub fn first_vote_column_index(&self) -> UrnvalResult<usize> {
        read_js_index(&self._first_vote_column_index)
    }

    /// 0-based row of the first ballot (default: the first row).
    pub fn first_vote_row_index(&self) -> UrnvalResult<usize> {
        read_js_index(&self._first_vote_row_index)
    }

    pub fn id_column_index(&self) -> UrnvalResult<Option<usize>> {
        match &self._id_column_index {
            None | Some(JSValue::Null) => Ok(None),
            x => read_js_int(x).map(|i| Some(i - 1)),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigRules {
    #[serde(rename = "countingMethod")]
    pub counting_method: Option<String>,
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
}

impl ConfigRules {
    pub fn count_rules(&self) -> UrnvalResult<CountRules> {
        let tiebreak_mode = match self.tiebreak_mode.as_deref() {
            None | Some("firstPreferencesThenId") => TieBreakMode::FirstPreferencesThenId,
            Some("useCandidateOrder") => TieBreakMode::UseCandidateOrder,
            Some(x) => whatever!("unknown tiebreak mode: {}", x),
        };
        Ok(CountRules { tiebreak_mode })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    pub election: ElectionSettings,
    pub candidates: Vec<ConfigCandidate>,
    #[serde(default)]
    pub ballots: Vec<ConfigBallot>,
    #[serde(rename = "ballotSources", default)]
    pub ballot_sources: Vec<BallotSource>,
    #[serde(default)]
    pub rules: ConfigRules,
}

pub fn read_config(path: &str) -> UrnvalResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ElectionConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

pub fn read_summary(path: &str) -> UrnvalResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: {} bytes from {:?}", contents.len(), path);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> UrnvalResult<usize> {
    let res = match x {
        Some(JSValue::Number(n)) => n.as_u64().map(|x| x as usize),
        Some(JSValue::String(s)) => s.parse::<usize>().ok(),
        _ => None,
    };
    match res {
        Some(i) if i >= 1 => Ok(i),
        _ => ParsingJsonNumberSnafu { value: x.clone() }.fail(),
    }
}

fn read_js_index(x: &Option<JSValue>) -> UrnvalResult<usize> {
    match x {
        None | Some(JSValue::Null) => Ok(0),
        _ => read_js_int(x).map(|i| i - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_candidates() {
        let js = r#"[
            {"id": "a", "name": "Alice"},
            {"id": "b", "name": "BLANK", "symbolic": true},
            {"id": "v", "name": "Vakant", "symbolic": true},
            {"id": "c", "symbolic": false}
        ]"#;
        let cands: Vec<ConfigCandidate> = serde_json::from_str(js).unwrap();
        let kinds: Vec<CandidateKind> = cands.iter().map(|c| c.to_candidate().kind).collect();
        assert_eq!(
            kinds,
            vec![
                CandidateKind::Regular,
                CandidateKind::Blank,
                CandidateKind::Vacant,
                CandidateKind::Regular
            ]
        );
        assert_eq!(cands[3].to_candidate().name, "c");
    }

    #[test]
    fn source_indices() {
        let js = r#"{"provider": "csv", "filePath": "b.csv",
            "firstVoteColumnIndex": 2, "firstVoteRowIndex": "3", "idColumnIndex": 1}"#;
        let src: BallotSource = serde_json::from_str(js).unwrap();
        assert_eq!(src.first_vote_column_index().unwrap(), 1);
        assert_eq!(src.first_vote_row_index().unwrap(), 2);
        assert_eq!(src.id_column_index().unwrap(), Some(0));

        let src = BallotSource::from_path("csv", "b.csv");
        assert_eq!(src.first_vote_column_index().unwrap(), 0);
        assert_eq!(src.id_column_index().unwrap(), None);
    }

    #[test]
    fn zero_index_is_rejected() {
        let js = r#"{"provider": "csv", "filePath": "b.csv", "firstVoteColumnIndex": 0}"#;
        let src: BallotSource = serde_json::from_str(js).unwrap();
        assert!(src.first_vote_column_index().is_err());
    }

    #[test]
    fn rules() {
        let rules = ConfigRules::default().count_rules().unwrap();
        assert_eq!(rules, CountRules::DEFAULT_RULES);
        let rules = ConfigRules {
            counting_method: None,
            tiebreak_mode: Some("useCandidateOrder".to_string()),
        };
        assert_eq!(
            rules.count_rules().unwrap().tiebreak_mode,
            TieBreakMode::UseCandidateOrder
        );
        let rules = ConfigRules {
            counting_method: None,
            tiebreak_mode: Some("random".to_string()),
        };
        assert!(rules.count_rules().is_err());
    }
}
