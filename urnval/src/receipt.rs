/*!
Digests that let a voting service keep one ballot per voter, and let voters
check their ballot, without storing who voted for what.

Both functions return lowercase hexadecimal SHA-256 digests.
*/

use sha256::digest;

use crate::config::Ballot;

/// Identifies the ballot slot of a voter in an election.
///
/// Submitting again under the same slot replaces the previous ballot.
pub fn voter_slot_digest(election_id: &str, voter: &str) -> String {
    let text = format!("{}:{}", election_id, voter);
    digest(text.as_str())
}

/// A receipt for one ballot: `<voter>_<secret>_<election>` followed by
/// `_<rank>:<candidate>` for every position of the ranking.
///
/// The secret is only known to the voter, so nobody else can recompute it.
pub fn ballot_receipt(voter: &str, secret: &str, election_id: &str, ballot: &Ballot) -> String {
    let mut text = format!("{}_{}_{}", voter, secret, election_id);
    for (rank, candidate) in ballot.ranking().iter().enumerate() {
        text.push_str(&format!("_{}:{}", rank, candidate));
    }
    digest(text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ballots, election};

    #[test]
    fn slot_digest_is_stable_and_scoped() {
        let d1 = voter_slot_digest("e1", "anna@example.com");
        assert_eq!(d1, voter_slot_digest("e1", "anna@example.com"));
        assert_ne!(d1, voter_slot_digest("e2", "anna@example.com"));
        assert_eq!(d1.len(), 64);
        assert!(d1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn empty_input_digest() {
        // SHA-256 of ":".
        assert_eq!(
            voter_slot_digest("", ""),
            "e7ac0786668e0ff0f02b62bd04f45ff636fd82db63b1104601c975dc005f3a67"
        );
    }

    #[test]
    fn receipt_depends_on_order_and_secret() {
        let e = election(&["a", "b"]);
        let bs = ballots(&e, &["a>b", "b>a"]);
        let r1 = ballot_receipt("anna", "s3cret", "test", &bs[0]);
        assert_eq!(r1, ballot_receipt("anna", "s3cret", "test", &bs[0]));
        assert_ne!(r1, ballot_receipt("anna", "s3cret", "test", &bs[1]));
        assert_ne!(r1, ballot_receipt("anna", "other", "test", &bs[0]));
    }
}
