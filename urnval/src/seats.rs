use log::debug;

use crate::config::*;

/// Splits a ranking into primary seats, extra seats and the rest.
///
/// Nobody ranked at or below the first symbolic candidate gets a seat, even
/// if seats remain: the electorate prefers an empty seat to them. When a
/// symbolic candidate comes first, no seat is filled at all.
///
/// The bands are contiguous and keep the ranking order:
/// * primary: positions `[0, min(mandates, first_symbolic))`
/// * secondary: positions `[mandates, min(mandates + extra_mandates, first_symbolic))`
/// * not elected: everything from `min(mandates + extra_mandates, first_symbolic)` on
pub fn allocate_seats(ranking: &[&Candidate], params: &ElectionParams) -> SeatAssignment {
    let n = ranking.len();
    let first_symbolic = ranking
        .iter()
        .position(|c| c.is_symbolic())
        .unwrap_or(n);
    let mandates = params.mandates();
    let seats_end = (mandates + params.extra_mandates()).min(first_symbolic).min(n);
    let primary_end = mandates.min(seats_end);
    debug!(
        "allocate_seats: first_symbolic: {}, primary: [0, {}), secondary: [{}, {})",
        first_symbolic, primary_end, primary_end, seats_end
    );

    let ids = |range: &[&Candidate]| -> Vec<String> { range.iter().map(|c| c.id.clone()).collect() };
    SeatAssignment {
        primary: ids(&ranking[..primary_end]),
        secondary: ids(&ranking[primary_end..seats_end]),
        not_elected: ids(&ranking[seats_end..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocate(ranking: &[&str], mandates: i64, extra: i64) -> SeatAssignment {
        let candidates: Vec<Candidate> = ranking
            .iter()
            .map(|id| match *id {
                "blank" => Candidate::blank(id),
                "vacant" => Candidate::vacant(id),
                _ => Candidate::new(id, id),
            })
            .collect();
        let refs: Vec<&Candidate> = candidates.iter().collect();
        allocate_seats(&refs, &ElectionParams::new(mandates, extra).unwrap())
    }

    fn v(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_symbolic_candidate() {
        let s = allocate(&["a", "b", "c", "d"], 2, 1);
        assert_eq!(s.primary, v(&["a", "b"]));
        assert_eq!(s.secondary, v(&["c"]));
        assert_eq!(s.not_elected, v(&["d"]));
    }

    #[test]
    fn symbolic_first_fills_nothing() {
        let s = allocate(&["vacant", "a", "b"], 2, 0);
        assert!(s.primary.is_empty());
        assert!(s.secondary.is_empty());
        assert_eq!(s.not_elected, v(&["vacant", "a", "b"]));
    }

    #[test]
    fn symbolic_inside_primary_band() {
        let s = allocate(&["a", "blank", "b", "c"], 3, 1);
        assert_eq!(s.primary, v(&["a"]));
        assert!(s.secondary.is_empty());
        assert_eq!(s.not_elected, v(&["blank", "b", "c"]));
    }

    #[test]
    fn symbolic_inside_secondary_band() {
        let s = allocate(&["a", "b", "c", "vacant", "d", "blank"], 2, 3);
        assert_eq!(s.primary, v(&["a", "b"]));
        assert_eq!(s.secondary, v(&["c"]));
        assert_eq!(s.not_elected, v(&["vacant", "d", "blank"]));
    }

    #[test]
    fn symbolic_right_after_primary_band() {
        let s = allocate(&["a", "vacant", "b"], 1, 1);
        assert_eq!(s.primary, v(&["a"]));
        assert!(s.secondary.is_empty());
        assert_eq!(s.not_elected, v(&["vacant", "b"]));
    }

    #[test]
    fn more_seats_than_candidates() {
        let s = allocate(&["a", "b"], 3, 2);
        assert_eq!(s.primary, v(&["a", "b"]));
        assert!(s.secondary.is_empty());
        assert!(s.not_elected.is_empty());
    }

    #[test]
    fn extra_mandates_fill_remaining_ranks() {
        let s = allocate(&["a", "b"], 1, 1);
        assert_eq!(s.primary, v(&["a"]));
        assert_eq!(s.secondary, v(&["b"]));
        assert!(s.not_elected.is_empty());
    }
}
