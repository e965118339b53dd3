#[cfg(test)]
mod tests {
    use crate::error::{ErrorCode, ErrorResponse};
    use crate::models::{HealthStatus, OptionTally, RoundId};
    use crate::tally::{is_ranked, rank, RoundTally, TallyError};
    use crate::validation::RoundIdError;

    fn tally(options: &[(&str, &str)], votes: &[&str]) -> RoundTally {
        let mut t = RoundTally::new();
        options.iter().for_each(|(id, label)| t.add_option(*id, *label).unwrap());
        votes.iter().for_each(|id| t.record_vote(id).unwrap());
        t
    }

    fn labels(rows: &[OptionTally]) -> Vec<&str> {
        rows.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn test_worked_example() {
        let t = tally(&[("a", "A"), ("b", "B"), ("c", "C")], &["a", "c", "a"]);
        let rows = t.into_ranked();
        assert_eq!(labels(&rows), vec!["A", "C", "B"]);
        assert_eq!(rows.iter().map(|r| r.votes).collect::<Vec<_>>(), vec![2, 1, 0]);
    }

    #[test]
    fn test_zero_votes_still_listed() {
        let t = tally(&[("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")], &[]);
        let rows = t.into_ranked();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.votes == 0));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let t = tally(&[("x", "X"), ("y", "Y"), ("z", "Z")], &["z", "y"]);
        assert_eq!(labels(&t.into_ranked()), vec!["Y", "Z", "X"]);
    }

    #[test]
    fn test_empty_round() {
        let t = RoundTally::new();
        assert!(t.is_empty());
        assert!(t.into_ranked().is_empty());
    }

    #[test]
    fn test_counts_match_votes() {
        let votes = ["a", "b", "a", "a", "c", "b"];
        let t = tally(&[("a", "A"), ("b", "B"), ("c", "C")], &votes);
        assert_eq!(t.total_votes(), votes.len() as i64);
        for row in t.into_ranked() {
            let expected = votes.iter().filter(|v| **v == row.option_id).count() as i64;
            assert_eq!(row.votes, expected);
            assert!(row.votes >= 0);
        }
    }

    #[test]
    fn test_duplicate_and_unknown_options() {
        let mut t = tally(&[("a", "A")], &[]);
        assert_eq!(t.add_option("a", "again"), Err(TallyError::DuplicateOption("a".into())));
        assert_eq!(t.record_vote("nope"), Err(TallyError::UnknownOption("nope".into())));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_rank_is_stable_and_descending() {
        let rows = rank(vec![
            OptionTally::new("1", "one", 1),
            OptionTally::new("2", "two", 3),
            OptionTally::new("3", "three", 1),
            OptionTally::new("4", "four", 0),
        ]);
        assert!(is_ranked(&rows));
        assert_eq!(labels(&rows), vec!["two", "one", "three", "four"]);
        assert!(!is_ranked(&[OptionTally::new("1", "a", 0), OptionTally::new("2", "b", 1)]));
    }

    #[test]
    fn test_round_id_validation() {
        assert!(RoundId::parse("r1").is_ok());
        assert!(RoundId::parse("7c9e6679-7425-40de-944b-e07fc1f90ae7").is_ok());
        assert_eq!(RoundId::parse(""), Err(RoundIdError::Empty));
        assert_eq!(RoundId::parse("a\u{0}"), Err(RoundIdError::ControlCharacter));
        assert_eq!(RoundId::parse("r1\nr2"), Err(RoundIdError::ControlCharacter));
        // Spaces, quotes and very long ids are just ids nobody has.
        assert!(RoundId::parse("a b").is_ok());
        assert!(RoundId::parse("r1' OR '1'='1").is_ok());
        assert!(RoundId::parse(&"x".repeat(1024)).is_ok());
        assert_eq!("r2".parse::<RoundId>().unwrap().as_str(), "r2");
    }

    #[test]
    fn test_wire_shapes() {
        let row = serde_json::to_value(OptionTally::new("o1", "A", 2)).unwrap();
        assert_eq!(row, serde_json::json!({ "option_id": "o1", "label": "A", "votes": 2 }));

        let health = serde_json::to_value(HealthStatus::ok()).unwrap();
        assert_eq!(health, serde_json::json!({ "ok": true }));

        let body = ErrorResponse::from(ErrorCode::SystemError);
        assert_eq!(body.status, 500);
        assert_eq!(body.error, "An internal server error occurred.");
    }
}
