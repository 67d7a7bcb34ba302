use std::fs;
use std::path::PathBuf;

use ligue1_table::fixtures::{FixtureStatus, Score, load_fixtures, parse_fixtures_json};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn parses_sample_fixture_file() {
    let rows = load_fixtures(&fixture_path("ligue1_sample.json")).expect("fixture should parse");
    // The entry without a week is dropped.
    assert_eq!(rows.len(), 5);

    assert_eq!(rows[0].id, "5001");
    assert_eq!(rows[0].week, 1);
    assert_eq!(rows[0].status, FixtureStatus::Finished);
    assert_eq!(rows[0].home_team, "Paris Saint-Germain FC");
    assert_eq!(rows[0].score, Some(Score::new(2, 1)));

    assert_eq!(rows[2].id, "5003");
    assert_eq!(rows[2].score, None);
    let prediction = rows[2].prediction.as_ref().expect("prediction should parse");
    assert_eq!(prediction.score.as_deref(), Some("1-1"));
    assert_eq!(prediction.goals_pred.as_deref(), Some("-2.5"));

    assert_eq!(rows[3].status, FixtureStatus::Other);
    assert_eq!(rows[4].home_team, "Paris FC");
    assert!(rows[4].prediction.as_ref().is_some_and(|p| p.score.is_none()));
}

#[test]
fn accepts_plain_arrays_and_synthesizes_ids() {
    let raw = r#"[
        {"homeTeam": "Lens", "awayTeam": "Lille", "week": "4", "status": "finished",
         "score": {"home": 3, "away": 2}}
    ]"#;
    let rows = parse_fixtures_json(raw).expect("array should parse");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "Lens|Lille|4");
    assert_eq!(rows[0].week, 4);
    assert_eq!(rows[0].final_score(), Some(Score::new(3, 2)));
}

#[test]
fn null_and_empty_are_empty() {
    assert!(parse_fixtures_json("null").expect("null should parse").is_empty());
    assert!(parse_fixtures_json("  ").expect("blank should parse").is_empty());
}

#[test]
fn bad_json_is_an_error() {
    assert!(parse_fixtures_json("{not json").is_err());
    assert!(parse_fixtures_json(r#"{"teams": []}"#).is_err());
    assert!(load_fixtures(&fixture_path("does_not_exist.json")).is_err());
}

#[test]
fn sample_file_is_valid_json() {
    let raw = fs::read_to_string(fixture_path("ligue1_sample.json")).expect("readable");
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}

#[test]
fn oversized_week_drops_the_row() {
    let raw = r#"[
        {"homeTeam": "Lens", "awayTeam": "Lille", "week": 4294967297, "status": "FINISHED",
         "score": {"home": 1, "away": 0}},
        {"homeTeam": "Lens", "awayTeam": "Nice", "week": "4294967296", "status": "FINISHED",
         "score": {"home": 1, "away": 0}},
        {"homeTeam": "Nice", "awayTeam": "Lille", "week": 1, "status": "FINISHED",
         "score": {"home": 0, "away": 0}}
    ]"#;
    let rows = parse_fixtures_json(raw).expect("array should parse");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].home_team, "Nice");
    assert_eq!(rows[0].week, 1);
}
