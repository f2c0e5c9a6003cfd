//! Integration test for the analysis views against a reference fixture
//!
//! Loads a small ball-by-ball CSV from tests/fixtures/input and compares
//! each view's output against hand-computed reference values. This exercises
//! the same load → filter → aggregate path the binaries use.

use cricklytics::pipeline::{
    batsman_swot, line_length_insights, render_blocks, shot_effectiveness, toss_impact,
    BatsmanSwotConfig, Block, LineLengthConfig, ShotEffectivenessConfig, TossImpactConfig,
    NO_DATA_NOTICE,
};
use cricklytics::Dataset;
use std::path::Path;

fn load_fixture() -> Dataset {
    Dataset::load(Path::new("tests/fixtures/input/deliveries_sample.csv"))
        .expect("Failed to load fixture dataset")
}

fn expect_table(block: &Block) -> &cricklytics::pipeline::Table {
    match block {
        Block::Table(table) => table,
        other => panic!("Expected a table block, got {:?}", other),
    }
}

fn expect_bars(block: &Block) -> &cricklytics::pipeline::BarSeries {
    match block {
        Block::Bars(series) => series,
        other => panic!("Expected a bar series block, got {:?}", other),
    }
}

#[test]
fn test_shot_effectiveness_reference() {
    let ds = load_fixture();
    let output = shot_effectiveness(
        &ds,
        &ShotEffectivenessConfig {
            ground: "Eden Gardens".to_string(),
            bowl_kinds: None,
            bowl_styles: None,
            bat_hands: None,
        },
    );

    // 12 Eden deliveries, 4 per shot type
    let avg = expect_bars(&output.blocks[0]);
    assert_eq!(
        avg.bars,
        vec![
            ("pull".to_string(), 3.50),
            ("cover drive".to_string(), 1.75),
            ("sweep".to_string(), 1.25),
        ]
    );

    // One dismissal per shot type
    let dismissals = expect_bars(&output.blocks[1]);
    assert!(dismissals.bars.iter().all(|(_, rate)| *rate == 25.00));

    // Secondary filter narrows to the pace deliveries only
    let pace_only = shot_effectiveness(
        &ds,
        &ShotEffectivenessConfig {
            ground: "Eden Gardens".to_string(),
            bowl_kinds: Some(vec!["pace".to_string()]),
            bowl_styles: None,
            bat_hands: None,
        },
    );
    let avg = expect_bars(&pace_only.blocks[0]);
    // pace: pull = (6+6)/2, cover drive = (4+0+1)/3, sweep = 0/1
    assert_eq!(
        avg.bars,
        vec![
            ("pull".to_string(), 6.00),
            ("cover drive".to_string(), 1.67),
            ("sweep".to_string(), 0.00),
        ]
    );
}

#[test]
fn test_line_length_reference() {
    let ds = load_fixture();
    let output = line_length_insights(
        &ds,
        &LineLengthConfig {
            grounds: Vec::new(),
            bowl_kinds: None,
            bowl_styles: None,
            bat_hands: None,
        },
    );

    let table = expect_table(&output.blocks[0]);
    assert_eq!(
        table.columns,
        vec!["Line", "Length", "Bowling Avg", "Economy Rate", "Bowling SR"]
    );

    // Hand-computed over all 16 deliveries, in deterministic key order.
    // Wicketless groups report 0.00 for average and strike rate.
    let expected = vec![
        vec!["on stump", "full", "7.00", "14.00", "3.00"],
        vec!["on stump", "good", "0.00", "0.00", "0.00"],
        vec!["on stump", "short", "14.00", "21.00", "4.00"],
        vec!["outside off", "full", "0.00", "24.00", "0.00"],
        vec!["outside off", "good", "1.50", "3.60", "2.50"],
    ];
    let actual: Vec<Vec<&str>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|s| s.as_str()).collect())
        .collect();
    assert_eq!(actual, expected);

    // Restricting the ground list reruns the same pipeline over fewer rows
    let eden_only = line_length_insights(
        &ds,
        &LineLengthConfig {
            grounds: vec!["Eden Gardens".to_string()],
            bowl_kinds: None,
            bowl_styles: None,
            bat_hands: None,
        },
    );
    let table = expect_table(&eden_only.blocks[0]);
    assert_eq!(table.rows.len(), 5);
    // on stump/short at Eden: 8 runs, 3 balls, 1 wicket
    assert_eq!(
        table.rows[2],
        vec!["on stump", "short", "8.00", "16.00", "3.00"]
    );
}

#[test]
fn test_batsman_swot_reference() {
    let ds = load_fixture();
    let output = batsman_swot(
        &ds,
        &BatsmanSwotConfig {
            batsman: "V Kohli".to_string(),
            bowl_kinds: None,
            bowl_styles: None,
        },
    );

    // Main breakdown: 5 distinct (line, length, kind) combinations
    let main = expect_table(&output.blocks[0]);
    assert_eq!(main.rows.len(), 5);
    // outside off/good/pace: 1 run, 2 balls, 1 out
    let row = main
        .rows
        .iter()
        .find(|r| r[0] == "outside off" && r[1] == "good")
        .expect("expected outside off/good group");
    assert_eq!(row[3], "1.00"); // batting average
    assert_eq!(row[4], "50.00"); // strike rate
    assert_eq!(row[5], "2.00"); // balls per dismissal

    // Kind summary: all six Kohli deliveries are pace
    let summary = expect_table(&output.blocks[1]);
    assert_eq!(summary.rows.len(), 1);
    assert_eq!(summary.rows[0], vec!["pace", "17.00", "283.33", "1"]);
}

#[test]
fn test_toss_impact_reference() {
    let ds = load_fixture();
    let output = toss_impact(
        &ds,
        &TossImpactConfig {
            ground: "Eden Gardens".to_string(),
            toss_team: None,
            bowl_kinds: Vec::new(),
            bowl_styles: None,
        },
    );

    // One match won by the toss winner, one not; batting first split evenly
    let Block::Note(toss_note) = &output.blocks[0] else {
        panic!("expected toss percentage note");
    };
    assert!(toss_note.contains("50.00%"), "got: {}", toss_note);
    let Block::Note(batting_note) = &output.blocks[1] else {
        panic!("expected batting-first percentage note");
    };
    assert!(batting_note.contains("50.00%"), "got: {}", batting_note);

    // Empty kind selection is a no-op: both kinds appear in the breakdown
    let table = expect_table(&output.blocks[2]);
    let actual: Vec<Vec<&str>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|s| s.as_str()).collect())
        .collect();
    assert_eq!(
        actual,
        vec![
            vec!["pace", "17.00", "17.00", "6.00"],
            vec!["spin", "4.50", "9.00", "3.00"],
        ]
    );
}

#[test]
fn test_no_data_outcome_end_to_end() {
    let ds = load_fixture();
    let output = shot_effectiveness(
        &ds,
        &ShotEffectivenessConfig {
            ground: "Eden Gardens".to_string(),
            // Active filter with a value that matches nothing
            bowl_kinds: Some(vec!["underarm".to_string()]),
            bowl_styles: None,
            bat_hands: None,
        },
    );
    assert!(output.is_no_data());

    let text = render_blocks(&output.blocks).unwrap();
    assert!(text.contains(NO_DATA_NOTICE));
}

#[test]
fn test_rendered_text_contains_reference_values() {
    let ds = load_fixture();
    let output = line_length_insights(
        &ds,
        &LineLengthConfig {
            grounds: Vec::new(),
            bowl_kinds: None,
            bowl_styles: None,
            bat_hands: None,
        },
    );
    let text = render_blocks(&output.blocks).unwrap();
    println!("{}", text);

    assert!(text.contains("Bowling Analysis"));
    assert!(text.contains("Bowling Avg"));
    assert!(text.contains("outside off"));
    assert!(text.contains("21.00"));
}
