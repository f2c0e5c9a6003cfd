//! View computations for programmatic use by both CLI and GUI.
//!
//! Each analysis view is a configuration struct plus a function from
//! (dataset, config) to an ordered sequence of presentation blocks,
//! returning structured data instead of printing to stdout. A shared
//! monospace renderer turns blocks into text for both front ends.

use crate::analysis::{
    apply_filters, eligible_players, group_by, round2, Aggregates, FilterClause, Group, GroupKey,
    PROFILE_MIN_DELIVERIES,
};
use crate::dataset::{Column, Dataset};
use anyhow::Result;
use std::cmp::Ordering;
use std::fmt::Write;

/// Notice shown when the composed filters exclude every delivery.
pub const NO_DATA_NOTICE: &str = "No data available for the selected filters.";

// ============================================================================
// Presentation blocks
// ============================================================================

/// A rendered result table.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A labeled series rendered as a bar chart.
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub title: String,
    pub bars: Vec<(String, f64)>,
}

/// One element of a view's output, in display order.
#[derive(Debug, Clone)]
pub enum Block {
    Table(Table),
    Bars(BarSeries),
    Note(String),
}

/// Ordered output of one view invocation.
#[derive(Debug, Clone, Default)]
pub struct ViewOutput {
    pub blocks: Vec<Block>,
}

impl ViewOutput {
    /// The explicit "no data" outcome: filters excluded every delivery.
    pub fn no_data() -> Self {
        ViewOutput {
            blocks: vec![Block::Note(NO_DATA_NOTICE.to_string())],
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self.blocks.as_slice(), [Block::Note(n)] if n == NO_DATA_NOTICE)
    }
}

fn fmt2(x: f64) -> String {
    format!("{:.2}", round2(x))
}

fn fmt2_opt(x: Option<f64>) -> String {
    match x {
        Some(v) => fmt2(v),
        None => "-".to_string(),
    }
}

// ============================================================================
// Best Shots by Ground
// ============================================================================

/// Configuration for the shot effectiveness view. `None` secondary filters
/// are switched off and pass all deliveries.
#[derive(Debug, Clone)]
pub struct ShotEffectivenessConfig {
    /// Selected ground (mandatory primary dimension)
    pub ground: String,
    pub bowl_kinds: Option<Vec<String>>,
    pub bowl_styles: Option<Vec<String>>,
    pub bat_hands: Option<Vec<String>>,
}

/// Average runs and dismissal rate per shot type at one ground, as two bar
/// series sorted by average runs descending.
pub fn shot_effectiveness(ds: &Dataset, config: &ShotEffectivenessConfig) -> ViewOutput {
    let clauses = [
        FilterClause::require(Column::Ground, &config.ground),
        FilterClause::toggled(Column::BowlKind, config.bowl_kinds.clone()),
        FilterClause::toggled(Column::BowlStyle, config.bowl_styles.clone()),
        FilterClause::toggled(Column::BatHand, config.bat_hands.clone()),
    ];
    let rows = apply_filters(ds.deliveries(), &clauses);
    if rows.is_empty() {
        return ViewOutput::no_data();
    }

    let mut groups = group_by(&rows, &[GroupKey::Column(Column::Shot)]);
    groups.sort_by(|a, b| {
        b.agg
            .average_runs()
            .partial_cmp(&a.agg.average_runs())
            .unwrap_or(Ordering::Equal)
    });

    let avg_bars: Vec<(String, f64)> = groups
        .iter()
        .map(|g| (g.key[0].to_string(), round2(g.agg.average_runs())))
        .collect();
    let dismissal_bars: Vec<(String, f64)> = groups
        .iter()
        .map(|g| (g.key[0].to_string(), round2(g.agg.dismissal_rate_pct())))
        .collect();

    ViewOutput {
        blocks: vec![
            Block::Bars(BarSeries {
                title: "Average Runs per Shot Type".to_string(),
                bars: avg_bars,
            }),
            Block::Bars(BarSeries {
                title: "Dismissal Rate per Shot Type (%)".to_string(),
                bars: dismissal_bars,
            }),
        ],
    }
}

// ============================================================================
// Bowling Line and Length Insights
// ============================================================================

/// Configuration for the line/length view. This view has no mandatory
/// primary dimension: an empty ground list means all grounds.
#[derive(Debug, Clone)]
pub struct LineLengthConfig {
    pub grounds: Vec<String>,
    pub bowl_kinds: Option<Vec<String>>,
    pub bowl_styles: Option<Vec<String>>,
    pub bat_hands: Option<Vec<String>>,
}

/// Bowling average, economy rate, and bowling strike rate per
/// (line, length) combination.
pub fn line_length_insights(ds: &Dataset, config: &LineLengthConfig) -> ViewOutput {
    let clauses = [
        FilterClause::any_of(Column::Ground, config.grounds.clone()),
        FilterClause::toggled(Column::BowlKind, config.bowl_kinds.clone()),
        FilterClause::toggled(Column::BowlStyle, config.bowl_styles.clone()),
        FilterClause::toggled(Column::BatHand, config.bat_hands.clone()),
    ];
    let rows = apply_filters(ds.deliveries(), &clauses);
    if rows.is_empty() {
        return ViewOutput::no_data();
    }

    let groups = group_by(
        &rows,
        &[GroupKey::Column(Column::Line), GroupKey::Column(Column::Length)],
    );

    ViewOutput {
        blocks: vec![Block::Table(bowling_table(
            "Bowling Analysis",
            &["Line", "Length"],
            &groups,
        ))],
    }
}

/// Shared bowling table: key columns plus average / economy / strike rate.
fn bowling_table(title: &str, key_columns: &[&str], groups: &[Group]) -> Table {
    let mut columns: Vec<String> = key_columns.iter().map(|c| c.to_string()).collect();
    columns.extend([
        "Bowling Avg".to_string(),
        "Economy Rate".to_string(),
        "Bowling SR".to_string(),
    ]);

    let mut rows = Vec::with_capacity(groups.len());
    for g in groups {
        let mut row: Vec<String> = g.key.iter().map(|k| k.to_string()).collect();
        row.push(fmt2(g.agg.bowling_average()));
        row.push(fmt2(g.agg.economy_rate()));
        row.push(fmt2(g.agg.bowling_strike_rate()));
        rows.push(row);
    }
    Table {
        title: title.to_string(),
        columns,
        rows,
    }
}

// ============================================================================
// Batsman Strengths and Weaknesses
// ============================================================================

/// Configuration for the batsman SWOT view.
#[derive(Debug, Clone)]
pub struct BatsmanSwotConfig {
    /// Selected batsman (mandatory primary dimension)
    pub batsman: String,
    pub bowl_kinds: Option<Vec<String>>,
    pub bowl_styles: Option<Vec<String>>,
}

/// Batting average, strike rate, and balls per dismissal for one batsman,
/// broken down by (line, length, bowling kind), adding bowling style when
/// that filter is active, with summary tables per kind and per style.
pub fn batsman_swot(ds: &Dataset, config: &BatsmanSwotConfig) -> ViewOutput {
    let style_active = config.bowl_styles.is_some();
    let clauses = [
        FilterClause::require(Column::Bat, &config.batsman),
        FilterClause::toggled(Column::BowlKind, config.bowl_kinds.clone()),
        FilterClause::toggled(Column::BowlStyle, config.bowl_styles.clone()),
    ];
    let rows = apply_filters(ds.deliveries(), &clauses);
    if rows.is_empty() {
        return ViewOutput::no_data();
    }

    let mut keys = vec![
        GroupKey::Column(Column::Line),
        GroupKey::Column(Column::Length),
        GroupKey::Column(Column::BowlKind),
    ];
    if style_active {
        keys.push(GroupKey::Column(Column::BowlStyle));
    }
    let groups = group_by(&rows, &keys);

    let mut columns = vec![
        "Line".to_string(),
        "Length".to_string(),
        "Bowling Kind".to_string(),
    ];
    if style_active {
        columns.push("Bowling Style".to_string());
    }
    columns.extend([
        "Batting Avg".to_string(),
        "Strike Rate".to_string(),
        "Balls per Dismissal".to_string(),
    ]);

    let table_rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            let mut row: Vec<String> = g.key.iter().map(|k| k.to_string()).collect();
            row.push(fmt2(g.agg.batting_average()));
            row.push(fmt2_opt(g.agg.strike_rate()));
            row.push(fmt2(g.agg.balls_per_dismissal()));
            row
        })
        .collect();

    let mut blocks = vec![Block::Table(Table {
        title: format!("Batsman Analysis: {}", config.batsman),
        columns,
        rows: table_rows,
    })];

    blocks.push(Block::Table(batting_summary_table(
        "Performance Against Bowling Kinds",
        "Bowling Kind",
        &group_by(&rows, &[GroupKey::Column(Column::BowlKind)]),
    )));

    if style_active {
        blocks.push(Block::Table(batting_summary_table(
            "Performance Against Bowling Styles",
            "Bowling Style",
            &group_by(&rows, &[GroupKey::Column(Column::BowlStyle)]),
        )));
    }

    ViewOutput { blocks }
}

fn batting_summary_table(title: &str, key_column: &str, groups: &[Group]) -> Table {
    let rows = groups
        .iter()
        .map(|g| {
            vec![
                g.key[0].to_string(),
                fmt2(g.agg.batting_average()),
                fmt2_opt(g.agg.strike_rate()),
                g.agg.outs.to_string(),
            ]
        })
        .collect();
    Table {
        title: title.to_string(),
        columns: vec![
            key_column.to_string(),
            "Batting Avg".to_string(),
            "Strike Rate".to_string(),
            "Dismissals".to_string(),
        ],
        rows,
    }
}

// ============================================================================
// Toss Impact on Match Results
// ============================================================================

/// Configuration for the toss impact view.
#[derive(Debug, Clone)]
pub struct TossImpactConfig {
    /// Selected ground (mandatory primary dimension)
    pub ground: String,
    /// Restrict to deliveries where this team won the toss
    pub toss_team: Option<String>,
    /// Bowling kinds for the bowling breakdown; empty means all kinds
    pub bowl_kinds: Vec<String>,
    pub bowl_styles: Option<Vec<String>>,
}

/// Toss-win and batting-first win percentages at one ground, followed by a
/// bowling breakdown by kind (and style when active).
pub fn toss_impact(ds: &Dataset, config: &TossImpactConfig) -> ViewOutput {
    let mut clauses = vec![FilterClause::require(Column::Ground, &config.ground)];
    if let Some(team) = &config.toss_team {
        clauses.push(FilterClause::require(Column::Toss, team));
    }
    let rows = apply_filters(ds.deliveries(), &clauses);
    if rows.is_empty() {
        return ViewOutput::no_data();
    }

    let total = rows.len();
    let toss_and_match = rows.iter().filter(|d| d.toss == d.winner).count();
    let toss_win_pct = if total > 0 {
        toss_and_match as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let batting_first = rows.iter().filter(|d| d.inns == 1).count();
    let batting_first_wins = rows
        .iter()
        .filter(|d| d.inns == 1 && d.team_bat == d.winner)
        .count();
    let batting_first_pct = if batting_first > 0 {
        batting_first_wins as f64 / batting_first as f64 * 100.0
    } else {
        0.0
    };

    let mut blocks = vec![
        Block::Note(format!(
            "Team winning the toss won the match: {:.2}%",
            round2(toss_win_pct)
        )),
        Block::Note(format!(
            "Team batting first won the match: {:.2}%",
            round2(batting_first_pct)
        )),
    ];

    // Bowling breakdown over the same ground/team selection
    let style_active = config.bowl_styles.is_some();
    let bowling_clauses = [
        FilterClause::any_of(Column::BowlKind, config.bowl_kinds.clone()),
        FilterClause::toggled(Column::BowlStyle, config.bowl_styles.clone()),
    ];
    let bowling_rows = apply_filters(rows.iter().copied(), &bowling_clauses);
    if bowling_rows.is_empty() {
        blocks.push(Block::Note(NO_DATA_NOTICE.to_string()));
        return ViewOutput { blocks };
    }

    let mut keys = vec![GroupKey::Column(Column::BowlKind)];
    let mut key_columns = vec!["Bowling Kind"];
    if style_active {
        keys.push(GroupKey::Column(Column::BowlStyle));
        key_columns.push("Bowling Style");
    }
    let groups = group_by(&bowling_rows, &keys);
    blocks.push(Block::Table(bowling_table(
        "Bowling Analysis",
        &key_columns,
        &groups,
    )));

    ViewOutput { blocks }
}

// ============================================================================
// Player Batting Profiles
// ============================================================================

/// Configuration for the phase-wise batting profile view.
#[derive(Debug, Clone)]
pub struct BattingProfileConfig {
    /// Selected batsman (mandatory primary dimension)
    pub batsman: String,
    pub grounds: Option<Vec<String>>,
    pub bowl_kinds: Option<Vec<String>>,
    pub bowl_styles: Option<Vec<String>>,
}

/// Phase-wise batting profile: strike rate, balls per boundary, dot-ball,
/// activity-runs, and control percentages for one eligible batsman.
pub fn batting_profile(ds: &Dataset, config: &BattingProfileConfig) -> ViewOutput {
    let eligible = eligible_players(ds, Column::Bat, PROFILE_MIN_DELIVERIES);
    if !eligible.contains(&config.batsman) {
        return ineligible_notice(&config.batsman, "faced");
    }

    let clauses = [
        FilterClause::require(Column::Bat, &config.batsman),
        FilterClause::toggled(Column::Ground, config.grounds.clone()),
        FilterClause::toggled(Column::BowlKind, config.bowl_kinds.clone()),
        FilterClause::toggled(Column::BowlStyle, config.bowl_styles.clone()),
    ];
    let rows = apply_filters(ds.deliveries(), &clauses);
    if rows.is_empty() {
        return ViewOutput::no_data();
    }

    let groups = group_by(&rows, &[GroupKey::Phase]);

    let blocks = vec![
        Block::Note(format!("Player Profile: {}", config.batsman)),
        Block::Table(phase_table("Strike Rate", &groups, |agg| {
            fmt2_opt(agg.strike_rate())
        })),
        Block::Table(phase_table("Balls per Six", &groups, |agg| {
            fmt2(agg.balls_per_six())
        })),
        Block::Table(phase_table("Balls per Four", &groups, |agg| {
            fmt2(agg.balls_per_four())
        })),
        Block::Table(phase_table("Dot Ball %", &groups, |agg| {
            fmt2(agg.dot_pct())
        })),
        Block::Table(phase_table("Activity Runs %", &groups, |agg| {
            fmt2(agg.activity_pct())
        })),
        Block::Table(phase_table("Control %", &groups, |agg| {
            fmt2(agg.control_pct())
        })),
    ];

    ViewOutput { blocks }
}

// ============================================================================
// Player Bowling Profiles
// ============================================================================

/// Configuration for the phase-wise bowling profile view.
#[derive(Debug, Clone)]
pub struct BowlingProfileConfig {
    /// Selected bowler (mandatory primary dimension)
    pub bowler: String,
    pub ground: Option<String>,
    pub bat_hand: Option<String>,
}

/// Phase-wise bowling profile: economy rate, bowling average, balls per
/// wicket, and non-control percentage for one eligible bowler.
pub fn bowling_profile(ds: &Dataset, config: &BowlingProfileConfig) -> ViewOutput {
    let eligible = eligible_players(ds, Column::Bowl, PROFILE_MIN_DELIVERIES);
    if !eligible.contains(&config.bowler) {
        return ineligible_notice(&config.bowler, "bowled");
    }

    let mut clauses = vec![FilterClause::require(Column::Bowl, &config.bowler)];
    if let Some(ground) = &config.ground {
        clauses.push(FilterClause::require(Column::Ground, ground));
    }
    if let Some(hand) = &config.bat_hand {
        clauses.push(FilterClause::require(Column::BatHand, hand));
    }
    let rows = apply_filters(ds.deliveries(), &clauses);
    if rows.is_empty() {
        return ViewOutput::no_data();
    }

    let groups = group_by(&rows, &[GroupKey::Phase]);

    let blocks = vec![
        Block::Note(format!("Bowler Profile: {}", config.bowler)),
        Block::Table(phase_table("Economy Rate", &groups, |agg| {
            fmt2(agg.economy_rate())
        })),
        Block::Table(phase_table("Bowling Average", &groups, |agg| {
            fmt2(agg.bowling_average())
        })),
        Block::Table(phase_table("Balls per Wicket", &groups, |agg| {
            fmt2(agg.bowling_strike_rate())
        })),
        Block::Table(phase_table("Non-Control %", &groups, |agg| {
            fmt2(agg.non_control_pct())
        })),
    ];

    ViewOutput { blocks }
}

/// Players eligible for the batting profile view.
pub fn eligible_batsmen(ds: &Dataset) -> Vec<String> {
    eligible_players(ds, Column::Bat, PROFILE_MIN_DELIVERIES)
}

/// Players eligible for the bowling profile view.
pub fn eligible_bowlers(ds: &Dataset) -> Vec<String> {
    eligible_players(ds, Column::Bowl, PROFILE_MIN_DELIVERIES)
}

fn ineligible_notice(player: &str, verb: &str) -> ViewOutput {
    ViewOutput {
        blocks: vec![Block::Note(format!(
            "No data available for {}: the player has not {} {} deliveries.",
            player, verb, PROFILE_MIN_DELIVERIES
        ))],
    }
}

/// Two-column phase table: one row per phase with data, in display order.
fn phase_table(title: &str, groups: &[Group], metric: impl Fn(&Aggregates) -> String) -> Table {
    let rows = groups
        .iter()
        .map(|g| vec![g.key[0].to_string(), metric(&g.agg)])
        .collect();
    Table {
        title: title.to_string(),
        columns: vec!["Phase".to_string(), title.to_string()],
        rows,
    }
}

// ============================================================================
// Text rendering
// ============================================================================

const BAR_WIDTH: usize = 40;

/// Render blocks as monospace text for the CLI and the GUI result panes.
pub fn render_blocks(blocks: &[Block]) -> Result<String> {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Note(note) => writeln!(out, "{}\n", note)?,
            Block::Table(table) => render_table(table, &mut out)?,
            Block::Bars(series) => render_bars(series, &mut out)?,
        }
    }
    Ok(out)
}

fn render_table(table: &Table, out: &mut String) -> Result<()> {
    if !table.title.is_empty() {
        writeln!(out, "{}", table.title)?;
    }

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.len()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut header = String::new();
    for (i, col) in table.columns.iter().enumerate() {
        write!(header, "{:<width$}  ", col, width = widths[i])?;
    }
    writeln!(out, "{}", header.trim_end())?;
    writeln!(out, "{:-<width$}", "", width = header.trim_end().len())?;

    for row in &table.rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(0);
            // Right-align numeric cells, left-align key cells
            if cell.parse::<f64>().is_ok() {
                write!(line, "{:>width$}  ", cell, width = width)?;
            } else {
                write!(line, "{:<width$}  ", cell, width = width)?;
            }
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out)?;
    Ok(())
}

fn render_bars(series: &BarSeries, out: &mut String) -> Result<()> {
    writeln!(out, "{}", series.title)?;

    let label_width = series
        .bars
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let max_value = series
        .bars
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);

    for (label, value) in &series.bars {
        let filled = if max_value > 0.0 {
            ((value / max_value) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        writeln!(
            out,
            "{:<label_width$}  {:<bar_width$}  {:.2}",
            label,
            "\u{2588}".repeat(filled),
            value,
            label_width = label_width,
            bar_width = BAR_WIDTH
        )?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Delivery;

    fn delivery(ground: &str, bat: &str, shot: &str, batruns: u32, out: u8) -> Delivery {
        Delivery {
            ground: ground.to_string(),
            bowl_kind: "pace".to_string(),
            bowl_style: "RF".to_string(),
            bat_hand: "RHB".to_string(),
            bat: bat.to_string(),
            bowl: "J Bumrah".to_string(),
            toss: "CSK".to_string(),
            winner: "CSK".to_string(),
            team_bat: "CSK".to_string(),
            inns: 1,
            ball_id: 3,
            shot: shot.to_string(),
            line: "outside off".to_string(),
            length: "full".to_string(),
            batruns,
            bowlruns: batruns,
            ball: 1,
            out,
            is_six: u8::from(batruns == 6),
            is_four: u8::from(batruns == 4),
            is_dot: u8::from(batruns == 0),
            control: 1,
            activity_runs: 0,
        }
    }

    fn small_dataset() -> Dataset {
        Dataset::from_deliveries(vec![
            delivery("Eden Gardens", "V Kohli", "cover drive", 4, 0),
            delivery("Eden Gardens", "V Kohli", "cover drive", 0, 1),
            delivery("Eden Gardens", "V Kohli", "pull", 6, 0),
            delivery("Wankhede Stadium", "MS Dhoni", "sweep", 1, 0),
        ])
        .unwrap()
    }

    #[test]
    fn test_shot_effectiveness_sorted_by_average() {
        let ds = small_dataset();
        let config = ShotEffectivenessConfig {
            ground: "Eden Gardens".to_string(),
            bowl_kinds: None,
            bowl_styles: None,
            bat_hands: None,
        };
        let output = shot_effectiveness(&ds, &config);
        assert_eq!(output.blocks.len(), 2);

        let Block::Bars(avg) = &output.blocks[0] else {
            panic!("expected bar series");
        };
        // pull averages 6.00, cover drive 2.00
        assert_eq!(avg.bars[0], ("pull".to_string(), 6.00));
        assert_eq!(avg.bars[1], ("cover drive".to_string(), 2.00));

        let Block::Bars(dismissals) = &output.blocks[1] else {
            panic!("expected bar series");
        };
        assert_eq!(dismissals.bars[1], ("cover drive".to_string(), 50.00));
    }

    #[test]
    fn test_empty_filter_short_circuits_to_no_data() {
        let ds = small_dataset();
        let config = ShotEffectivenessConfig {
            ground: "Chepauk".to_string(),
            bowl_kinds: None,
            bowl_styles: None,
            bat_hands: None,
        };
        let output = shot_effectiveness(&ds, &config);
        assert!(output.is_no_data());
    }

    #[test]
    fn test_swot_grouping_keys_follow_style_toggle() {
        let ds = small_dataset();
        let without_style = batsman_swot(
            &ds,
            &BatsmanSwotConfig {
                batsman: "V Kohli".to_string(),
                bowl_kinds: None,
                bowl_styles: None,
            },
        );
        let Block::Table(table) = &without_style.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(table.columns.len(), 6);
        assert!(!table.columns.contains(&"Bowling Style".to_string()));

        let with_style = batsman_swot(
            &ds,
            &BatsmanSwotConfig {
                batsman: "V Kohli".to_string(),
                bowl_kinds: None,
                bowl_styles: Some(vec!["RF".to_string()]),
            },
        );
        let Block::Table(table) = &with_style.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(table.columns.len(), 7);
        assert!(table.columns.contains(&"Bowling Style".to_string()));
        // Style summary table appears only when the style filter is active
        assert_eq!(without_style.blocks.len(), 2);
        assert_eq!(with_style.blocks.len(), 3);
    }

    #[test]
    fn test_toss_empty_kind_selection_passes_all_rows() {
        let ds = small_dataset();
        let output = toss_impact(
            &ds,
            &TossImpactConfig {
                ground: "Eden Gardens".to_string(),
                toss_team: None,
                bowl_kinds: Vec::new(),
                bowl_styles: None,
            },
        );
        // Percentages plus a populated bowling table, not a no-data notice
        assert_eq!(output.blocks.len(), 3);
        let Block::Table(table) = &output.blocks[2] else {
            panic!("expected bowling table");
        };
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "pace");
    }

    #[test]
    fn test_profile_eligibility_gate() {
        let mut rows = Vec::new();
        for i in 0u32..300 {
            let mut d = delivery("Eden Gardens", "regular", "pull", 1, 0);
            d.ball_id = i % 20 + 1;
            d.bowl = "workhorse".to_string();
            rows.push(d);
        }
        for i in 0u32..299 {
            let mut d = delivery("Eden Gardens", "fringe", "pull", 1, 0);
            d.ball_id = i % 20 + 1;
            d.bowl = "parttimer".to_string();
            rows.push(d);
        }
        let ds = Dataset::from_deliveries(rows).unwrap();

        let included = batting_profile(
            &ds,
            &BattingProfileConfig {
                batsman: "regular".to_string(),
                grounds: None,
                bowl_kinds: None,
                bowl_styles: None,
            },
        );
        // Header note plus six phase tables
        assert_eq!(included.blocks.len(), 7);
        let Block::Table(sr) = &included.blocks[1] else {
            panic!("expected strike rate table");
        };
        assert_eq!(sr.rows.len(), 3);
        assert_eq!(sr.rows[0][0], "Powerplay");
        assert_eq!(sr.rows[1][0], "Middle");
        assert_eq!(sr.rows[2][0], "Death");

        let excluded = batting_profile(
            &ds,
            &BattingProfileConfig {
                batsman: "fringe".to_string(),
                grounds: None,
                bowl_kinds: None,
                bowl_styles: None,
            },
        );
        assert_eq!(excluded.blocks.len(), 1);
        let Block::Note(note) = &excluded.blocks[0] else {
            panic!("expected notice");
        };
        assert!(note.contains("fringe"));

        let bowler = bowling_profile(
            &ds,
            &BowlingProfileConfig {
                bowler: "workhorse".to_string(),
                ground: None,
                bat_hand: None,
            },
        );
        assert_eq!(bowler.blocks.len(), 5);
    }

    #[test]
    fn test_render_blocks_contains_values_and_notice() {
        let ds = small_dataset();
        let output = batsman_swot(
            &ds,
            &BatsmanSwotConfig {
                batsman: "V Kohli".to_string(),
                bowl_kinds: None,
                bowl_styles: None,
            },
        );
        let text = render_blocks(&output.blocks).unwrap();
        assert!(text.contains("Batsman Analysis: V Kohli"));
        assert!(text.contains("Batting Avg"));
        assert!(text.contains("outside off"));

        let no_data = ViewOutput::no_data();
        let text = render_blocks(&no_data.blocks).unwrap();
        assert!(text.contains(NO_DATA_NOTICE));
    }
}
