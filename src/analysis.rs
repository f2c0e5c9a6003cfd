//! Filter pipeline, aggregation engine, and phase classifier
//!
//! The reusable core behind every analysis view: declarative membership
//! filters composed conjunctively over the dataset, grouped aggregation over
//! an arbitrary ordered list of keys, and derived rate/average metrics with
//! explicit zero-denominator policies.

use crate::dataset::{Column, Dataset, Delivery};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Minimum deliveries a player must have in the full dataset before a
/// profile view will report on them.
pub const PROFILE_MIN_DELIVERIES: usize = 300;

// ============================================================================
// Phase classifier
// ============================================================================

/// Match phase of a delivery within an innings.
///
/// Ordered: grouping by phase always emits Powerplay, Middle, Death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Powerplay,
    Middle,
    Death,
}

impl Phase {
    /// Fixed display order.
    pub const ALL: [Phase; 3] = [Phase::Powerplay, Phase::Middle, Phase::Death];

    /// Classify a delivery number. Total over all positive `ball_id`s.
    pub fn classify(ball_id: u32) -> Phase {
        if ball_id <= 6 {
            Phase::Powerplay
        } else if ball_id <= 15 {
            Phase::Middle
        } else {
            Phase::Death
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Powerplay => "Powerplay",
            Phase::Middle => "Middle",
            Phase::Death => "Death",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Filter pipeline
// ============================================================================

/// One membership predicate over a categorical column.
///
/// Clauses compose conjunctively. An inactive clause, or a clause with an
/// empty allowed set, is a no-op and passes every row.
#[derive(Debug, Clone)]
pub struct FilterClause {
    pub column: Column,
    pub allowed: Vec<String>,
    pub active: bool,
}

impl FilterClause {
    /// Mandatory single-value clause: a view's primary dimension.
    pub fn require(column: Column, value: &str) -> Self {
        FilterClause {
            column,
            allowed: vec![value.to_string()],
            active: true,
        }
    }

    /// Active membership clause over a set of values.
    pub fn any_of(column: Column, values: Vec<String>) -> Self {
        FilterClause {
            column,
            allowed: values,
            active: true,
        }
    }

    /// Toggled-off clause; never filters anything.
    pub fn inactive(column: Column) -> Self {
        FilterClause {
            column,
            allowed: Vec::new(),
            active: false,
        }
    }

    /// Build from a UI toggle: `None` means the filter is switched off.
    pub fn toggled(column: Column, selection: Option<Vec<String>>) -> Self {
        match selection {
            Some(values) => Self::any_of(column, values),
            None => Self::inactive(column),
        }
    }

    fn admits(&self, d: &Delivery) -> bool {
        if !self.active || self.allowed.is_empty() {
            return true;
        }
        let value = self.column.value(d);
        self.allowed.iter().any(|a| a == value)
    }
}

/// Apply clauses conjunctively; order of clauses does not affect the result.
pub fn apply_filters<'a, I>(rows: I, clauses: &[FilterClause]) -> Vec<&'a Delivery>
where
    I: IntoIterator<Item = &'a Delivery>,
{
    rows.into_iter()
        .filter(|d| clauses.iter().all(|c| c.admits(d)))
        .collect()
}

// ============================================================================
// Aggregation engine
// ============================================================================

/// Grouping dimension: a categorical column or the derived match phase.
#[derive(Debug, Clone, Copy)]
pub enum GroupKey {
    Column(Column),
    Phase,
}

/// One grouping-key value.
///
/// `Ord` yields lexicographic order for text keys and the fixed
/// Powerplay/Middle/Death order for phases, so grouped output is
/// deterministic without a separate sort step.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyValue {
    Phase(Phase),
    Text(String),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Phase(p) => f.write_str(p.name()),
            KeyValue::Text(s) => f.write_str(s),
        }
    }
}

/// Base aggregates over one group of deliveries.
///
/// A group is only ever built from at least one delivery, so `balls >= 1`
/// wherever a group exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub balls: u64,
    pub batruns: u64,
    pub bowlruns: u64,
    pub outs: u64,
    pub sixes: u64,
    pub fours: u64,
    pub dots: u64,
    pub control: u64,
    pub activity_runs: u64,
}

impl Aggregates {
    pub fn add(&mut self, d: &Delivery) {
        // `ball` is an always-present marker; counting it counts deliveries
        self.balls += 1;
        self.batruns += u64::from(d.batruns);
        self.bowlruns += u64::from(d.bowlruns);
        self.outs += u64::from(d.out);
        self.sixes += u64::from(d.is_six);
        self.fours += u64::from(d.is_four);
        self.dots += u64::from(d.is_dot);
        self.control += u64::from(d.control);
        self.activity_runs += u64::from(d.activity_runs);
    }

    /// Aggregate a row set directly (single-group views).
    pub fn of<'a, I>(rows: I) -> Aggregates
    where
        I: IntoIterator<Item = &'a Delivery>,
    {
        let mut agg = Aggregates::default();
        for d in rows {
            agg.add(d);
        }
        agg
    }

    // -- Batting metrics --

    /// Runs per dismissal. An undismissed group divides by 1, so the
    /// average equals total runs rather than blowing up.
    pub fn batting_average(&self) -> f64 {
        self.batruns as f64 / self.outs.max(1) as f64
    }

    /// Runs per 100 balls faced. Unset when no balls were faced.
    pub fn strike_rate(&self) -> Option<f64> {
        if self.balls == 0 {
            None
        } else {
            Some(self.batruns as f64 / self.balls as f64 * 100.0)
        }
    }

    /// Balls faced per dismissal, with the same undismissed substitution
    /// as [`Aggregates::batting_average`].
    pub fn balls_per_dismissal(&self) -> f64 {
        self.balls as f64 / self.outs.max(1) as f64
    }

    /// Mean runs off the bat per delivery.
    pub fn average_runs(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            self.batruns as f64 / self.balls as f64
        }
    }

    // -- Bowling metrics --

    /// Runs conceded per wicket; 0 when wicketless.
    pub fn bowling_average(&self) -> f64 {
        if self.outs == 0 {
            0.0
        } else {
            self.bowlruns as f64 / self.outs as f64
        }
    }

    /// Runs conceded per over (6 balls).
    pub fn economy_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            self.bowlruns as f64 / (self.balls as f64 / 6.0)
        }
    }

    /// Balls bowled per wicket; 0 when wicketless.
    pub fn bowling_strike_rate(&self) -> f64 {
        if self.outs == 0 {
            0.0
        } else {
            self.balls as f64 / self.outs as f64
        }
    }

    /// Dismissals as a percentage of deliveries.
    pub fn dismissal_rate_pct(&self) -> f64 {
        self.pct(self.outs)
    }

    // -- Boundary and control metrics --

    pub fn six_ratio(&self) -> f64 {
        self.ratio(self.sixes)
    }

    pub fn four_ratio(&self) -> f64 {
        self.ratio(self.fours)
    }

    /// Balls faced per six; 0 when no six was hit.
    pub fn balls_per_six(&self) -> f64 {
        Self::per_boundary(self.six_ratio())
    }

    /// Balls faced per four; 0 when no four was hit.
    pub fn balls_per_four(&self) -> f64 {
        Self::per_boundary(self.four_ratio())
    }

    pub fn dot_pct(&self) -> f64 {
        self.pct(self.dots)
    }

    pub fn control_pct(&self) -> f64 {
        self.pct(self.control)
    }

    pub fn non_control_pct(&self) -> f64 {
        self.pct(self.balls - self.control)
    }

    pub fn activity_pct(&self) -> f64 {
        self.pct(self.activity_runs)
    }

    fn ratio(&self, count: u64) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            count as f64 / self.balls as f64
        }
    }

    fn pct(&self, count: u64) -> f64 {
        self.ratio(count) * 100.0
    }

    fn per_boundary(ratio: f64) -> f64 {
        if ratio > 0.0 {
            1.0 / ratio
        } else {
            0.0
        }
    }
}

/// One output row of a grouped aggregation.
#[derive(Debug, Clone)]
pub struct Group {
    pub key: Vec<KeyValue>,
    pub agg: Aggregates,
}

/// Group a row set by an ordered, non-empty list of keys.
///
/// Output order is deterministic: lexicographic on text key values,
/// Powerplay/Middle/Death on phase values. Key combinations with no
/// deliveries do not appear, so every emitted group has `balls >= 1`.
pub fn group_by<'a>(rows: &[&'a Delivery], keys: &[GroupKey]) -> Vec<Group> {
    debug_assert!(!keys.is_empty(), "grouping requires at least one key");

    let mut groups: BTreeMap<Vec<KeyValue>, Aggregates> = BTreeMap::new();
    for d in rows {
        let key: Vec<KeyValue> = keys
            .iter()
            .map(|k| match k {
                GroupKey::Column(c) => KeyValue::Text(c.value(d).to_string()),
                GroupKey::Phase => KeyValue::Phase(Phase::classify(d.ball_id)),
            })
            .collect();
        groups.entry(key).or_default().add(d);
    }

    groups
        .into_iter()
        .map(|(key, agg)| Group { key, agg })
        .collect()
}

/// Round a derived metric to two decimal digits, the display precision used
/// everywhere. Idempotent on already-rounded values.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ============================================================================
// Player eligibility and search
// ============================================================================

/// Players (distinct values of `column`) with at least `min_balls`
/// deliveries in the full dataset, sorted by name.
///
/// Profile views apply this before any user-chosen secondary filter.
pub fn eligible_players(ds: &Dataset, column: Column, min_balls: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for d in ds.deliveries() {
        *counts.entry(column.value(d)).or_insert(0) += 1;
    }
    let mut names: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n >= min_balls)
        .map(|(name, _)| name.to_string())
        .collect();
    names.sort();
    names
}

/// Case-insensitive substring search over player names.
pub fn search_names(names: &[String], term: &str) -> Vec<String> {
    if term.is_empty() {
        return names.to_vec();
    }
    let term = term.to_lowercase();
    names
        .iter()
        .filter(|n| n.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(bat: &str, ball_id: u32, batruns: u32, out: u8) -> Delivery {
        Delivery {
            ground: "Eden Gardens".to_string(),
            bowl_kind: "pace".to_string(),
            bowl_style: "RF".to_string(),
            bat_hand: "RHB".to_string(),
            bat: bat.to_string(),
            bowl: "J Bumrah".to_string(),
            toss: "CSK".to_string(),
            winner: "CSK".to_string(),
            team_bat: "CSK".to_string(),
            inns: 1,
            ball_id,
            shot: "cover drive".to_string(),
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

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(Phase::classify(1), Phase::Powerplay);
        assert_eq!(Phase::classify(6), Phase::Powerplay);
        assert_eq!(Phase::classify(7), Phase::Middle);
        assert_eq!(Phase::classify(15), Phase::Middle);
        assert_eq!(Phase::classify(16), Phase::Death);
        assert_eq!(Phase::classify(20), Phase::Death);
    }

    #[test]
    fn test_filter_composition_commutative_and_conjunctive() {
        let rows = vec![
            delivery("A", 1, 4, 0),
            delivery("B", 2, 0, 1),
            {
                let mut d = delivery("A", 3, 2, 0);
                d.bowl_kind = "spin".to_string();
                d
            },
        ];
        let a = FilterClause::require(Column::Bat, "A");
        let b = FilterClause::require(Column::BowlKind, "pace");

        let ab = apply_filters(&rows, &[a.clone(), b.clone()]);
        let ba = apply_filters(&rows, &[b.clone(), a.clone()]);
        assert_eq!(ab.len(), 1);
        assert_eq!(ab.len(), ba.len());
        assert_eq!(ab[0].ball_id, ba[0].ball_id);

        // Equals the intersection of applying each alone
        let only_a = apply_filters(&rows, &[a]);
        let only_b = apply_filters(&rows, &[b]);
        assert_eq!(only_a.len(), 2);
        assert_eq!(only_b.len(), 2);
        assert!(ab
            .iter()
            .all(|d| only_a.iter().any(|x| x.ball_id == d.ball_id)
                && only_b.iter().any(|x| x.ball_id == d.ball_id)));
    }

    #[test]
    fn test_inactive_clause_is_identity() {
        let rows = vec![delivery("A", 1, 4, 0), delivery("B", 2, 0, 1)];
        let mut clause = FilterClause::any_of(Column::Bat, vec!["nobody".to_string()]);
        clause.active = false;
        assert_eq!(apply_filters(&rows, &[clause]).len(), rows.len());
    }

    #[test]
    fn test_empty_allowed_set_is_noop() {
        let rows = vec![delivery("A", 1, 4, 0), delivery("B", 2, 0, 1)];
        let clause = FilterClause::any_of(Column::Bat, Vec::new());
        assert_eq!(apply_filters(&rows, &[clause]).len(), rows.len());
    }

    #[test]
    fn test_safe_division_policies() {
        // Two deliveries, no dismissal: average substitutes denominator 1
        let agg = Aggregates::of([delivery("A", 1, 4, 0), delivery("A", 1, 2, 0)].iter());
        assert_eq!(agg.batting_average(), 6.0);
        assert_eq!(agg.balls_per_dismissal(), 2.0);
        assert_eq!(agg.bowling_average(), 0.0);
        assert_eq!(agg.bowling_strike_rate(), 0.0);
        assert_eq!(agg.balls_per_six(), 0.0);

        // Empty aggregate: strike rate is unset, never a fault
        let empty = Aggregates::default();
        assert_eq!(empty.strike_rate(), None);
        assert_eq!(empty.economy_rate(), 0.0);
    }

    #[test]
    fn test_rounding_idempotent() {
        let once = round2(216.666_666);
        assert_eq!(once, 216.67);
        assert_eq!(round2(once), once);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_grouped_aggregation_example() {
        // Two deliveries, one dismissal
        let rows = vec![delivery("A", 1, 4, 0), delivery("A", 1, 0, 1)];
        let refs: Vec<&Delivery> = rows.iter().collect();
        let groups = group_by(&refs, &[GroupKey::Column(Column::Bat)]);

        assert_eq!(groups.len(), 1);
        let agg = groups[0].agg;
        assert_eq!(agg.batruns, 4);
        assert_eq!(agg.balls, 2);
        assert_eq!(agg.outs, 1);
        assert_eq!(round2(agg.batting_average()), 4.00);
        assert_eq!(round2(agg.strike_rate().unwrap()), 200.00);
    }

    #[test]
    fn test_grouped_aggregation_zero_out_guard() {
        let rows = vec![delivery("A", 1, 4, 0), delivery("A", 1, 0, 0)];
        let refs: Vec<&Delivery> = rows.iter().collect();
        let groups = group_by(&refs, &[GroupKey::Column(Column::Bat)]);
        // Undismissed: average = total runs, not a fault
        assert_eq!(groups[0].agg.batting_average(), 4.0);
    }

    #[test]
    fn test_phase_grouping_preserves_display_order() {
        // Input deliberately ordered Death, Powerplay, Middle
        let rows = vec![
            delivery("A", 18, 1, 0),
            delivery("A", 2, 2, 0),
            delivery("A", 9, 3, 0),
        ];
        let refs: Vec<&Delivery> = rows.iter().collect();
        let groups = group_by(&refs, &[GroupKey::Phase]);
        let phases: Vec<String> = groups.iter().map(|g| g.key[0].to_string()).collect();
        assert_eq!(phases, vec!["Powerplay", "Middle", "Death"]);
    }

    #[test]
    fn test_phase_grouping_skips_empty_phases() {
        let rows = vec![delivery("A", 2, 2, 0), delivery("A", 3, 1, 0)];
        let refs: Vec<&Delivery> = rows.iter().collect();
        let groups = group_by(&refs, &[GroupKey::Phase]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key[0], KeyValue::Phase(Phase::Powerplay));
    }

    #[test]
    fn test_eligibility_threshold() {
        let mut rows = Vec::new();
        for i in 0u32..300 {
            rows.push(delivery("regular", i % 20 + 1, 1, 0));
        }
        for i in 0u32..299 {
            rows.push(delivery("fringe", i % 20 + 1, 1, 0));
        }
        let ds = Dataset::from_deliveries(rows).unwrap();
        let eligible = eligible_players(&ds, Column::Bat, PROFILE_MIN_DELIVERIES);
        assert_eq!(eligible, vec!["regular".to_string()]);
    }

    #[test]
    fn test_search_names() {
        let names = vec![
            "MS Dhoni".to_string(),
            "V Kohli".to_string(),
            "S Dhawan".to_string(),
        ];
        assert_eq!(search_names(&names, "dh").len(), 2);
        assert_eq!(search_names(&names, "KOHLI"), vec!["V Kohli".to_string()]);
        assert_eq!(search_names(&names, "").len(), 3);
    }
}
