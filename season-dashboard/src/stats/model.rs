// Season table data model: columns, player rows, and the table itself.
//
// Column presence is part of the table's schema (`ColumnSet`) rather than
// something callers test for. Every row field other than the name is an
// `Option`, and a field whose column is not declared on the table is always
// `None` (enforced by `SeasonTable::new`).

use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// A batting statistic column a season table may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Name,
    Team,
    PA,
    OBP,
    SLG,
    WAR,
    HR,
    AVG,
    OPS,
}

impl Column {
    /// Every column in declaration order.
    pub const ALL: [Column; 9] = [
        Column::Name,
        Column::Team,
        Column::PA,
        Column::OBP,
        Column::SLG,
        Column::WAR,
        Column::HR,
        Column::AVG,
        Column::OPS,
    ];

    /// Column header as it appears in provider data and on screen.
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Team => "Team",
            Column::PA => "PA",
            Column::OBP => "OBP",
            Column::SLG => "SLG",
            Column::WAR => "WAR",
            Column::HR => "HR",
            Column::AVG => "AVG",
            Column::OPS => "OPS",
        }
    }

    /// Parse a provider header into a column, accepting common aliases.
    pub fn from_header(header: &str) -> Option<Column> {
        match header.trim() {
            "Name" | "Player" | "PlayerName" => Some(Column::Name),
            "Team" | "Tm" | "TeamNameAbb" => Some(Column::Team),
            "PA" => Some(Column::PA),
            "OBP" => Some(Column::OBP),
            "SLG" => Some(Column::SLG),
            "WAR" => Some(Column::WAR),
            "HR" => Some(Column::HR),
            "AVG" | "BA" => Some(Column::AVG),
            "OPS" => Some(Column::OPS),
            _ => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ColumnSet
// ---------------------------------------------------------------------------

/// The set of columns declared present on a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(BTreeSet<Column>);

impl ColumnSet {
    pub fn new() -> Self {
        ColumnSet(BTreeSet::new())
    }

    pub fn contains(&self, column: Column) -> bool {
        self.0.contains(&column)
    }

    pub fn insert(&mut self, column: Column) {
        self.0.insert(column);
    }

    pub fn remove(&mut self, column: Column) {
        self.0.remove(&column);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate columns in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        self.0.iter().copied()
    }

    /// Columns present in both sets.
    pub fn intersection(&self, other: &ColumnSet) -> ColumnSet {
        ColumnSet(self.0.intersection(&other.0).copied().collect())
    }
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        ColumnSet(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// PlayerSeason
// ---------------------------------------------------------------------------

/// One player's batting line for one season.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerSeason {
    pub name: String,
    /// Team abbreviation. `None` when unknown (or the column is absent).
    pub team: Option<String>,
    pub pa: Option<u32>,
    pub obp: Option<f64>,
    pub slg: Option<f64>,
    /// Wins above replacement. May be negative.
    pub war: Option<f64>,
    pub hr: Option<u32>,
    pub avg: Option<f64>,
    /// On-base plus slugging. Only populated by the metric deriver or when
    /// the provider supplies it directly.
    pub ops: Option<f64>,
}

impl PlayerSeason {
    /// Numeric value of a column for this row. `Name` and `Team` have no
    /// numeric value.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::Name | Column::Team => None,
            Column::PA => self.pa.map(f64::from),
            Column::OBP => self.obp,
            Column::SLG => self.slg,
            Column::WAR => self.war,
            Column::HR => self.hr.map(f64::from),
            Column::AVG => self.avg,
            Column::OPS => self.ops,
        }
    }

    /// Clear the field backing `column`. The name is never cleared.
    pub fn clear(&mut self, column: Column) {
        match column {
            Column::Name => {}
            Column::Team => self.team = None,
            Column::PA => self.pa = None,
            Column::OBP => self.obp = None,
            Column::SLG => self.slg = None,
            Column::WAR => self.war = None,
            Column::HR => self.hr = None,
            Column::AVG => self.avg = None,
            Column::OPS => self.ops = None,
        }
    }
}

// ---------------------------------------------------------------------------
// SeasonTable
// ---------------------------------------------------------------------------

/// Per-player batting statistics for a single season.
///
/// Tables are never mutated after construction; filtering and projection
/// return new tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonTable {
    year: i32,
    columns: ColumnSet,
    rows: Vec<PlayerSeason>,
}

impl SeasonTable {
    /// Build a table, clearing any row field whose column is not declared.
    pub fn new(year: i32, columns: ColumnSet, mut rows: Vec<PlayerSeason>) -> Self {
        for column in Column::ALL {
            if !columns.contains(column) {
                for row in &mut rows {
                    row.clear(column);
                }
            }
        }
        SeasonTable {
            year,
            columns,
            rows,
        }
    }

    /// A table with no rows and no columns.
    pub fn empty(year: i32) -> Self {
        SeasonTable {
            year,
            columns: ColumnSet::new(),
            rows: Vec::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(column)
    }

    pub fn rows(&self) -> &[PlayerSeason] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A new table with this table's schema and the given rows.
    pub fn with_rows(&self, rows: Vec<PlayerSeason>) -> SeasonTable {
        SeasonTable {
            year: self.year,
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Largest value of a numeric column, ignoring missing and non-finite
    /// cells. `None` when the column is absent or has no values.
    pub fn max_of(&self, column: Column) -> Option<f64> {
        if !self.has_column(column) {
            return None;
        }
        self.rows
            .iter()
            .filter_map(|r| r.numeric(column))
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                Some(m) if m >= v => Some(m),
                _ => Some(v),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
