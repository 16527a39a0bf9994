// Row filters over a season table: plate-appearance threshold and team.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::model::{Column, SeasonTable};

/// Selector label meaning "no team filter".
pub const ALL_TEAMS: &str = "All";

/// Team selection for the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamFilter {
    #[default]
    All,
    Team(String),
}

impl TeamFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, TeamFilter::All)
    }
}

impl FromStr for TeamFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_TEAMS {
            Ok(TeamFilter::All)
        } else {
            Ok(TeamFilter::Team(s.to_string()))
        }
    }
}

impl fmt::Display for TeamFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamFilter::All => f.write_str(ALL_TEAMS),
            TeamFilter::Team(t) => f.write_str(t),
        }
    }
}

/// Keep rows with at least `min_pa` plate appearances. Rows without a PA
/// value cannot meet the threshold and are dropped. A table with no PA
/// column cannot be thresholded and is returned whole.
pub fn filter_by_pa(table: &SeasonTable, min_pa: u32) -> SeasonTable {
    if !table.has_column(Column::PA) {
        return table.clone();
    }
    let rows = table
        .rows()
        .iter()
        .filter(|r| r.pa.is_some_and(|pa| pa >= min_pa))
        .cloned()
        .collect();
    table.with_rows(rows)
}

/// Keep rows whose team exactly matches the filter. `TeamFilter::All`
/// returns an identical table.
pub fn filter_by_team(table: &SeasonTable, team: &TeamFilter) -> SeasonTable {
    let TeamFilter::Team(wanted) = team else {
        return table.clone();
    };
    let rows = table
        .rows()
        .iter()
        .filter(|r| r.team.as_deref() == Some(wanted.as_str()))
        .cloned()
        .collect();
    table.with_rows(rows)
}

/// Selector options: `"All"` followed by the distinct non-null teams in the
/// table, sorted ascending.
pub fn team_options(table: &SeasonTable) -> Vec<String> {
    let teams: BTreeSet<&str> = table
        .rows()
        .iter()
        .filter_map(|r| r.team.as_deref())
        .collect();

    std::iter::once(ALL_TEAMS.to_string())
        .chain(teams.into_iter().map(str::to_string))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
