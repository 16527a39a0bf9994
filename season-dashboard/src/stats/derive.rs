// Metric derivation: OPS computation and projection to the display columns.

use super::model::{Column, ColumnSet, SeasonTable};

/// Columns kept by `derive_and_project`, in display order.
pub const DISPLAY_COLUMNS: [Column; 6] = [
    Column::Name,
    Column::WAR,
    Column::OPS,
    Column::HR,
    Column::AVG,
    Column::Team,
];

/// Add OPS (when OBP and SLG are both present) and project the table down to
/// whichever display columns it actually has.
///
/// An empty table is returned unchanged. Columns outside `DISPLAY_COLUMNS`
/// are dropped without complaint, so older seasons that lack some statistics
/// degrade to fewer columns instead of failing.
pub fn derive_and_project(table: &SeasonTable) -> SeasonTable {
    if table.is_empty() {
        return table.clone();
    }

    let mut columns = table.columns().clone();
    let mut rows = table.rows().to_vec();

    if columns.contains(Column::OBP) && columns.contains(Column::SLG) {
        for row in &mut rows {
            row.ops = match (row.obp, row.slg) {
                (Some(obp), Some(slg)) => Some(obp + slg),
                _ => None,
            };
        }
        columns.insert(Column::OPS);
    }

    let display: ColumnSet = DISPLAY_COLUMNS.into_iter().collect();
    SeasonTable::new(table.year(), columns.intersection(&display), rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
