// Local CSV season files.
//
// Reads `{dir}/{year}.csv`, one player per row with a header line. Known
// columns are detected from the header (see `Column::from_header`); any other
// columns are ignored. A column is declared present whenever its header
// exists, even if some cells are blank.

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use super::fangraphs::strip_html;
use super::model::{Column, ColumnSet, PlayerSeason, SeasonTable};
use super::provider::{FetchError, SeasonProvider};

pub struct CsvSeasonProvider {
    dir: PathBuf,
}

impl CsvSeasonProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding `year`.
    pub fn season_path(&self, year: i32) -> PathBuf {
        self.dir.join(format!("{year}.csv"))
    }
}

#[async_trait]
impl SeasonProvider for CsvSeasonProvider {
    async fn fetch_season(
        &self,
        year: i32,
        min_qualified: u32,
    ) -> Result<SeasonTable, FetchError> {
        let path = self.season_path(year);
        info!("Loading {} batting table from {}", year, path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|e| FetchError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let table = load_season_from_reader(year, bytes.as_slice()).map_err(|e| match e {
            CsvLoadError::Csv(source) => FetchError::Csv {
                path: path.display().to_string(),
                source,
            },
            e @ CsvLoadError::MissingName => {
                FetchError::Decode(format!("{}: {e}", path.display()))
            }
        })?;

        Ok(apply_qualifier(table, min_qualified))
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader (enables testing without temp files)
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
enum CsvLoadError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("header has no Name column")]
    MissingName,
}

fn load_season_from_reader<R: Read>(year: i32, rdr: R) -> Result<SeasonTable, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);

    let headers = reader.headers()?.clone();
    let mut layout: Vec<(usize, Column)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(header) {
            // First occurrence wins (e.g. both "Name" and "PlayerName").
            if !layout.iter().any(|(_, c)| *c == column) {
                layout.push((idx, column));
            }
        }
    }

    if !layout.iter().any(|(_, c)| *c == Column::Name) {
        return Err(CsvLoadError::MissingName);
    }
    let columns: ColumnSet = layout.iter().map(|(_, c)| *c).collect();

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed CSV row {}: {}", line + 2, e);
                continue;
            }
        };

        let mut row = PlayerSeason::default();
        for &(idx, column) in &layout {
            let cell = record.get(idx).map(str::trim).unwrap_or("");
            if cell.is_empty() {
                continue;
            }
            match column {
                Column::Name => row.name = strip_html(cell).trim().to_string(),
                Column::Team => row.team = Some(strip_html(cell).trim().to_string()),
                Column::PA => row.pa = parse_count(cell, column, line),
                Column::HR => row.hr = parse_count(cell, column, line),
                Column::OBP => row.obp = parse_rate(cell, column, line),
                Column::SLG => row.slg = parse_rate(cell, column, line),
                Column::WAR => row.war = parse_rate(cell, column, line),
                Column::AVG => row.avg = parse_rate(cell, column, line),
                Column::OPS => row.ops = parse_rate(cell, column, line),
            }
        }

        if row.name.is_empty() {
            warn!("skipping CSV row {}: no player name", line + 2);
            continue;
        }
        rows.push(row);
    }

    Ok(SeasonTable::new(year, columns, rows))
}

fn parse_rate(cell: &str, column: Column, line: usize) -> Option<f64> {
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!("row {}: unreadable {} value '{}'", line + 2, column, cell);
            None
        }
    }
}

fn parse_count(cell: &str, column: Column, line: usize) -> Option<u32> {
    parse_rate(cell, column, line)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u32)
}

/// Drop players below the qualifying threshold. Tables without a PA column
/// cannot be qualified and are returned whole.
fn apply_qualifier(table: SeasonTable, min_qualified: u32) -> SeasonTable {
    if !table.has_column(Column::PA) {
        return table;
    }
    let rows = table
        .rows()
        .iter()
        .filter(|r| r.pa.is_some_and(|pa| pa >= min_qualified))
        .cloned()
        .collect();
    table.with_rows(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
