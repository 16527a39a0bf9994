// FanGraphs leaderboard client.
//
// Queries the major-league batting leaderboard JSON endpoint and maps its
// rows onto `PlayerSeason`. The endpoint returns `{ "data": [ {...}, ... ] }`
// where `Name` and `Team` are HTML anchors and `PlayerName` / `TeamNameAbb`
// carry the plain text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::model::{Column, ColumnSet, PlayerSeason, SeasonTable};
use super::provider::{FetchError, SeasonProvider};

/// Leaderboard type 8 is the standard dashboard stat set (includes WAR).
const LEADERBOARD_TYPE: &str = "8";

pub struct FanGraphsProvider {
    http: reqwest::Client,
    base_url: String,
    page_items: u32,
}

impl FanGraphsProvider {
    pub fn new(base_url: String, timeout_secs: u64, page_items: u32) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url,
            page_items,
        })
    }
}

#[async_trait]
impl SeasonProvider for FanGraphsProvider {
    async fn fetch_season(
        &self,
        year: i32,
        min_qualified: u32,
    ) -> Result<SeasonTable, FetchError> {
        let season = year.to_string();
        let qual = min_qualified.to_string();
        let page_items = self.page_items.to_string();

        info!("Requesting {} batting leaderboard from FanGraphs", year);
        let response = self
            .http
            .get(&self.base_url)
            .header(USER_AGENT, "Mozilla/5.0")
            .query(&[
                ("pos", "all"),
                ("stats", "bat"),
                ("lg", "all"),
                ("qual", qual.as_str()),
                ("season", season.as_str()),
                ("season1", season.as_str()),
                ("ind", "0"),
                ("type", LEADERBOARD_TYPE),
                ("pageitems", page_items.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "FanGraphs response received");
        parse_leaderboard(year, &body)
    }

    fn name(&self) -> &'static str {
        "fangraphs"
    }
}

// ---------------------------------------------------------------------------
// JSON parsing
// ---------------------------------------------------------------------------

/// Parse a leaderboard response body into a season table.
///
/// A column is declared present when at least one row carries a non-null
/// value for it, so seasons where FanGraphs has no data for a statistic
/// come back without that column.
pub fn parse_leaderboard(year: i32, body: &str) -> Result<SeasonTable, FetchError> {
    let v: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(format!("invalid JSON: {e}")))?;

    let data = v
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Decode("missing `data` array".into()))?;

    let mut columns = ColumnSet::new();
    let mut rows = Vec::with_capacity(data.len());

    for entry in data {
        let Some(obj) = entry.as_object() else {
            continue;
        };
        let Some(name) = text_field(obj, "PlayerName", "Name") else {
            continue;
        };

        let row = PlayerSeason {
            name,
            team: text_field(obj, "TeamNameAbb", "Team"),
            pa: count(obj, "PA"),
            obp: number(obj, "OBP"),
            slg: number(obj, "SLG"),
            war: number(obj, "WAR"),
            hr: count(obj, "HR"),
            avg: number(obj, "AVG"),
            ops: number(obj, "OPS"),
        };

        columns.insert(Column::Name);
        for column in Column::ALL {
            let present = match column {
                Column::Name => true,
                Column::Team => row.team.is_some(),
                other => row.numeric(other).is_some(),
            };
            if present {
                columns.insert(column);
            }
        }
        rows.push(row);
    }

    Ok(SeasonTable::new(year, columns, rows))
}

/// Plain-text field, preferring `primary` and falling back to `fallback`
/// with any HTML markup stripped. Blank values are treated as missing.
fn text_field(obj: &Map<String, Value>, primary: &str, fallback: &str) -> Option<String> {
    let raw = obj
        .get(primary)
        .and_then(Value::as_str)
        .or_else(|| obj.get(fallback).and_then(Value::as_str))?;
    let text = strip_html(raw);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Numeric field that may arrive as a JSON number or a numeric string.
fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = obj.get(key)?;
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn count(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    number(obj, key)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u32)
}

/// Remove `<...>` tags, keeping the text between them.
pub(crate) fn strip_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
