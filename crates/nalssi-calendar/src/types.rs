//! Calendar cell and memo types.

use serde::{Deserialize, Serialize};

/// A user memo attached to one calendar day.
///
/// Owned and persisted elsewhere; the grid only reads memos to annotate
/// cells. Uniqueness per (user, date) is guaranteed upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// "YYYY-MM-DD"
    pub date: String,
    pub title: String,
    pub content: String,
    pub color: String,
}

/// One cell of the 42-cell monthly grid.
///
/// Recomputed in full on every request; never persisted or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    /// Day of month (1-31).
    pub date: u32,
    /// "YYYY-MM-DD"
    pub full_date: String,
    pub is_current_month: bool,
    pub is_today: bool,
    /// Display condition; "-" when no data exists for the day.
    pub condition: String,
    pub high: Option<i32>,
    pub low: Option<i32>,
    pub memo: Option<Memo>,
    /// Whole days between today and this cell (negative for the past).
    pub days_diff: i64,
    pub has_weather_data: bool,
}
