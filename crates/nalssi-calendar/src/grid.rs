//! Monthly calendar grid builder.
//!
//! Emits a fixed 42-cell (6 week) Sunday-first grid for a month, resolving
//! each day's weather by its distance from today: nothing beyond 10 days,
//! a fixed estimate for days 0–3 (no short-range API exists) and mid-range
//! data for days 4–10.

use std::collections::HashMap;

use chrono::{Datelike, Days, Local, NaiveDate};

use nalssi_weather::condition::translate_condition;
use nalssi_weather::{LandForecast, TemperatureForecast};

use crate::types::{CalendarCell, Memo};

/// 6 weeks, rendered regardless of how far cells trail into neighboring
/// months.
const GRID_CELLS: u64 = 42;

/// Last day covered by mid-range data.
const MID_RANGE_END: i64 = 10;
/// Days 0..=3 show a fixed estimate instead of forecast data.
const ESTIMATE_END: i64 = 3;
const MID_RANGE_START: i64 = 4;

const ESTIMATE_CONDITION: &str = "Clear";
const ESTIMATE_HIGH: i32 = 25;
const ESTIMATE_LOW: i32 = 15;

const PLACEHOLDER: &str = "-";

struct CellWeather {
    condition: String,
    high: Option<i32>,
    low: Option<i32>,
    has_data: bool,
}

impl CellWeather {
    fn placeholder() -> Self {
        Self {
            condition: PLACEHOLDER.to_string(),
            high: None,
            low: None,
            has_data: false,
        }
    }
}

/// Resolve a cell's weather by its whole-day distance from today.
///
/// Condition and temperatures come from independent sources, so each can
/// be present or absent on its own.
fn weather_for_day(
    days_diff: i64,
    forecast: Option<&LandForecast>,
    temperature: Option<&TemperatureForecast>,
) -> CellWeather {
    let mut weather = CellWeather::placeholder();

    if !(0..=MID_RANGE_END).contains(&days_diff) {
        return weather;
    }

    if days_diff <= ESTIMATE_END {
        weather.condition = ESTIMATE_CONDITION.to_string();
        weather.high = Some(ESTIMATE_HIGH);
        weather.low = Some(ESTIMATE_LOW);
        weather.has_data = true;
        return weather;
    }

    debug_assert!((MID_RANGE_START..=MID_RANGE_END).contains(&days_diff));
    let day = days_diff as u8;

    if let Some(condition) = forecast
        .and_then(|f| f.day(day))
        .and_then(|d| d.display_weather())
    {
        weather.condition = translate_condition(condition);
        weather.has_data = true;
    }

    if let Some(temps) = temperature.and_then(|t| t.day(day)) {
        weather.high = temps.max();
        weather.low = temps.min();
        weather.has_data = true;
    }

    weather
}

/// Build the grid for a month using the current local date as "today".
pub fn build_grid(
    year: i32,
    month: u32,
    memos: &[Memo],
    forecast: Option<&LandForecast>,
    temperature: Option<&TemperatureForecast>,
) -> Vec<CalendarCell> {
    build_grid_on(
        year,
        month,
        memos,
        forecast,
        temperature,
        Local::now().date_naive(),
    )
}

/// Build the grid for a month with an explicit "today".
///
/// Returns exactly 42 consecutive days starting at the most recent Sunday
/// on or before the first of the month. An invalid year/month yields an
/// empty grid.
pub fn build_grid_on(
    year: i32,
    month: u32,
    memos: &[Memo],
    forecast: Option<&LandForecast>,
    temperature: Option<&TemperatureForecast>,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let Some(first_of_month) = NaiveDate::from_ymd_opt(year, month, 1) else {
        tracing::warn!(year, month, "invalid month for calendar grid");
        return Vec::new();
    };

    let back_to_sunday = u64::from(first_of_month.weekday().num_days_from_sunday());
    let start = first_of_month
        .checked_sub_days(Days::new(back_to_sunday))
        .unwrap_or(first_of_month);

    let memos_by_date: HashMap<&str, &Memo> =
        memos.iter().map(|memo| (memo.date.as_str(), memo)).collect();

    (0..GRID_CELLS)
        .filter_map(|i| start.checked_add_days(Days::new(i)))
        .map(|date| {
            let full_date = date.format("%Y-%m-%d").to_string();
            let days_diff = date.signed_duration_since(today).num_days();
            let weather = weather_for_day(days_diff, forecast, temperature);

            CalendarCell {
                date: date.day(),
                is_current_month: date.month() == month && date.year() == year,
                is_today: date == today,
                condition: weather.condition,
                high: weather.high,
                low: weather.low,
                memo: memos_by_date.get(full_date.as_str()).map(|m| (*m).clone()),
                days_diff,
                has_weather_data: weather.has_data,
                full_date,
            }
        })
        .collect()
}
