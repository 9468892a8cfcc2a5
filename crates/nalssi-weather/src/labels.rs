//! Korean display labels for dates.

use chrono::{Datelike, NaiveDate};

const WEEKDAY_NAMES: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Single-character weekday name, Sunday first.
pub fn weekday_kr(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// "5월 12일"
pub fn date_label(date: NaiveDate) -> String {
    format!("{}월 {}일", date.month(), date.day())
}

/// "5월 12일 (일)" — used for forecast day headings.
pub fn forecast_date_label(date: NaiveDate) -> String {
    format!("{} ({})", date_label(date), weekday_kr(date))
}

/// Day label for the short-range list: 오늘, 내일, then "X요일".
pub fn day_label(date: NaiveDate, days_from_today: u8) -> String {
    match days_from_today {
        0 => "오늘".to_string(),
        1 => "내일".to_string(),
        _ => format!("{}요일", weekday_kr(date)),
    }
}
