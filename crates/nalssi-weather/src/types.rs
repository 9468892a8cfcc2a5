//! Weather data model and error types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nalssi_core::ConfigError;

/// One half-day (or whole-day) slice of a mid-range forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartForecast {
    /// Condition text as the agency reports it, e.g. "맑음", "흐리고 비".
    pub weather: Option<String>,
    /// Rain probability in percent.
    pub rain_probability: Option<i32>,
}

/// Per-day forecast granularity.
///
/// Days 4–7 are reported in morning/afternoon halves; days 8–10 only as a
/// single daily value. The enum makes the two shapes mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayParts {
    HalfDay {
        morning: PartForecast,
        afternoon: PartForecast,
    },
    FullDay {
        daily: PartForecast,
    },
}

/// One day of the mid-range land forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayForecast {
    /// Days ahead of the bulletin date (4..=10).
    pub day: u8,
    /// Display date, e.g. "5월 14일 (화)".
    pub date: String,
    #[serde(flatten)]
    pub parts: DayParts,
}

impl DayForecast {
    pub fn morning(&self) -> Option<&PartForecast> {
        match &self.parts {
            DayParts::HalfDay { morning, .. } => Some(morning),
            DayParts::FullDay { .. } => None,
        }
    }

    pub fn afternoon(&self) -> Option<&PartForecast> {
        match &self.parts {
            DayParts::HalfDay { afternoon, .. } => Some(afternoon),
            DayParts::FullDay { .. } => None,
        }
    }

    pub fn daily(&self) -> Option<&PartForecast> {
        match &self.parts {
            DayParts::HalfDay { .. } => None,
            DayParts::FullDay { daily } => Some(daily),
        }
    }

    /// Condition to show for the day: afternoon, then daily, then morning.
    pub fn display_weather(&self) -> Option<&str> {
        self.afternoon()
            .and_then(|p| p.weather.as_deref())
            .or_else(|| self.daily().and_then(|p| p.weather.as_deref()))
            .or_else(|| self.morning().and_then(|p| p.weather.as_deref()))
    }
}

/// Normalized mid-range land forecast for one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandForecast {
    pub reg_id: String,
    /// Bulletin timestamp the forecast was issued at, `YYYYMMDDHHmm`.
    pub tm_fc: String,
    pub forecast: Vec<DayForecast>,
    pub last_update: DateTime<Utc>,
}

impl LandForecast {
    pub fn day(&self, day: u8) -> Option<&DayForecast> {
        self.forecast.iter().find(|f| f.day == day)
    }
}

/// A single temperature reading, kept as the agency's nested shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempReading {
    pub temp: Option<i32>,
}

/// Min/max temperature forecast for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureEntry {
    pub day: u8,
    pub min_temp: TempReading,
    pub max_temp: TempReading,
}

impl TemperatureEntry {
    pub fn min(&self) -> Option<i32> {
        self.min_temp.temp
    }

    pub fn max(&self) -> Option<i32> {
        self.max_temp.temp
    }
}

/// Normalized mid-range temperature forecast for one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureForecast {
    pub reg_id: String,
    pub tm_fc: String,
    pub temperatures: Vec<TemperatureEntry>,
    pub last_update: DateTime<Utc>,
}

impl TemperatureForecast {
    pub fn day(&self, day: u8) -> Option<&TemperatureEntry> {
        self.temperatures.iter().find(|t| t.day == day)
    }
}

/// Free-text long-range outlook for one station. No per-day structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlookSummary {
    pub stn_id: String,
    pub tm_fc: String,
    pub outlook: String,
    pub last_update: DateTime<Utc>,
}

/// The three raw sources as fetched for one request.
///
/// Each source degrades independently to `None` on failure; the calendar
/// annotates cells from whatever survived.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeatherSources {
    pub forecast: Option<LandForecast>,
    pub temperature: Option<TemperatureForecast>,
    pub outlook: Option<OutlookSummary>,
}

/// One entry of the 5-day display forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Day label: "오늘", "내일", or "수요일".
    pub day: String,
    /// Display date, e.g. "5월 12일".
    pub date: String,
    pub condition: String,
    pub high: i32,
    pub low: i32,
    pub icon: String,
}

/// Merged weather view for the UI: a current-conditions estimate plus a
/// 5-day display forecast and the outlook narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedWeather {
    pub location: String,
    pub temperature: i32,
    pub condition: String,
    pub humidity: u8,
    pub wind_speed: u8,
    pub visibility: u8,
    pub feels_like: i32,
    pub icon: String,
    pub forecast: Vec<ForecastEntry>,
    pub outlook: String,
    pub last_update: DateTime<Utc>,
}

/// Weather pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API 요청 실패: {0}")]
    Transport(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API 에러: {0}")]
    Upstream(String),

    #[error("예보 데이터가 없습니다.")]
    NoData,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("날씨 데이터를 가져오는 중 오류가 발생했습니다: {0}")]
    Aggregation(String),
}

impl WeatherError {
    /// HTTP-equivalent status for surfacing a single fetcher directly,
    /// distinguishing "bad configuration" from "no data" from "upstream".
    pub fn status_code(&self) -> u16 {
        match self {
            WeatherError::Config(_) => 500,
            WeatherError::NoData => 404,
            WeatherError::Transport(_)
            | WeatherError::Network(_)
            | WeatherError::Upstream(_)
            | WeatherError::Parse(_) => 502,
            WeatherError::Aggregation(_) => 500,
        }
    }

    /// User-friendly message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Config(_) => "API 키가 설정되지 않았습니다.",
            WeatherError::NoData => "예보 데이터가 없습니다.",
            WeatherError::Transport(_) | WeatherError::Network(_) => {
                "기상청 서버에 연결할 수 없습니다. 잠시 후 다시 시도해주세요."
            }
            WeatherError::Upstream(_) | WeatherError::Parse(_) => {
                "기상청 응답을 처리하지 못했습니다. 잠시 후 다시 시도해주세요."
            }
            WeatherError::Aggregation(_) => "날씨 데이터를 가져오는 중 오류가 발생했습니다.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(weather: Option<&str>, rain: Option<i32>) -> PartForecast {
        PartForecast {
            weather: weather.map(str::to_string),
            rain_probability: rain,
        }
    }

    #[test]
    fn test_half_day_has_no_daily() {
        let forecast = DayForecast {
            day: 5,
            date: "5월 14일 (화)".to_string(),
            parts: DayParts::HalfDay {
                morning: part(Some("맑음"), Some(10)),
                afternoon: part(Some("구름많음"), Some(30)),
            },
        };

        assert!(forecast.morning().is_some());
        assert!(forecast.afternoon().is_some());
        assert!(forecast.daily().is_none());
    }

    #[test]
    fn test_full_day_has_no_halves() {
        let forecast = DayForecast {
            day: 9,
            date: "5월 18일 (토)".to_string(),
            parts: DayParts::FullDay {
                daily: part(Some("비"), Some(70)),
            },
        };

        assert!(forecast.morning().is_none());
        assert!(forecast.afternoon().is_none());
        assert!(forecast.daily().is_some());
    }

    #[test]
    fn test_display_weather_prefers_afternoon() {
        let forecast = DayForecast {
            day: 4,
            date: "5월 13일 (월)".to_string(),
            parts: DayParts::HalfDay {
                morning: part(Some("맑음"), None),
                afternoon: part(Some("비"), None),
            },
        };
        assert_eq!(forecast.display_weather(), Some("비"));
    }

    #[test]
    fn test_display_weather_falls_back_to_morning() {
        let forecast = DayForecast {
            day: 4,
            date: "5월 13일 (월)".to_string(),
            parts: DayParts::HalfDay {
                morning: part(Some("맑음"), None),
                afternoon: part(None, None),
            },
        };
        assert_eq!(forecast.display_weather(), Some("맑음"));
    }

    #[test]
    fn test_day_forecast_serializes_flat() {
        let forecast = DayForecast {
            day: 8,
            date: "5월 17일 (금)".to_string(),
            parts: DayParts::FullDay {
                daily: part(Some("맑음"), Some(20)),
            },
        };

        let json = serde_json::to_value(&forecast).unwrap();
        assert_eq!(json["day"], 8);
        assert!(json.get("daily").is_some());
        assert!(json.get("morning").is_none());
        assert!(json.get("afternoon").is_none());
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(WeatherError::NoData.status_code(), 404);
        assert_eq!(WeatherError::Transport(503).status_code(), 502);
        assert_eq!(
            WeatherError::Upstream("SERVICE_KEY_IS_NOT_REGISTERED_ERROR".to_string()).status_code(),
            502
        );
        assert_eq!(
            WeatherError::Config(ConfigError::MissingSetting("OPENAPI_KEY".to_string()))
                .status_code(),
            500
        );
    }
}
