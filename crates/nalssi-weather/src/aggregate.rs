//! Weather aggregation.
//!
//! Orchestrates the three mid-range fetches for a location and merges them
//! into the single [`AggregatedWeather`] view the UI consumes. Sources fail
//! independently: a missing outlook never blocks forecast display, and a
//! failure of the orchestration itself degrades to a synthetic fallback
//! object instead of an error.

use chrono::{Days, Local, NaiveDateTime, Timelike, Utc};

use nalssi_core::WeatherApiConfig;

use crate::client::KmaClient;
use crate::condition::{icon_key, translate_condition};
use crate::labels::{date_label, day_label};
use crate::region::resolve;
use crate::types::{AggregatedWeather, ForecastEntry, WeatherError, WeatherSources};

/// Number of entries in the short-range display forecast.
const DISPLAY_DAYS: u8 = 5;
/// Display day `i` maps to mid-range day `i + 4`, the earliest day with
/// real data. There is no short-range API, so days before that show
/// literal defaults rather than extrapolations.
const MID_RANGE_OFFSET: u8 = 4;

const DEFAULT_CONDITION: &str = "맑음";
const DEFAULT_HIGH: i32 = 25;
const DEFAULT_LOW: i32 = 15;

/// Fixed current-conditions values; no live source exists for these.
const DEFAULT_HUMIDITY: u8 = 65;
const DEFAULT_WIND_SPEED: u8 = 8;
const DEFAULT_VISIBILITY: u8 = 10;

const OUTLOOK_LOADING: &str = "기상 전망 정보를 불러오는 중입니다.";
const OUTLOOK_UNAVAILABLE: &str = "현재 날씨 정보를 불러올 수 없습니다. 잠시 후 다시 시도해주세요.";

/// Fetches and merges weather data for a location.
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: KmaClient,
}

impl WeatherService {
    /// # Errors
    ///
    /// Fails only when the underlying HTTP client cannot be built.
    pub fn new(config: &WeatherApiConfig) -> Result<Self, WeatherError> {
        Ok(Self {
            client: KmaClient::new(config)?,
        })
    }

    pub fn with_client(client: KmaClient) -> Self {
        Self { client }
    }

    /// Fetch the three sources concurrently, tolerating each failure.
    ///
    /// Individual fetch errors are logged and degrade that source to
    /// `None`.
    ///
    /// # Errors
    ///
    /// Only fails when a fetch task itself dies (a panic, not an upstream
    /// error); callers treat that as an aggregation failure.
    pub async fn fetch_all(&self, location: &str) -> Result<WeatherSources, WeatherError> {
        self.fetch_all_at(location, Local::now().naive_local())
            .await
    }

    pub async fn fetch_all_at(
        &self,
        location: &str,
        now: NaiveDateTime,
    ) -> Result<WeatherSources, WeatherError> {
        let codes = resolve(location);

        let forecast_task = tokio::spawn({
            let client = self.client.clone();
            let reg_id = codes.land_forecast_region.clone();
            async move { client.mid_land_forecast_at(&reg_id, now).await }
        });
        let temperature_task = tokio::spawn({
            let client = self.client.clone();
            let reg_id = codes.temperature_region.clone();
            async move { client.mid_temperature_at(&reg_id, now).await }
        });
        let outlook_task = tokio::spawn({
            let client = self.client.clone();
            let stn_id = codes.outlook_station.clone();
            async move { client.mid_outlook_at(&stn_id, now).await }
        });

        let (forecast, temperature, outlook) =
            tokio::join!(forecast_task, temperature_task, outlook_task);

        Ok(WeatherSources {
            forecast: settle(forecast, "mid_land_forecast")?,
            temperature: settle(temperature, "mid_temperature")?,
            outlook: settle(outlook, "mid_outlook")?,
        })
    }

    /// Aggregate weather for a location. Never fails: internal errors
    /// degrade to defaults or, for orchestration failures, to a fully
    /// synthetic fallback object.
    pub async fn aggregate(&self, location: &str) -> AggregatedWeather {
        self.aggregate_at(location, Local::now().naive_local()).await
    }

    pub async fn aggregate_at(&self, location: &str, now: NaiveDateTime) -> AggregatedWeather {
        match self.fetch_all_at(location, now).await {
            Ok(sources) => combine(location, &sources, now),
            Err(err) => {
                tracing::error!(error = %err, location, "weather aggregation failed");
                fallback_weather(location, now)
            }
        }
    }
}

fn settle<T>(
    result: Result<Result<T, WeatherError>, tokio::task::JoinError>,
    source: &str,
) -> Result<Option<T>, WeatherError> {
    match result {
        Ok(Ok(value)) => Ok(Some(value)),
        Ok(Err(err)) => {
            tracing::warn!(source, error = %err, "weather source unavailable");
            Ok(None)
        }
        Err(err) => Err(WeatherError::Aggregation(err.to_string())),
    }
}

/// Merge whatever sources survived into the display model.
///
/// Current conditions are an estimate: the first mid-range forecast entry
/// supplies the condition, and the first temperature entry the temperature
/// (before 14:00 local, min + 3; after, max − 2). Humidity, wind and
/// visibility are fixed values — no live source reports them.
pub fn combine(location: &str, sources: &WeatherSources, now: NaiveDateTime) -> AggregatedWeather {
    let today = now.date();

    let mut condition = "Clear".to_string();
    let mut icon = "sunny".to_string();
    if let Some(first) = sources.forecast.as_ref().and_then(|f| f.forecast.first()) {
        let weather = first
            .morning()
            .and_then(|p| p.weather.as_deref())
            .or_else(|| first.daily().and_then(|p| p.weather.as_deref()))
            .unwrap_or(DEFAULT_CONDITION);
        condition = translate_condition(weather);
        icon = icon_key(weather).to_string();
    }

    let mut temperature = 20;
    let mut feels_like = 22;
    if let Some(first) = sources
        .temperature
        .as_ref()
        .and_then(|t| t.temperatures.first())
    {
        let min = first.min().unwrap_or(DEFAULT_LOW);
        let max = first.max().unwrap_or(DEFAULT_HIGH);
        temperature = if now.hour() < 14 { min + 3 } else { max - 2 };
        feels_like = temperature + 2;
    }

    let forecast = (0..DISPLAY_DAYS)
        .map(|i| {
            let date = today
                .checked_add_days(Days::new(u64::from(i)))
                .unwrap_or(today);
            let mid_range_day = i + MID_RANGE_OFFSET;

            let weather = sources
                .forecast
                .as_ref()
                .and_then(|f| f.day(mid_range_day))
                .and_then(|d| d.display_weather())
                .unwrap_or(DEFAULT_CONDITION);

            let temps = sources
                .temperature
                .as_ref()
                .and_then(|t| t.day(mid_range_day));

            ForecastEntry {
                day: day_label(date, i),
                date: date_label(date),
                condition: translate_condition(weather),
                high: temps.and_then(|t| t.max()).unwrap_or(DEFAULT_HIGH),
                low: temps.and_then(|t| t.min()).unwrap_or(DEFAULT_LOW),
                icon: icon_key(weather).to_string(),
            }
        })
        .collect();

    AggregatedWeather {
        location: location.to_string(),
        temperature,
        condition,
        humidity: DEFAULT_HUMIDITY,
        wind_speed: DEFAULT_WIND_SPEED,
        visibility: DEFAULT_VISIBILITY,
        feels_like,
        icon,
        forecast,
        outlook: sources
            .outlook
            .as_ref()
            .map(|o| o.outlook.clone())
            .unwrap_or_else(|| OUTLOOK_LOADING.to_string()),
        last_update: Utc::now(),
    }
}

/// Fully synthetic weather object for when orchestration itself failed.
pub fn fallback_weather(location: &str, now: NaiveDateTime) -> AggregatedWeather {
    let today = now.date();

    let forecast = (0..DISPLAY_DAYS)
        .map(|i| {
            let date = today
                .checked_add_days(Days::new(u64::from(i)))
                .unwrap_or(today);
            ForecastEntry {
                day: day_label(date, i),
                date: date_label(date),
                condition: "Clear".to_string(),
                high: DEFAULT_HIGH,
                low: DEFAULT_LOW,
                icon: "sunny".to_string(),
            }
        })
        .collect();

    AggregatedWeather {
        location: location.to_string(),
        temperature: 22,
        condition: "Clear".to_string(),
        humidity: DEFAULT_HUMIDITY,
        wind_speed: DEFAULT_WIND_SPEED,
        visibility: DEFAULT_VISIBILITY,
        feels_like: 24,
        icon: "sunny".to_string(),
        forecast,
        outlook: OUTLOOK_UNAVAILABLE.to_string(),
        last_update: Utc::now(),
    }
}
