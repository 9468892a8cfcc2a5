//! KMA mid-range forecast API client.
//!
//! All three endpoints share one request/envelope convention: a GET with
//! the service key, fixed paging, `dataType=JSON`, a region/station code
//! and the bulletin timestamp; the response wraps a single-region item in
//! `response.body.items.item` and signals failure through
//! `response.header.resultCode != "00"`.

use std::time::Duration;

use chrono::{Days, Local, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use nalssi_core::WeatherApiConfig;

use crate::bulletin::Bulletin;
use crate::fields::{field_key, int_field, str_field, DaySlot};
use crate::labels::forecast_date_label;
use crate::types::{
    DayForecast, DayParts, LandForecast, OutlookSummary, PartForecast, TempReading,
    TemperatureEntry, TemperatureForecast, WeatherError,
};

const NUM_OF_ROWS: &str = "10";
const PAGE_NO: &str = "1";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const SUCCESS_CODE: &str = "00";

/// Last forecast day covered by a mid-range bulletin.
const LAST_DAY: u8 = 10;
/// First day reported as a single whole-day value instead of halves.
const FULL_DAY_FROM: u8 = 8;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response: ResponseEnvelope,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    header: ResponseHeader,
    #[serde(default)]
    body: Option<ResponseBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseHeader {
    result_code: String,
    result_msg: Option<String>,
}

/// `items` is an object with an `item` array on success, but the agency
/// sends an empty string when there is nothing to report, so it stays raw.
#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    items: Value,
}

/// Client for the KMA mid-range forecast service.
#[derive(Debug, Clone)]
pub struct KmaClient {
    client: Client,
    service_key: String,
    base_url: String,
}

impl KmaClient {
    /// Build a client from the weather API config.
    ///
    /// The portal issues the service key percent-encoded; it is decoded
    /// exactly once here and re-encoded on the wire by the HTTP layer.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: &WeatherApiConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let service_key = urlencoding::decode(&config.service_key)
            .map(|k| k.into_owned())
            .unwrap_or_else(|_| config.service_key.clone());

        Ok(Self {
            client,
            service_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 중기육상예보: per-day conditions for days 4–10.
    #[instrument(skip(self), level = "info")]
    pub async fn mid_land_forecast(&self, reg_id: &str) -> Result<LandForecast, WeatherError> {
        self.mid_land_forecast_at(reg_id, Local::now().naive_local())
            .await
    }

    /// Same as [`mid_land_forecast`](Self::mid_land_forecast) with an
    /// explicit wall-clock time, so bulletin selection is testable.
    pub async fn mid_land_forecast_at(
        &self,
        reg_id: &str,
        now: NaiveDateTime,
    ) -> Result<LandForecast, WeatherError> {
        let bulletin = Bulletin::latest_at(now);
        let item = self
            .first_item("getMidLandFcst", ("regId", reg_id), bulletin)
            .await?;

        let mut forecast = Vec::new();
        for day in bulletin.start_day()..=LAST_DAY {
            let date = now
                .date()
                .checked_add_days(Days::new(u64::from(day)))
                .map(forecast_date_label)
                .unwrap_or_default();

            let parts = if day >= FULL_DAY_FROM {
                DayParts::FullDay {
                    daily: part(&item, day, DaySlot::Daily),
                }
            } else {
                DayParts::HalfDay {
                    morning: part(&item, day, DaySlot::Am),
                    afternoon: part(&item, day, DaySlot::Pm),
                }
            };

            forecast.push(DayForecast { day, date, parts });
        }

        Ok(LandForecast {
            reg_id: str_field(&item, "regId").unwrap_or_else(|| reg_id.to_string()),
            tm_fc: bulletin.tm_fc(),
            forecast,
            last_update: Utc::now(),
        })
    }

    /// 중기기온예보: per-day min/max temperatures for days 4–10.
    #[instrument(skip(self), level = "info")]
    pub async fn mid_temperature(&self, reg_id: &str) -> Result<TemperatureForecast, WeatherError> {
        self.mid_temperature_at(reg_id, Local::now().naive_local())
            .await
    }

    pub async fn mid_temperature_at(
        &self,
        reg_id: &str,
        now: NaiveDateTime,
    ) -> Result<TemperatureForecast, WeatherError> {
        let bulletin = Bulletin::latest_at(now);
        let item = self
            .first_item("getMidTa", ("regId", reg_id), bulletin)
            .await?;

        let temperatures = (bulletin.start_day()..=LAST_DAY)
            .map(|day| TemperatureEntry {
                day,
                min_temp: TempReading {
                    temp: int_field(&item, &field_key("taMin", day, DaySlot::Daily)),
                },
                max_temp: TempReading {
                    temp: int_field(&item, &field_key("taMax", day, DaySlot::Daily)),
                },
            })
            .collect();

        Ok(TemperatureForecast {
            reg_id: str_field(&item, "regId").unwrap_or_else(|| reg_id.to_string()),
            tm_fc: bulletin.tm_fc(),
            temperatures,
            last_update: Utc::now(),
        })
    }

    /// 중기전망: free-text outlook narrative for a station.
    #[instrument(skip(self), level = "info")]
    pub async fn mid_outlook(&self, stn_id: &str) -> Result<OutlookSummary, WeatherError> {
        self.mid_outlook_at(stn_id, Local::now().naive_local()).await
    }

    pub async fn mid_outlook_at(
        &self,
        stn_id: &str,
        now: NaiveDateTime,
    ) -> Result<OutlookSummary, WeatherError> {
        let bulletin = Bulletin::latest_at(now);
        let item = self
            .first_item("getMidFcst", ("stnId", stn_id), bulletin)
            .await?;

        Ok(OutlookSummary {
            stn_id: stn_id.to_string(),
            tm_fc: bulletin.tm_fc(),
            outlook: str_field(&item, "wfSv")
                .unwrap_or_else(|| "기상전망 정보가 없습니다.".to_string()),
            last_update: Utc::now(),
        })
    }

    /// Issue one request and pull the single-region item out of the
    /// envelope, mapping each failure mode to its error.
    async fn first_item(
        &self,
        path: &str,
        region_param: (&str, &str),
        bulletin: Bulletin,
    ) -> Result<Value, WeatherError> {
        let url = format!("{}/{}", self.base_url, path);
        let tm_fc = bulletin.tm_fc();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("numOfRows", NUM_OF_ROWS),
                ("pageNo", PAGE_NO),
                ("dataType", "JSON"),
                region_param,
                ("tmFc", tm_fc.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Transport(status.as_u16()));
        }

        let envelope: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let header = envelope.response.header;
        if header.result_code != SUCCESS_CODE {
            return Err(WeatherError::Upstream(
                header
                    .result_msg
                    .unwrap_or_else(|| "알 수 없는 오류".to_string()),
            ));
        }

        envelope
            .response
            .body
            .and_then(|body| body.items.get("item").cloned())
            .and_then(|items| items.as_array().and_then(|arr| arr.first().cloned()))
            .ok_or(WeatherError::NoData)
    }
}

fn part(item: &Value, day: u8, slot: DaySlot) -> PartForecast {
    PartForecast {
        weather: str_field(item, &field_key("wf", day, slot)),
        rain_probability: int_field(item, &field_key("rnSt", day, slot)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str, service_key: &str) -> KmaClient {
        let mut config = WeatherApiConfig::with_service_key(service_key);
        config.base_url = base_url.to_string();
        KmaClient::new(&config).unwrap()
    }

    fn morning(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn envelope(item: Value) -> Value {
        json!({
            "response": {
                "header": {"resultCode": "00", "resultMsg": "NORMAL_SERVICE"},
                "body": {"items": {"item": [item]}, "numOfRows": 10, "pageNo": 1, "totalCount": 1}
            }
        })
    }

    fn land_item() -> Value {
        json!({
            "regId": "11B00000",
            "wf4Am": "맑음", "wf4Pm": "구름많음", "rnSt4Am": 10, "rnSt4Pm": 30,
            "wf5Am": "구름많음", "wf5Pm": "구름많고 비", "rnSt5Am": 30, "rnSt5Pm": 60,
            "wf6Am": "흐림", "wf6Pm": "비", "rnSt6Am": 40, "rnSt6Pm": 70,
            "wf7Am": "맑음", "wf7Pm": "맑음", "rnSt7Am": 10, "rnSt7Pm": 10,
            "wf8": "맑음", "rnSt8": 20,
            "wf9": "구름많음", "rnSt9": 30,
            "wf10": "흐리고 비", "rnSt10": 60
        })
    }

    #[tokio::test]
    async fn test_land_forecast_morning_bulletin() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getMidLandFcst"))
            .and(query_param("regId", "11B00000"))
            .and(query_param("tmFc", "202405100600"))
            .and(query_param("dataType", "JSON"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(land_item())))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), "test-key");
        let forecast = client
            .mid_land_forecast_at("11B00000", morning(2024, 5, 10))
            .await
            .unwrap();

        assert_eq!(forecast.reg_id, "11B00000");
        assert_eq!(forecast.tm_fc, "202405100600");
        // Morning bulletin covers days 4..=10.
        assert_eq!(forecast.forecast.len(), 7);
        assert_eq!(forecast.forecast[0].day, 4);

        for day in &forecast.forecast {
            if day.day <= 7 {
                assert!(day.morning().is_some() && day.afternoon().is_some());
                assert!(day.daily().is_none());
            } else {
                assert!(day.daily().is_some());
                assert!(day.morning().is_none() && day.afternoon().is_none());
            }
        }

        let day4 = forecast.day(4).unwrap();
        assert_eq!(day4.morning().unwrap().weather.as_deref(), Some("맑음"));
        assert_eq!(day4.afternoon().unwrap().rain_probability, Some(30));
        assert_eq!(day4.date, "5월 14일 (화)");

        let day10 = forecast.day(10).unwrap();
        assert_eq!(day10.daily().unwrap().weather.as_deref(), Some("흐리고 비"));
        assert_eq!(day10.daily().unwrap().rain_probability, Some(60));
    }

    #[tokio::test]
    async fn test_land_forecast_evening_bulletin_starts_at_day_five() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getMidLandFcst"))
            .and(query_param("tmFc", "202405101800"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(land_item())))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), "test-key");
        let now = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(20, 30, 0)
            .unwrap();
        let forecast = client.mid_land_forecast_at("11B00000", now).await.unwrap();

        assert_eq!(forecast.forecast.len(), 6);
        assert_eq!(forecast.forecast[0].day, 5);
        assert!(forecast.day(4).is_none());
    }

    #[tokio::test]
    async fn test_service_key_is_decoded_once() {
        let mock_server = MockServer::start().await;

        // Issued keys arrive percent-encoded; the wire value must carry the
        // decoded form (re-encoded transparently by the HTTP layer).
        Mock::given(method("GET"))
            .and(path("/getMidFcst"))
            .and(query_param("serviceKey", "abc+key=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "stnId": "109", "wfSv": "전망"
            }))))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), "abc%2Bkey%3D%3D");
        let outlook = client
            .mid_outlook_at("109", morning(2024, 5, 10))
            .await
            .unwrap();
        assert_eq!(outlook.outlook, "전망");
    }

    #[tokio::test]
    async fn test_non_2xx_is_a_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getMidLandFcst"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), "test-key");
        let err = client
            .mid_land_forecast_at("11B00000", morning(2024, 5, 10))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Transport(500)));
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_rejected_envelope_carries_agency_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getMidLandFcst"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": {
                    "header": {
                        "resultCode": "30",
                        "resultMsg": "SERVICE_KEY_IS_NOT_REGISTERED_ERROR"
                    }
                }
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), "test-key");
        let err = client
            .mid_land_forecast_at("11B00000", morning(2024, 5, 10))
            .await
            .unwrap_err();

        match err {
            WeatherError::Upstream(msg) => {
                assert_eq!(msg, "SERVICE_KEY_IS_NOT_REGISTERED_ERROR")
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejected_envelope_without_message_uses_default() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getMidFcst"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": {"header": {"resultCode": "99"}}
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), "test-key");
        let err = client
            .mid_outlook_at("109", morning(2024, 5, 10))
            .await
            .unwrap_err();

        match err {
            WeatherError::Upstream(msg) => assert_eq!(msg, "알 수 없는 오류"),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_items_is_no_data() {
        let mock_server = MockServer::start().await;

        // The agency sends items as an empty string when nothing matched.
        Mock::given(method("GET"))
            .and(path("/getMidLandFcst"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": {
                    "header": {"resultCode": "00", "resultMsg": "NORMAL_SERVICE"},
                    "body": {"items": "", "totalCount": 0}
                }
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), "test-key");
        let err = client
            .mid_land_forecast_at("11B00000", morning(2024, 5, 10))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::NoData));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_temperature_normalization() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getMidTa"))
            .and(query_param("regId", "11B10101"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "regId": "11B10101",
                "taMin4": 12, "taMax4": 21,
                "taMin5": "14", "taMax5": "19",
                "taMin6": 13, "taMax6": 22
            }))))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), "test-key");
        let temps = client
            .mid_temperature_at("11B10101", morning(2024, 5, 10))
            .await
            .unwrap();

        assert_eq!(temps.reg_id, "11B10101");
        assert_eq!(temps.temperatures.len(), 7);

        let day4 = temps.day(4).unwrap();
        assert_eq!(day4.min(), Some(12));
        assert_eq!(day4.max(), Some(21));

        // Numeric strings normalize too.
        let day5 = temps.day(5).unwrap();
        assert_eq!(day5.min(), Some(14));

        // Days the item never mentioned stay present with empty readings.
        let day9 = temps.day(9).unwrap();
        assert_eq!(day9.min(), None);
        assert_eq!(day9.max(), None);
    }

    #[tokio::test]
    async fn test_outlook_without_narrative_uses_placeholder() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getMidFcst"))
            .and(query_param("stnId", "109"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "stnId": "109"
            }))))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), "test-key");
        let outlook = client
            .mid_outlook_at("109", morning(2024, 5, 10))
            .await
            .unwrap();

        assert_eq!(outlook.outlook, "기상전망 정보가 없습니다.");
        assert_eq!(outlook.tm_fc, "202405100600");
    }
}
