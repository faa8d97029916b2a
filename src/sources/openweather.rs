//! OpenWeatherMap `/weather` client: current conditions by coordinates and conditions on a
//! given day by city id.

use crate::sources::error::SourceError;
use crate::sources::http::get_json;
use crate::sources::{DailySource, Observation, WeatherSource};
use crate::types::daily_record::DailyRecord;
use crate::types::location::LatLon;
use crate::types::sample::Sample;
use async_trait::async_trait;
use bon::bon;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::debug;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// City id of London, the default location of the date-range endpoint.
pub const DEFAULT_CITY_ID: &str = "2643743";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[bon]
impl OpenWeatherClient {
    /// * `api_key` - Sent as `appid`.
    /// * `base_url` - Defaults to [`DEFAULT_BASE_URL`].
    /// * `client` - Reuse an existing `reqwest::Client`.
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        #[builder(into)] base_url: Option<String>,
        client: Option<Client>,
    ) -> Self {
        Self {
            client: client.unwrap_or_default(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
        }
    }
}

impl OpenWeatherClient {
    fn weather_url(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }

    /// Current conditions at `location`, in metric units.
    ///
    /// The sample is stamped with the observation time reported by the API, or with the
    /// time of the request when the response has none.
    pub async fn current(&self, location: LatLon) -> Result<Sample, SourceError> {
        let query = [
            ("lat", location.0.to_string()),
            ("lon", location.1.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        let response: WeatherResponse = get_json(&self.client, &self.weather_url(), &query).await?;
        debug!(
            "Current conditions for {}",
            response.name.as_deref().unwrap_or("unnamed location")
        );

        let observed = response
            .dt
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now);
        Ok(Sample::at(
            observed,
            response.main.temp,
            response.main.humidity,
            response.rainfall(),
        ))
    }

    /// Conditions for `city_id` at midnight UTC of `date`.
    pub async fn on_date(&self, city_id: &str, date: NaiveDate) -> Result<DailyRecord, SourceError> {
        let dt = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        let query = [
            ("id", city_id.to_string()),
            ("dt", dt.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        let response: WeatherResponse = get_json(&self.client, &self.weather_url(), &query).await?;
        Ok(DailyRecord {
            date,
            temperature: response.main.temp,
            humidity: response.main.humidity,
            rainfall: response.rainfall(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    dt: Option<i64>,
    name: Option<String>,
    main: MainReadings,
    rain: Option<RainVolume>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct RainVolume {
    #[serde(rename = "1h")]
    last_hour: Option<f64>,
}

impl WeatherResponse {
    fn rainfall(&self) -> f64 {
        self.rain
            .as_ref()
            .and_then(|rain| rain.last_hour)
            .unwrap_or(0.0)
    }
}

/// Polls current conditions at a fixed location.
#[derive(Debug, Clone)]
pub struct CurrentConditions {
    client: OpenWeatherClient,
    location: LatLon,
}

impl CurrentConditions {
    pub fn new(client: OpenWeatherClient, location: LatLon) -> Self {
        Self { client, location }
    }
}

#[async_trait]
impl WeatherSource for CurrentConditions {
    fn name(&self) -> &str {
        "openweather"
    }

    async fn fetch(&self) -> Result<Observation, SourceError> {
        Ok(Observation::Current(self.client.current(self.location).await?))
    }
}

/// Per-day conditions for one city.
#[derive(Debug, Clone)]
pub struct CityDaily {
    client: OpenWeatherClient,
    city_id: String,
}

impl CityDaily {
    pub fn new(client: OpenWeatherClient, city_id: impl Into<String>) -> Self {
        Self {
            client,
            city_id: city_id.into(),
        }
    }
}

#[async_trait]
impl DailySource for CityDaily {
    async fn daily(&self, date: NaiveDate) -> Result<DailyRecord, SourceError> {
        self.client.on_date(&self.city_id, date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::TimeZone;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn fake_api() -> String {
        let router = Router::new().route(
            "/weather",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("appid").map(String::as_str) != Some("key")
                    || params.get("units").map(String::as_str) != Some("metric")
                {
                    return Err(StatusCode::UNAUTHORIZED);
                }
                let body: Value = if params.contains_key("lat") {
                    json!({
                        "dt": 1_704_110_400,
                        "name": "Somewhere",
                        "main": { "temp": 4.5, "humidity": 81 }
                    })
                } else {
                    let dt: i64 = params
                        .get("dt")
                        .and_then(|d| d.parse().ok())
                        .unwrap_or_default();
                    json!({
                        "dt": dt,
                        "main": { "temp": (dt / 86_400 % 10) as f64, "humidity": 60 },
                        "rain": { "1h": 1.25 }
                    })
                };
                Ok(Json(body))
            }),
        );
        serve(router).await
    }

    #[tokio::test]
    async fn current_conditions_default_rain_to_zero() {
        let base = fake_api().await;
        let client = OpenWeatherClient::builder()
            .api_key("key")
            .base_url(base)
            .build();
        let source = CurrentConditions::new(client, LatLon(51.5, -0.12));

        let Observation::Current(sample) = source.fetch().await.unwrap() else {
            panic!("expected a current observation");
        };
        assert_eq!(
            sample.instant(),
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(sample.temperature(), 4.5);
        assert_eq!(sample.humidity(), 81.0);
        assert_eq!(sample.rainfall(), 0.0);
    }

    #[tokio::test]
    async fn daily_record_uses_requested_date() {
        let base = fake_api().await;
        let client = OpenWeatherClient::builder()
            .api_key("key")
            .base_url(format!("{base}/"))
            .build();
        let daily = CityDaily::new(client, DEFAULT_CITY_ID);

        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let record = daily.daily(date).await.unwrap();
        assert_eq!(record.date, date);
        assert_eq!(record.humidity, 60.0);
        assert_eq!(record.rainfall, 1.25);
    }

    #[tokio::test]
    async fn wrong_key_is_http_status_error() {
        let base = fake_api().await;
        let client = OpenWeatherClient::builder()
            .api_key("wrong")
            .base_url(base)
            .build();
        let err = client.current(LatLon(0.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, SourceError::HttpStatus { .. }));
        // the key travels in the query and must not leak into the message
        assert!(!err.to_string().contains("wrong"));
    }
}
