use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    error::{GENERIC_FETCH_MESSAGE, WeatherError},
    model::{Forecast, ForecastSample, WeatherSnapshot},
};

use super::WeatherProvider;

/// Public OpenWeatherMap REST root.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));
const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    /// Client against the public API.
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Client against an alternate endpoint root. Integration tests point
    /// this at a local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, WeatherError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { api_key, base_url, http })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, city, "requesting weather data");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "provider rejected the request");
            return Err(upstream_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| WeatherError::MalformedResponse(err.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let raw: OwCurrentResponse = self.fetch_json("weather", city).await?;
        snapshot_from(raw)
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let raw: OwForecastResponse = self.fetch_json("forecast", city).await?;
        forecast_from(raw)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
    sys: OwSys,
}

#[derive(Debug, Default, Deserialize)]
struct OwCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    city: OwCity,
    list: Option<Vec<OwForecastEntry>>,
}

fn snapshot_from(raw: OwCurrentResponse) -> Result<WeatherSnapshot, WeatherError> {
    let condition = take_condition(raw.weather, "current weather")?;

    Ok(WeatherSnapshot {
        city: raw.name,
        country: raw.sys.country,
        observed_at: unix_to_utc(raw.dt),
        temperature_c: raw.main.temp,
        feels_like_c: raw.main.feels_like,
        humidity_pct: raw.main.humidity,
        pressure_hpa: raw.main.pressure,
        wind_speed_mps: raw.wind.speed,
        condition_code: condition.icon,
        description: condition.description,
    })
}

fn forecast_from(raw: OwForecastResponse) -> Result<Forecast, WeatherError> {
    let list = raw.list.ok_or_else(|| {
        WeatherError::MalformedResponse("forecast response is missing the list field".to_string())
    })?;

    let samples = list
        .into_iter()
        .map(|entry| {
            let condition = take_condition(entry.weather, "forecast entry")?;
            Ok(ForecastSample {
                timestamp: unix_to_utc(entry.dt),
                temperature_c: entry.main.temp,
                condition_code: condition.icon,
                description: condition.description,
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    Ok(Forecast { samples, utc_offset_secs: raw.city.timezone })
}

fn take_condition(weather: Vec<OwCondition>, what: &str) -> Result<OwCondition, WeatherError> {
    weather.into_iter().next().ok_or_else(|| {
        WeatherError::MalformedResponse(format!("{what} has no weather condition entry"))
    })
}

/// Providers report failures as `{"cod": ..., "message": ...}`. Echo the
/// message when one is present, else fall back to the generic text.
fn upstream_error(status: StatusCode, body: &str) -> WeatherError {
    #[derive(Debug, Deserialize)]
    struct UpstreamBody {
        message: Option<String>,
    }

    let message = serde_json::from_str::<UpstreamBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| GENERIC_FETCH_MESSAGE.to_string());

    WeatherError::Upstream { status, message }
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_else(Utc::now)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
