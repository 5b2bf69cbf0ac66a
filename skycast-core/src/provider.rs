use crate::{
    config::Config,
    error::WeatherError,
    model::{Forecast, WeatherSnapshot},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A weather data source, keyed by city name.
///
/// Object safe so sessions can hold a boxed provider and tests can swap
/// in a scripted one.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city.
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;

    /// The 5-day/3-hour forecast for a city.
    async fn fetch_forecast(&self, city: &str) -> Result<Forecast, WeatherError>;
}

/// Construct the configured provider.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;
    let client = OpenWeatherClient::with_base_url(api_key.to_owned(), config.base_url.clone())?;

    Ok(Box::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
