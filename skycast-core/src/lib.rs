//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client behind a provider trait
//! - Daily forecast selection and timestamp formatting
//! - Recent-search history and the search session state machine
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod history;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::{ValidationError, WeatherError};
pub use forecast::{MAX_FORECAST_DAYS, select_daily};
pub use history::{RecentSearches, RecentStore, normalize_city};
pub use model::{Forecast, ForecastSample, Icon, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherClient, provider_from_config};
pub use session::{PendingSearch, SearchSession, ViewState, WeatherReport, validate_city};
