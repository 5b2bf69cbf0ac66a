//! The search session state machine.
//!
//! A session owns a provider, the recent-search list, and the current
//! view state. Front-ends drive it with `submit`/`retry` (or the split
//! `begin`/`fetch`/`finish` when they want to render the loading state)
//! and redraw from [`ViewState`] after every call.
//!
//! Each accepted search bumps a generation counter, and `finish` drops
//! outcomes from superseded generations, so a slow response can never
//! overwrite the result of a search issued after it.

use chrono::FixedOffset;
use tracing::{debug, warn};

use crate::{
    error::{ValidationError, WeatherError},
    forecast::select_daily,
    history::{RecentSearches, RecentStore},
    model::{ForecastSample, WeatherSnapshot},
    provider::WeatherProvider,
};

/// What the front-end should currently show. Exactly one is active.
#[derive(Debug, Clone)]
pub enum ViewState {
    /// Nothing searched yet.
    Idle,
    /// A search is in flight.
    Loading,
    /// A successful lookup.
    Content(WeatherReport),
    /// Deliberately cleared, e.g. a retry with no usable input.
    Empty,
    /// A failed lookup; the message is all the user sees of the cause.
    Error(String),
}

/// The assembled result of one successful search.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub current: WeatherSnapshot,
    pub daily: Vec<ForecastSample>,
    /// City-local offset used when rendering dates.
    pub offset: FixedOffset,
}

/// Handle for an in-flight search: the validated city plus the generation
/// number guarding against stale completions.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    city: String,
    generation: u64,
}

impl PendingSearch {
    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Checks a raw input field value. Returns the trimmed city on success.
pub fn validate_city(raw: &str) -> Result<&str, ValidationError> {
    let city = raw.trim();
    if city.is_empty() {
        return Err(ValidationError::Empty);
    }

    let allowed = |c: char| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-';
    if !city.chars().all(allowed) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(city)
}

#[derive(Debug)]
pub struct SearchSession {
    provider: Box<dyn WeatherProvider>,
    recent: RecentSearches,
    store: Option<RecentStore>,
    state: ViewState,
    input: String,
    active_city: Option<String>,
    generation: u64,
}

impl SearchSession {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        recent: RecentSearches,
        store: Option<RecentStore>,
    ) -> Self {
        Self {
            provider,
            recent,
            store,
            state: ViewState::Idle,
            input: String::new(),
            active_city: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The raw text of the last submit attempt, valid or not.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn recent(&self) -> &[String] {
        self.recent.entries()
    }

    /// The last successfully searched city, as submitted. This is what a
    /// front-end mirrors into a shareable location.
    pub fn active_city(&self) -> Option<&str> {
        self.active_city.as_deref()
    }

    /// Validates `raw` and starts a new search generation.
    ///
    /// The raw text is retained as the session's input either way,
    /// mirroring a text field. On validation failure the view state is
    /// untouched and no request must be made.
    pub fn begin(&mut self, raw: &str) -> Result<PendingSearch, ValidationError> {
        self.input = raw.to_string();
        let city = validate_city(raw)?;

        self.generation += 1;
        self.state = ViewState::Loading;

        Ok(PendingSearch { city: city.to_string(), generation: self.generation })
    }

    /// Runs both provider calls concurrently and assembles the report.
    /// Either failure fails the whole search; nothing partial is produced.
    pub async fn fetch(&self, search: &PendingSearch) -> Result<WeatherReport, WeatherError> {
        let (current, forecast) = tokio::try_join!(
            self.provider.fetch_current(&search.city),
            self.provider.fetch_forecast(&search.city),
        )?;

        let offset = forecast.utc_offset();
        let daily = select_daily(&forecast.samples, offset);

        Ok(WeatherReport { current, daily, offset })
    }

    /// Applies a search outcome. Outcomes from superseded generations are
    /// discarded and leave the state untouched.
    pub fn finish(
        &mut self,
        search: PendingSearch,
        outcome: Result<WeatherReport, WeatherError>,
    ) -> &ViewState {
        if search.generation != self.generation {
            debug!(city = %search.city, "discarding superseded search result");
            return &self.state;
        }

        match outcome {
            Ok(report) => {
                self.recent.record(&search.city);
                if let Some(store) = &self.store {
                    if let Err(err) = store.save(&self.recent) {
                        warn!(error = %err, "could not persist recent searches");
                    }
                }
                self.active_city = Some(search.city);
                self.state = ViewState::Content(report);
            }
            Err(err) => {
                self.state = ViewState::Error(err.to_string());
            }
        }

        &self.state
    }

    /// One full search: validate, fetch, apply.
    pub async fn submit(&mut self, raw: &str) -> Result<&ViewState, ValidationError> {
        let search = self.begin(raw)?;
        let outcome = self.fetch(&search).await;
        Ok(self.finish(search, outcome))
    }

    /// Re-runs the retained input after a failure. Unusable input clears
    /// to the empty view instead: silently when the field is empty, with
    /// the validation message when it holds rejected text.
    pub async fn retry(&mut self) -> Result<&ViewState, ValidationError> {
        let raw = self.input.clone();
        match validate_city(&raw) {
            Ok(_) => self.submit(&raw).await,
            Err(ValidationError::Empty) => {
                self.state = ViewState::Empty;
                Ok(&self.state)
            }
            Err(err) => {
                self.state = ViewState::Empty;
                Err(err)
            }
        }
    }
}
