//! Daily forecast selection.
//!
//! The provider delivers forecast samples on a 3-hour cadence covering
//! about five days. Rendering wants one representative sample per day.
//! Selection runs in two passes: prefer a sample from the noon window of
//! each day; if that cannot fill five days, start over and take the first
//! sample of each day instead.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use chrono::{FixedOffset, Timelike};

use crate::model::ForecastSample;

/// Upper bound on selected days.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Local hours counted as "around noon" when choosing a day's sample.
pub const NOON_WINDOW: RangeInclusive<u32> = 11..=14;

/// Picks at most one sample per calendar day, up to [`MAX_FORECAST_DAYS`],
/// preserving chronological order.
///
/// Both the day key and the noon test use `offset`, so callers decide
/// whose clock a "day" belongs to. Pass the city's offset from
/// [`crate::model::Forecast::utc_offset`] for city-local days, or a zero
/// offset for plain UTC days.
pub fn select_daily(samples: &[ForecastSample], offset: FixedOffset) -> Vec<ForecastSample> {
    let around_noon = pick_days(samples, offset, |hour| NOON_WINDOW.contains(&hour));
    if around_noon.len() >= MAX_FORECAST_DAYS {
        around_noon
    } else {
        pick_days(samples, offset, |_| true)
    }
}

fn pick_days(
    samples: &[ForecastSample],
    offset: FixedOffset,
    keep_hour: impl Fn(u32) -> bool,
) -> Vec<ForecastSample> {
    let mut seen_days = HashSet::new();
    let mut picked = Vec::with_capacity(MAX_FORECAST_DAYS);
    for sample in samples {
        if picked.len() == MAX_FORECAST_DAYS {
            break;
        }
        let local = sample.timestamp.with_timezone(&offset);
        if keep_hour(local.hour()) && seen_days.insert(local.date_naive()) {
            picked.push(sample.clone());
        }
    }
    picked
}
