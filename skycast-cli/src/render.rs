//! Terminal rendering for the session view states.
//!
//! The whole UI redraws from the current [`ViewState`] value, so state
//! transitions live in the session and output lives here.

use chrono::FixedOffset;
use skycast_core::{
    ForecastSample, Icon, ViewState, WeatherReport,
    format::{day_name, long_date},
};

/// Prints the current view.
pub fn render(state: &ViewState) {
    match state {
        ViewState::Idle => {
            println!("Enter a city name to see current weather and a 5-day outlook.");
        }
        ViewState::Loading => println!("Fetching weather data..."),
        ViewState::Empty => println!("Nothing to show. Search for a city to get started."),
        ViewState::Error(message) => println!("✗ {message}"),
        ViewState::Content(report) => print!("{}", report_text(report)),
    }
}

/// The full report as text. Pure so tests can assert on it.
pub fn report_text(report: &WeatherReport) -> String {
    let current = &report.current;
    let icon = Icon::from_condition_code(&current.condition_code);

    let mut out = format!("\n{}, {}\n", current.city, current.country);
    out.push_str(&format!(
        "{}\n\n",
        long_date(current.observed_at, report.offset)
    ));
    out.push_str(&format!(
        "  {}  {}°C  {}\n",
        icon.glyph(),
        rounded(current.temperature_c),
        capitalize_first(&current.description),
    ));
    out.push_str(&format!(
        "  Feels like {}°C   Humidity {}%   Wind {} km/h   Pressure {} hPa\n",
        rounded(current.feels_like_c),
        current.humidity_pct,
        wind_kmh(current.wind_speed_mps),
        rounded(current.pressure_hpa),
    ));

    if !report.daily.is_empty() {
        out.push_str(&format!("\n{}-day forecast:\n", report.daily.len()));
        for sample in &report.daily {
            out.push_str(&forecast_row(sample, report.offset));
        }
    }

    out
}

fn forecast_row(sample: &ForecastSample, offset: FixedOffset) -> String {
    let icon = Icon::from_condition_code(&sample.condition_code);
    format!(
        "  {:<4} {}  {:>3}°C  {}\n",
        day_name(sample.timestamp, offset),
        icon.glyph(),
        rounded(sample.temperature_c),
        capitalize_first(&sample.description),
    )
}

fn rounded(value: f64) -> i64 {
    value.round() as i64
}

fn wind_kmh(mps: f64) -> i64 {
    rounded(mps * 3.6)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use skycast_core::WeatherSnapshot;

    fn report() -> WeatherReport {
        let current = WeatherSnapshot {
            city: "Paris".to_string(),
            country: "FR".to_string(),
            observed_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            temperature_c: 16.4,
            feels_like_c: 15.6,
            humidity_pct: 62,
            pressure_hpa: 1014.0,
            wind_speed_mps: 4.6,
            condition_code: "01d".to_string(),
            description: "clear sky".to_string(),
        };
        let daily = (1..=5)
            .map(|day| ForecastSample {
                timestamp: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
                temperature_c: 14.0 + f64::from(day),
                condition_code: "10d".to_string(),
                description: "light rain".to_string(),
            })
            .collect();

        WeatherReport {
            current,
            daily,
            offset: FixedOffset::east_opt(0).unwrap(),
        }
    }

    #[test]
    fn report_shows_header_and_rounded_current_conditions() {
        let text = report_text(&report());

        assert!(text.contains("Paris, FR"));
        assert!(text.contains("Saturday, June 1, 2024"));
        assert!(text.contains("16°C"));
        assert!(text.contains("Clear sky"));
        assert!(text.contains("Humidity 62%"));
        assert!(text.contains("Wind 17 km/h"));
        assert!(text.contains("Pressure 1014 hPa"));
    }

    #[test]
    fn report_lists_each_forecast_day() {
        let text = report_text(&report());

        assert!(text.contains("5-day forecast"));
        for day in ["Sat", "Sun", "Mon", "Tue", "Wed"] {
            assert!(text.contains(day), "missing {day} in:\n{text}");
        }
        assert!(text.contains("Light rain"));
    }

    #[test]
    fn short_outlook_keeps_its_real_length() {
        let mut report = report();
        report.daily.truncate(3);

        let text = report_text(&report);
        assert!(text.contains("3-day forecast"));
    }

    #[test]
    fn wind_speed_converts_to_kmh() {
        assert_eq!(wind_kmh(4.6), 17);
        assert_eq!(wind_kmh(0.0), 0);
        assert_eq!(wind_kmh(10.0), 36);
    }

    #[test]
    fn descriptions_capitalize_only_the_first_letter() {
        assert_eq!(capitalize_first("clear sky"), "Clear sky");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("light rain"), "Light rain");
    }
}
