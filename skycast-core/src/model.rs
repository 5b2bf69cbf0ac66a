use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one city, produced fresh per lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub observed_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    pub condition_code: String,
    pub description: String,
}

/// One 3-hourly forecast sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub condition_code: String,
    pub description: String,
}

/// The provider's forecast list plus the city's UTC offset in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub samples: Vec<ForecastSample>,
    pub utc_offset_secs: i32,
}

impl Forecast {
    /// The city's offset as a chrono zone. Out-of-range values fall back
    /// to UTC rather than failing the whole lookup.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }
}

/// Display icon for a condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Sun,
    Moon,
    CloudSun,
    CloudMoon,
    Cloud,
    HeavyShowers,
    Rain,
    Bolt,
    Snowflake,
    Smog,
}

impl Icon {
    /// Maps the provider's icon codes (`01d` through `50n`). Codes this
    /// table does not know render as a plain cloud.
    pub fn from_condition_code(code: &str) -> Self {
        match code {
            "01d" => Icon::Sun,
            "01n" => Icon::Moon,
            "02d" => Icon::CloudSun,
            "02n" => Icon::CloudMoon,
            "03d" | "03n" | "04d" | "04n" => Icon::Cloud,
            "09d" | "09n" => Icon::HeavyShowers,
            "10d" | "10n" => Icon::Rain,
            "11d" | "11n" => Icon::Bolt,
            "13d" | "13n" => Icon::Snowflake,
            "50d" | "50n" => Icon::Smog,
            _ => Icon::Cloud,
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Icon::Sun => "☀️",
            Icon::Moon => "🌙",
            Icon::CloudSun => "⛅",
            Icon::CloudMoon | Icon::Cloud => "☁️",
            Icon::HeavyShowers => "🌧️",
            Icon::Rain => "🌦️",
            Icon::Bolt => "⚡",
            Icon::Snowflake => "❄️",
            Icon::Smog => "🌫️",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_and_night_codes_map_to_distinct_icons() {
        assert_eq!(Icon::from_condition_code("01d"), Icon::Sun);
        assert_eq!(Icon::from_condition_code("01n"), Icon::Moon);
        assert_eq!(Icon::from_condition_code("02d"), Icon::CloudSun);
        assert_eq!(Icon::from_condition_code("02n"), Icon::CloudMoon);
    }

    #[test]
    fn shared_codes_collapse_to_one_icon() {
        for code in ["03d", "03n", "04d", "04n"] {
            assert_eq!(Icon::from_condition_code(code), Icon::Cloud);
        }
        assert_eq!(Icon::from_condition_code("09n"), Icon::HeavyShowers);
        assert_eq!(Icon::from_condition_code("10d"), Icon::Rain);
        assert_eq!(Icon::from_condition_code("11n"), Icon::Bolt);
        assert_eq!(Icon::from_condition_code("13d"), Icon::Snowflake);
        assert_eq!(Icon::from_condition_code("50n"), Icon::Smog);
    }

    #[test]
    fn unknown_code_falls_back_to_cloud() {
        assert_eq!(Icon::from_condition_code("99x"), Icon::Cloud);
        assert_eq!(Icon::from_condition_code(""), Icon::Cloud);
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let forecast = Forecast {
            samples: Vec::new(),
            utc_offset_secs: 999_999,
        };
        assert_eq!(forecast.utc_offset().local_minus_utc(), 0);
    }
}
