//! Timestamp presentation at a city's UTC offset.

use chrono::{DateTime, FixedOffset, Utc};

/// Long form shown above current conditions, e.g. "Saturday, June 1, 2024".
pub fn long_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp
        .with_timezone(&offset)
        .format("%A, %B %-d, %Y")
        .to_string()
}

/// Abbreviated day name for a forecast row, e.g. "Sat".
pub fn day_name(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp.with_timezone(&offset).format("%a").to_string()
}
