use reqwest::StatusCode;
use thiserror::Error;

/// Shown when the provider rejects a request without a usable message.
pub const GENERIC_FETCH_MESSAGE: &str = "Failed to fetch weather data";

/// Failures while fetching or decoding weather data.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Non-success status from the provider. `message` echoes the
    /// provider's own error payload when one was present.
    #[error("{message} ({status})")]
    Upstream { status: StatusCode, message: String },

    /// Success status, but the body was not the expected shape.
    #[error("malformed weather response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure before any response arrived.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Input rejected before any network call. Surfaced inline next to the
/// input field, never as an error view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a city name")]
    Empty,
    #[error("City name should only contain letters, spaces, and hyphens")]
    InvalidCharacters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_display_keeps_provider_message() {
        let err = WeatherError::Upstream {
            status: StatusCode::NOT_FOUND,
            message: "city not found".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("city not found"));
        assert!(text.contains("404"));
    }

    #[test]
    fn validation_messages_match_inline_copy() {
        assert_eq!(ValidationError::Empty.to_string(), "Please enter a city name");
        assert_eq!(
            ValidationError::InvalidCharacters.to_string(),
            "City name should only contain letters, spaces, and hyphens"
        );
    }
}
