//! OpenWeatherMap client errors

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing OpenWeatherMap API key (set OPENWEATHER_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error body the provider sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

impl ApiError {
    /// Build a status error, preferring the provider's own message
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ProviderError>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| body.trim().to_string());
        ApiError::Status { status, message }
    }

    /// Connection or timeout failure; the affected row degrades to a placeholder.
    /// Request-building errors (a bad base URL) are not transport failures.
    pub fn is_transport(&self) -> bool {
        match self {
            ApiError::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Short message for the status line
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingApiKey => "No API key configured".to_string(),
            ApiError::Request(e) if e.is_builder() => "Invalid weather service URL".to_string(),
            ApiError::Request(_) => "Network error. Check your connection.".to_string(),
            ApiError::Status { status: 401, .. } => "Invalid API key".to_string(),
            ApiError::Status { status: 429, .. } => "Rate limited by weather service".to_string(),
            ApiError::Status { status, message } => format!("Weather service error {status}: {message}"),
            ApiError::Decode(_) => "Unexpected response from weather service".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_provider_message() {
        let err = ApiError::from_status(401, r#"{"cod":401,"message":"Invalid API key."}"#);
        assert_eq!(err.to_string(), "HTTP 401: Invalid API key.");
        assert_eq!(err.user_message(), "Invalid API key");
    }

    #[test]
    fn test_status_falls_back_to_body() {
        let err = ApiError::from_status(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
        assert!(err.user_message().contains("502"));
    }

    #[test]
    fn test_status_and_decode_errors_are_not_transport() {
        assert!(!ApiError::MissingApiKey.is_transport());
        assert!(!ApiError::from_status(500, "").is_transport());
        let decode = serde_json::from_str::<ProviderError>("[").unwrap_err();
        assert!(!ApiError::Decode(decode).is_transport());
    }
}
