use reqwest::StatusCode;
use serde::Deserialize;

use super::display_value;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Error: EPIC_API_TOKEN environment variable not set. Please run 'epic init' first.")]
    NotAuthenticated,
    #[error("Error: bearer token contains characters that cannot be sent in a header")]
    InvalidToken,
    #[error("Error: invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Error: Failed to decode JSON response from server. ({0})")]
    Decode(String),
    /// The API answered with a non-success status
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        body: String,
    },
    #[error("Error: {0}")]
    NotFound(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ApiError {
    /// Build from a failed response, surfacing the API's `error` and
    /// `detail` fields verbatim when present.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { error, detail }) if error.is_some() || detail.is_some() => {
                let mut message = format!(
                    "Error: {}",
                    error
                        .as_ref()
                        .map(display_value)
                        .unwrap_or_else(|| "Unknown API error".to_string())
                );
                if let Some(detail) = detail.as_ref() {
                    message.push_str(&format!("\nDetail: {}", display_value(detail)));
                }
                message
            }
            _ => format!("HTTP status {}: {}", status, body),
        };

        Self::Api {
            status,
            message,
            body: body.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }
}
