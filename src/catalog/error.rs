//! Typed failures for calls to the catalog service.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    HttpStatus { code: u16 },
    Network,
    Malformed,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Timeout => write!(f, "Timeout"),
            TransportErrorKind::HttpStatus { code } => write!(f, "HTTP status {}", code),
            TransportErrorKind::Network => write!(f, "Network error"),
            TransportErrorKind::Malformed => write!(f, "Malformed response"),
        }
    }
}

/// A failed call to the catalog service.
///
/// `message` is whatever the server said about the failure, when the response
/// body carried one. `detail` is our own description and is always set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.user_message())]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: Option<String>,
    pub detail: String,
}

impl TransportError {
    pub fn timeout(operation: &str, after: Duration) -> Self {
        Self {
            kind: TransportErrorKind::Timeout,
            message: None,
            detail: format!(
                "{} request to Lidarr did not complete within {:.1}s",
                operation,
                after.as_secs_f64()
            ),
        }
    }

    pub fn status(code: u16, body: &[u8]) -> Self {
        Self {
            kind: TransportErrorKind::HttpStatus { code },
            message: extract_error_message(body),
            detail: format!("Lidarr responded with status {}", code),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::Network,
            message: None,
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::Malformed,
            message: None,
            detail: detail.into(),
        }
    }

    /// Classifies a reqwest failure for the given operation.
    pub fn from_reqwest(operation: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(operation, timeout)
        } else if err.is_decode() {
            Self::malformed(format!("{} response could not be decoded: {}", operation, err))
        } else {
            Self::network(format!("{} request failed: {}", operation, err))
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }

    /// Best-effort text for the user: the server's own message when one was
    /// extracted, otherwise a description of the failure kind.
    pub fn user_message(&self) -> String {
        match &self.message {
            Some(message) => format!("Lidarr API Error: {}", message),
            None => format!("{}: {}", self.kind, self.detail),
        }
    }
}

#[derive(Deserialize)]
struct ErrorObject {
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    List(Vec<ErrorObject>),
    Single(ErrorObject),
}

/// Pulls a human-readable message out of an error response body.
///
/// Lidarr reports validation failures as a list of objects carrying
/// `errorMessage`, and other failures as one object carrying `message`. Both
/// shapes are tried in that order; anything else yields `None`.
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let message = match parsed {
        ErrorBody::List(items) => {
            let first = items.into_iter().next()?;
            first.error_message.or(first.message)
        }
        ErrorBody::Single(object) => object.message.or(object.error_message),
    }?;
    let message = message.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}
