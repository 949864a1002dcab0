//! Domain-specific error types for product-captions

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for captioning operations
#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("Cannot read image {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error from model service{}: {body}", status_label(.status))]
    Service { status: Option<u16>, body: String },

    #[error("Error parsing model response: {reason}\nResponse: {response}")]
    Parse {
        reason: ParseFailure,
        response: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cannot write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CaptionError {
    /// Raw text returned by the model service, when the failure carries one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            CaptionError::Service { body, .. } => Some(body),
            CaptionError::Parse { response, .. } => Some(response),
            _ => None,
        }
    }

    pub(crate) fn parse(reason: ParseFailure, response: impl Into<String>) -> Self {
        CaptionError::Parse {
            reason,
            response: response.into(),
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl From<reqwest::Error> for CaptionError {
    fn from(err: reqwest::Error) -> Self {
        CaptionError::Service {
            status: err.status().map(|s| s.as_u16()),
            body: format!("HTTP request failed: {}", err),
        }
    }
}

/// Why a model reply could not be turned into a caption
#[derive(Error, Debug)]
pub enum ParseFailure {
    #[error("reply has no `response` text")]
    MissingResponse,

    #[error("no valid JSON found in response")]
    NoJson,

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("{0}")]
    Schema(SchemaError),
}

/// One failed check in a caption document, located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{path}: {}", self.message)
    }
}

/// Caption document did not match the expected shape.
///
/// Holds every violation reported by the validator; the first one is used
/// for the display message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub violations: Vec<SchemaViolation>,
}

impl SchemaError {
    /// Path of the first violation, e.g. `/cross_sell_products/0/attributes`.
    pub fn path(&self) -> &str {
        self.violations
            .first()
            .map(|v| v.path.as_str())
            .unwrap_or_default()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violations.as_slice() {
            [] => write!(f, "schema validation failed"),
            [only] => write!(f, "schema validation failed at {only}"),
            [first, rest @ ..] => write!(
                f,
                "schema validation failed at {first} (and {} more)",
                rest.len()
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Result type alias for captioning operations
pub type Result<T> = std::result::Result<T, CaptionError>;
