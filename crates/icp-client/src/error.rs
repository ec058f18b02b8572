//! Client error types

use reqwest::StatusCode;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, timeout, DNS failure or a broken response body
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error {status}: {message}")]
    Application { status: StatusCode, message: String },

    #[error("Authentication failed ({status}): {message}")]
    Authentication { status: StatusCode, message: String },

    /// Required local file is missing; raised before any request is sent
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// HTTP status reported by the server, if the failure came from one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Application { status, .. } | ClientError::Authentication { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Server-supplied (or fallback) message of an application failure
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Application { message, .. }
            | ClientError::Authentication { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Message for a non-success response: the body's `message` field when
/// present, otherwise the status reason phrase.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    extract_message(body).unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("HTTP {}", status.as_u16()),
    })
}

fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    match value.get("message")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        // Validation failures report one message per rejected field
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}
