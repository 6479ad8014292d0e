//! Error taxonomy and the message classifier shared by every tool.
//!
//! Classification looks only at the lower-cased message text, checked in a fixed
//! order: validation, api, network, timeout. The first rule that matches wins,
//! so a message mentioning both "api" and "timeout" is an API error.

use serde_json::Value;

use crate::tools::ToolResponse;

/// Failures raised by tool executors after parameters were accepted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// Remote result was missing or had an unexpected shape
    #[error("{0}")]
    Validation(String),
}

/// Category implied by an error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Api,
    Network,
    Timeout,
    Unknown,
}

const NETWORK_MARKERS: &[&str] = &["econnrefused", "econnreset", "socket hang up", "network"];
const TIMEOUT_MARKERS: &[&str] = &["timeout", "timed out", "etimedout"];

impl ErrorCategory {
    /// Classify a message by ordered substring rules over its lower-cased text.
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();

        if lowered.contains("validation") {
            Self::Validation
        } else if lowered.contains("api") {
            Self::Api
        } else if NETWORK_MARKERS.iter().any(|m| lowered.contains(m)) {
            Self::Network
        } else if TIMEOUT_MARKERS.iter().any(|m| lowered.contains(m)) {
            Self::Timeout
        } else {
            Self::Unknown
        }
    }
}

/// Render an error as the text shown to the model.
pub fn format_error_message(error: &anyhow::Error) -> String {
    format_message(&error.to_string())
}

fn format_message(message: &str) -> String {
    if message.trim().is_empty() {
        return "An unknown error occurred".to_string();
    }

    match ErrorCategory::classify(message) {
        ErrorCategory::Validation => format!("Validation Error: {message}"),
        ErrorCategory::Api => format!("API Error: {message}"),
        ErrorCategory::Network => {
            format!("Network Error: {message}. Please check your connection and try again.")
        }
        ErrorCategory::Timeout => format!(
            "Timeout Error: {message}. Please try again with a longer timeout or a simpler request."
        ),
        ErrorCategory::Unknown => format!("Error: {message}"),
    }
}

/// Where an error surfaced, for the log line
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    pub tool_name: &'a str,
    pub operation: Option<&'a str>,
    pub input: Option<&'a Value>,
}

/// Log a tool failure and convert it into an error envelope.
pub fn handle_error(error: &anyhow::Error, context: ErrorContext<'_>) -> ToolResponse {
    let during = context
        .operation
        .map(|op| format!(" during {op}"))
        .unwrap_or_default();

    match context.input {
        Some(input) => log::error!(
            "Error in {}{}: {:#} (input: {})",
            context.tool_name,
            during,
            error,
            input
        ),
        None => log::error!("Error in {}{}: {:#}", context.tool_name, during, error),
    }

    ToolResponse::error(format_error_message(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_classification_order() {
        assert_eq!(
            ErrorCategory::classify("API validation timeout"),
            ErrorCategory::Validation
        );
        assert_eq!(
            ErrorCategory::classify("api gateway network timeout"),
            ErrorCategory::Api
        );
        assert_eq!(
            ErrorCategory::classify("network request timed out"),
            ErrorCategory::Network
        );
        assert_eq!(ErrorCategory::classify("ETIMEDOUT"), ErrorCategory::Timeout);
        assert_eq!(ErrorCategory::classify("boom"), ErrorCategory::Unknown);
    }

    #[test]
    fn test_network_vocabulary() {
        for message in [
            "connect ECONNREFUSED 127.0.0.1:3002",
            "read ECONNRESET",
            "socket hang up",
            "Network unreachable",
        ] {
            assert_eq!(ErrorCategory::classify(message), ErrorCategory::Network, "{message}");
        }
    }

    #[test]
    fn test_formatted_prefixes() {
        assert_eq!(format_error_message(&anyhow!("boom")), "Error: boom");
        assert_eq!(
            format_error_message(&anyhow!("Input validation failed")),
            "Validation Error: Input validation failed"
        );
        assert_eq!(
            format_error_message(&anyhow!("API request failed with status 500: down")),
            "API Error: API request failed with status 500: down"
        );
        assert_eq!(
            format_error_message(&anyhow!("socket hang up")),
            "Network Error: socket hang up. Please check your connection and try again."
        );
        assert_eq!(
            format_error_message(&anyhow!("Request timed out")),
            "Timeout Error: Request timed out. Please try again with a longer timeout or a simpler request."
        );
    }

    #[test]
    fn test_empty_message_is_unknown() {
        assert_eq!(format_error_message(&anyhow!("")), "An unknown error occurred");
    }

    #[test]
    fn test_tool_error_keeps_message_verbatim() {
        let err = anyhow::Error::new(ToolError::Validation(
            "Failed to scrape webpage: No result returned".to_string(),
        ));
        assert_eq!(
            format_error_message(&err),
            "Error: Failed to scrape webpage: No result returned"
        );
    }

    #[test]
    fn test_handle_error_builds_single_block_envelope() {
        let input = serde_json::json!({ "url": "https://example.com" });
        let response = handle_error(
            &anyhow!("boom"),
            ErrorContext {
                tool_name: "firecrawl_scrape",
                operation: Some("execution"),
                input: Some(&input),
            },
        );

        assert!(response.is_error);
        assert_eq!(response.content.len(), 1);
        assert_eq!(response.text_content(), Some("Error: boom"));
    }
}
