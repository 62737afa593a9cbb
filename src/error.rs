//! Structured error types for the dashboard layout engine.
//!
//! The layout ladder itself never fails: grid exhaustion degrades to the
//! stride and random fallbacks. Errors only come from bad input, which is
//! rejected before any placement happens.

use thiserror::Error;

use crate::model::ElementKind;

/// The unified error type returned by all public layout API functions.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// JSON input failed to parse as a dashboard configuration.
    #[error("Failed to parse dashboard: {source}{}", format_hint(.hint))]
    ParseError {
        source: serde_json::Error,
        hint: String,
    },
    /// The canvas has a non-positive or non-finite dimension.
    #[error("Invalid canvas {width}x{height}: both dimensions must be positive and finite")]
    InvalidCanvas { width: f64, height: f64 },
    /// An element carried an explicit size hint that cannot be placed.
    #[error("Invalid size for {kind} #{index}: {width:?}x{height:?}")]
    InvalidElementSize {
        kind: ElementKind,
        index: usize,
        width: Option<f64>,
        height: Option<f64>,
    },
    /// Layout options were rejected by validation.
    #[error("Invalid layout options: {0}")]
    InvalidOptions(String),
    /// A template name that does not match any known recipe.
    #[error("Unknown template '{0}' (expected executive, analytical or balanced)")]
    UnknownTemplate(String),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the dashboard schema. Expected lists named charts, statCards, dataTables and textBoxes.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        LayoutError::ParseError { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_hint() {
        let err: LayoutError = serde_json::from_str::<serde_json::Value>("{\"charts\": [,]}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse dashboard"));
        assert!(msg.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn test_invalid_canvas_message() {
        let err = LayoutError::InvalidCanvas {
            width: 0.0,
            height: 800.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid canvas 0x800: both dimensions must be positive and finite"
        );
    }

    #[test]
    fn test_invalid_element_size_names_kind() {
        let err = LayoutError::InvalidElementSize {
            kind: ElementKind::StatCard,
            index: 2,
            width: Some(-5.0),
            height: None,
        };
        assert!(err.to_string().contains("stat card #2"));
    }
}
