//! Error types for the dispatcher.
//!
//! Every failure surfaces as a single `DispatchError`. Structural
//! violations and callback failures come from the dispatcher itself;
//! XML, I/O and configuration failures come from the plumbing around it.

use thiserror::Error;

use crate::registry::EventKind;

/// Error raised by a callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the dispatcher library.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// An end-element event did not close the currently open element.
    #[error("Unexpected end of element {name}. {}", expected_element(.expected))]
    UnexpectedEndElement {
        name: String,
        expected: Option<String>,
    },

    /// The input ended while an element was still open.
    #[error("Document ended while element {name} was still open")]
    UnclosedElement { name: String },

    /// A bound callback returned an error.
    #[error("An error occurred in {kind} callback for {path}")]
    Callback {
        kind: EventKind,
        path: String,
        #[source]
        source: CallbackError,
    },

    /// The event source rejected the document.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The parser configuration is unusable.
    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),

    /// A path string could not be parsed.
    #[error("Invalid element path '{0}'")]
    InvalidPath(String),
}

impl DispatchError {
    /// Whether this is a nesting violation detected by the dispatcher.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEndElement { .. } | Self::UnclosedElement { .. }
        )
    }
}

fn expected_element(expected: &Option<String>) -> String {
    match expected {
        Some(name) => format!("Expected {name}"),
        None => "No element is open".to_string(),
    }
}

/// Result type alias for dispatcher operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
