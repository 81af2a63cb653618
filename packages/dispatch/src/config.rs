//! Configuration constants and validation for the parser.

use roxmltree::ParsingOptions;

use crate::error::{DispatchError, Result};

/// Default maximum number of nodes in a document.
///
/// Matches the `roxmltree` default, which is effectively unlimited.
pub const DEFAULT_NODES_LIMIT: u32 = u32::MAX;

/// Default maximum input size in bytes (100 MB).
///
/// Applies to readers and files. Input beyond this size is rejected before
/// parsing starts, so a runaway stream cannot exhaust memory.
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 100 * 1024 * 1024;

/// Options for the XML parser that feeds the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Accept documents carrying a DTD (`<!DOCTYPE ...>`).
    pub allow_dtd: bool,

    /// Maximum number of nodes the parser will build.
    pub nodes_limit: u32,

    /// Maximum number of bytes read from a reader or file.
    pub max_input_size: u64,
}

impl ParserConfig {
    /// Set whether documents with a DTD are accepted.
    #[must_use]
    pub fn with_allow_dtd(mut self, allow_dtd: bool) -> Self {
        self.allow_dtd = allow_dtd;
        self
    }

    /// Set the maximum number of nodes.
    #[must_use]
    pub fn with_nodes_limit(mut self, nodes_limit: u32) -> Self {
        self.nodes_limit = nodes_limit;
        self
    }

    /// Set the maximum input size in bytes.
    #[must_use]
    pub fn with_max_input_size(mut self, max_input_size: u64) -> Self {
        self.max_input_size = max_input_size;
        self
    }

    /// Validate the configuration.
    ///
    /// # Returns
    /// * `Ok(())` if every limit is usable
    /// * `Err(DispatchError::InvalidConfig)` if a limit is zero
    ///
    /// # Examples
    /// ```
    /// use xml_dispatch::ParserConfig;
    ///
    /// assert!(ParserConfig::default().validate().is_ok());
    /// assert!(ParserConfig::default().with_nodes_limit(0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.nodes_limit == 0 {
            return Err(DispatchError::InvalidConfig(
                "nodes_limit must be greater than zero".to_string(),
            ));
        }
        if self.max_input_size == 0 {
            return Err(DispatchError::InvalidConfig(
                "max_input_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Options handed to `roxmltree`.
    pub(crate) fn parsing_options(&self) -> ParsingOptions<'_> {
        ParsingOptions {
            allow_dtd: self.allow_dtd,
            nodes_limit: self.nodes_limit,
            ..Default::default()
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            allow_dtd: true,
            nodes_limit: DEFAULT_NODES_LIMIT,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}
