//! Parser that ties the event source, registry and dispatcher together.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use roxmltree::Document;

use crate::config::ParserConfig;
use crate::dispatcher::EventDispatcher;
use crate::error::Result;
use crate::registry::{CallbackRegistry, XmlHandler};
use crate::xml::emit_events;

/// Parse a document and dispatch its events to a handler.
///
/// Shorthand for `Parser::new().parse_str(xml, handler)`.
///
/// # Arguments
/// * `xml` - The XML document
/// * `handler` - Handler to call back, or `None` to only check nesting
///
/// # Errors
/// Returns the first XML, structural or callback error encountered.
pub fn dispatch<H: XmlHandler>(xml: &str, handler: Option<&mut H>) -> Result<()> {
    Parser::new().parse_str(xml, handler)
}

/// Parser to parse an XML document into handler callbacks.
///
/// Each parse builds a fresh [`EventDispatcher`], so one parser can be
/// used for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        config.validate().inspect_err(|err| {
            tracing::error!(error = %err, "Configuration error creating parser");
        })?;
        Ok(Self { config })
    }

    /// Parse a document for a handler that declares its own bindings.
    ///
    /// The registry is built from `H` only when a handler is given.
    ///
    /// # Examples
    /// ```
    /// use xml_dispatch::{CallbackRegistry, Parser, XmlHandler};
    ///
    /// #[derive(Default)]
    /// struct Ids(Vec<String>);
    ///
    /// impl XmlHandler for Ids {
    ///     fn register(registry: &mut CallbackRegistry<Self>) {
    ///         registry.on_start_with_attributes(["list", "item"], ["id"], |ids, attrs| {
    ///             ids.0.extend(attrs.get(0).map(String::from));
    ///             Ok(())
    ///         });
    ///     }
    /// }
    ///
    /// let mut ids = Ids::default();
    /// let xml = r#"<list><item id="1"/><item/><item id="3"/></list>"#;
    /// Parser::new().parse_str(xml, Some(&mut ids)).unwrap();
    /// assert_eq!(ids.0, ["1", "3"]);
    /// ```
    pub fn parse_str<H: XmlHandler>(&self, xml: &str, handler: Option<&mut H>) -> Result<()> {
        let registry = if handler.is_some() {
            CallbackRegistry::for_handler()
        } else {
            CallbackRegistry::new()
        };
        self.parse_str_with(xml, &registry, handler)
    }

    /// Parse a document using an explicitly built registry.
    ///
    /// # Errors
    /// Returns `XmlParse` for malformed input, a structural error for
    /// mismatched nesting, or `Callback` when a callback fails.
    pub fn parse_str_with<H>(
        &self,
        xml: &str,
        registry: &CallbackRegistry<H>,
        handler: Option<&mut H>,
    ) -> Result<()> {
        tracing::debug!(
            bytes = xml.len(),
            bindings = registry.len(),
            has_handler = handler.is_some(),
            "Parsing document"
        );

        let doc = Document::parse_with_options(xml, self.config.parsing_options())
            .inspect_err(|err| tracing::error!(error = %err, "Error parsing document"))?;

        let mut dispatcher = EventDispatcher::new(registry, handler);
        emit_events(&doc, &mut dispatcher)?;
        dispatcher.finish()
    }

    /// Parse a document only to check that it is well formed and nested.
    pub fn parse_discard(&self, xml: &str) -> Result<()> {
        self.parse_str_with::<()>(xml, &CallbackRegistry::new(), None)
    }

    /// Parse a document read from `reader`.
    ///
    /// Only UTF-8 input is accepted. A document in another encoding is
    /// rejected even when its XML declaration names that encoding.
    ///
    /// # Errors
    /// Returns `Io` if reading fails, the input is not UTF-8, or it exceeds
    /// the configured maximum size; otherwise as [`Parser::parse_str`].
    pub fn parse_reader<R: Read, H: XmlHandler>(
        &self,
        reader: R,
        handler: Option<&mut H>,
    ) -> Result<()> {
        let xml = self.read_input(reader)?;
        self.parse_str(&xml, handler)
    }

    /// Parse a document read from `reader` using an explicit registry.
    pub fn parse_reader_with<R: Read, H>(
        &self,
        reader: R,
        registry: &CallbackRegistry<H>,
        handler: Option<&mut H>,
    ) -> Result<()> {
        let xml = self.read_input(reader)?;
        self.parse_str_with(&xml, registry, handler)
    }

    /// Parse the document stored in a file.
    ///
    /// The file must be UTF-8 encoded; ISO-8859-1 or UTF-16 files fail with
    /// an `Io` error of kind `InvalidData`.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be opened or read; otherwise as
    /// [`Parser::parse_reader`].
    pub fn parse_file<H: XmlHandler>(
        &self,
        path: impl AsRef<Path>,
        handler: Option<&mut H>,
    ) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Opening input file");
        self.parse_reader(File::open(path)?, handler)
    }

    /// Parse the document stored in a file using an explicit registry.
    pub fn parse_file_with<H>(
        &self,
        path: impl AsRef<Path>,
        registry: &CallbackRegistry<H>,
        handler: Option<&mut H>,
    ) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Opening input file");
        self.parse_reader_with(File::open(path)?, registry, handler)
    }

    /// Read the whole input, enforcing the size limit.
    fn read_input<R: Read>(&self, reader: R) -> Result<String> {
        let limit = self.config.max_input_size;
        let mut xml = String::new();
        reader
            .take(limit.saturating_add(1))
            .read_to_string(&mut xml)
            .inspect_err(|err| tracing::error!(error = %err, "Error reading input"))?;

        if xml.len() as u64 > limit {
            tracing::error!(limit, "Input exceeds maximum size");
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Input exceeds maximum size of {limit} bytes"),
            )
            .into());
        }
        Ok(xml)
    }
}
