//! xml-dispatch - Declarative path-based dispatch of XML parse events.
//!
//! This crate turns the start, end and character events of an XML document
//! into calls on callbacks registered for exact element paths. A consumer
//! declares "when `root/element` starts, call this with attributes `a` and
//! `c`" instead of tracking parser state by hand.
//!
//! # Example
//!
//! ```
//! use xml_dispatch::{CallbackRegistry, Parser, XmlHandler};
//!
//! #[derive(Default)]
//! struct Events(Vec<String>);
//!
//! impl XmlHandler for Events {
//!     fn register(registry: &mut CallbackRegistry<Self>) {
//!         registry
//!             .on_start(["root"], |events| {
//!                 events.0.push("start root".into());
//!                 Ok(())
//!             })
//!             .on_end(["root"], |events| {
//!                 events.0.push("end root".into());
//!                 Ok(())
//!             })
//!             .on_start_with_attributes(["root", "element"], ["a", "c"], |events, attrs| {
//!                 events.0.push(format!("a = {}", attrs.get(0).unwrap_or_default()));
//!                 events.0.push(format!("c = {}", attrs.get(1).unwrap_or_default()));
//!                 Ok(())
//!             })
//!             .on_characters(["root", "element", "subElement"], |events, text| {
//!                 events.0.push(format!("characters {text}"));
//!                 Ok(())
//!             });
//!     }
//! }
//!
//! let xml = r#"<root><element a="b" c="1"><subElement>Hello</subElement></element></root>"#;
//! let mut events = Events::default();
//! Parser::new().parse_str(xml, Some(&mut events)).unwrap();
//!
//! assert_eq!(
//!     events.0,
//!     ["start root", "a = b", "c = 1", "characters Hello", "end root"]
//! );
//! ```
//!
//! # Architecture
//!
//! - [`path`]: Element paths and exact-depth matching
//! - [`registry`]: Callback registration per event kind
//! - [`dispatcher`]: Element stack tracking and callback invocation
//! - [`xml`]: Name tokens and the `roxmltree` event source
//! - [`parser`]: Entry points for strings, readers and files
//! - [`config`]: Parser options and validation
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod parser;
pub mod path;
pub mod registry;
pub mod xml;

// Re-export commonly used items
pub use config::ParserConfig;
pub use dispatcher::EventDispatcher;
pub use error::{CallbackError, DispatchError, Result};
pub use parser::{dispatch, Parser};
pub use path::ElementPath;
pub use registry::{BoundAttributes, CallbackRegistry, CallbackResult, EventKind, XmlHandler};
