//! XML plumbing: name tokens and the event source.
//!
//! The event source walks a parsed `roxmltree` document and feeds
//! start/characters/end events to an [`EventSink`].

mod names;
mod source;

pub use names::{build_name, split_name};
pub use source::{emit_events, Attributes, EventSink, NoAttributes, NodeAttributes};
