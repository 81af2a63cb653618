//! Callback registry for path-based dispatch.
//!
//! This module holds the registration table: callbacks are registered
//! for an element path and an event kind (start, end or characters), and
//! the dispatcher looks them up by matching the current element stack.

mod core;
mod handler;
mod types;

pub use core::{Binding, CallbackRegistry};
pub use handler::{CallbackResult, CharactersFn, EndFn, StartFn, XmlHandler};
pub use types::{BoundAttributes, EventKind};
