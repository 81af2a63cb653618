//! Callback registry mapping element paths to callbacks.

use std::fmt;

use super::handler::{CallbackResult, CharactersFn, EndFn, StartFn, XmlHandler};
use super::types::{BoundAttributes, EventKind};
use crate::path::ElementPath;

/// A callback bound to a path.
///
/// Only start bindings carry attribute names; end and characters bindings
/// always have an empty list.
pub struct Binding<F: ?Sized> {
    path: ElementPath,
    attributes: Vec<String>,
    pub(crate) callback: Box<F>,
}

impl<F: ?Sized> Binding<F> {
    /// The path this binding fires on.
    #[must_use]
    pub fn path(&self) -> &ElementPath {
        &self.path
    }

    /// Attribute names requested by a start binding.
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }
}

impl<F: ?Sized> fmt::Debug for Binding<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("path", &self.path)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

/// Registry of callbacks for a handler type `H`.
///
/// Bindings are kept per event kind in registration order, which is also
/// the order in which several matching callbacks fire for one event. The
/// registry is built once and only read during dispatch, so it can be
/// reused for any number of parses.
pub struct CallbackRegistry<H> {
    start: Vec<Binding<StartFn<H>>>,
    end: Vec<Binding<EndFn<H>>>,
    characters: Vec<Binding<CharactersFn<H>>>,
}

impl<H> CallbackRegistry<H> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Vec::new(),
            end: Vec::new(),
            characters: Vec::new(),
        }
    }

    /// Create a registry holding the bindings declared by `H`.
    #[must_use]
    pub fn for_handler() -> Self
    where
        H: XmlHandler,
    {
        let mut registry = Self::new();
        H::register(&mut registry);
        tracing::debug!(
            handler = std::any::type_name::<H>(),
            bindings = registry.len(),
            "Built callback registry"
        );
        registry
    }

    /// Register a callback for the start of elements at `path`.
    pub fn on_start(
        &mut self,
        path: impl Into<ElementPath>,
        callback: impl Fn(&mut H) -> CallbackResult + 'static,
    ) -> &mut Self {
        let wrapped: Box<StartFn<H>> =
            Box::new(move |handler: &mut H, _: &BoundAttributes<'_>| callback(handler));
        self.start.push(new_binding(EventKind::Start, path.into(), Vec::new(), wrapped));
        self
    }

    /// Register a start callback that receives attribute values.
    ///
    /// # Arguments
    /// * `path` - Element path to fire on
    /// * `attributes` - Attribute names to look up, in the order the
    ///   callback will see them
    /// * `callback` - Called with the handler and the bound values
    ///
    /// # Examples
    /// ```
    /// use xml_dispatch::CallbackRegistry;
    ///
    /// let mut registry = CallbackRegistry::<Vec<String>>::new();
    /// registry.on_start_with_attributes(["root", "element"], ["a", "c"], |seen, attrs| {
    ///     seen.push(format!("a={:?} c={:?}", attrs.get(0), attrs.value("c")));
    ///     Ok(())
    /// });
    /// assert_eq!(registry.start_bindings()[0].attributes(), ["a", "c"]);
    /// ```
    pub fn on_start_with_attributes<I, S>(
        &mut self,
        path: impl Into<ElementPath>,
        attributes: I,
        callback: impl Fn(&mut H, &BoundAttributes<'_>) -> CallbackResult + 'static,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = attributes.into_iter().map(Into::into).collect();
        let wrapped: Box<StartFn<H>> = Box::new(callback);
        self.start.push(new_binding(EventKind::Start, path.into(), attributes, wrapped));
        self
    }

    /// Register a callback for the end of elements at `path`.
    pub fn on_end(
        &mut self,
        path: impl Into<ElementPath>,
        callback: impl Fn(&mut H) -> CallbackResult + 'static,
    ) -> &mut Self {
        let wrapped: Box<EndFn<H>> = Box::new(callback);
        self.end.push(new_binding(EventKind::End, path.into(), Vec::new(), wrapped));
        self
    }

    /// Register a callback for character data directly inside elements at `path`.
    ///
    /// The callback sees each text chunk exactly as the event source
    /// delivers it; chunks are not joined.
    pub fn on_characters(
        &mut self,
        path: impl Into<ElementPath>,
        callback: impl Fn(&mut H, &str) -> CallbackResult + 'static,
    ) -> &mut Self {
        let wrapped: Box<CharactersFn<H>> = Box::new(callback);
        self.characters
            .push(new_binding(EventKind::Characters, path.into(), Vec::new(), wrapped));
        self
    }

    /// Start bindings in registration order.
    #[must_use]
    pub fn start_bindings(&self) -> &[Binding<StartFn<H>>] {
        &self.start
    }

    /// End bindings in registration order.
    #[must_use]
    pub fn end_bindings(&self) -> &[Binding<EndFn<H>>] {
        &self.end
    }

    /// Characters bindings in registration order.
    #[must_use]
    pub fn characters_bindings(&self) -> &[Binding<CharactersFn<H>>] {
        &self.characters
    }

    /// Paths bound for one event kind, in registration order.
    #[must_use]
    pub fn paths(&self, kind: EventKind) -> Vec<&ElementPath> {
        match kind {
            EventKind::Start => self.start.iter().map(Binding::path).collect(),
            EventKind::End => self.end.iter().map(Binding::path).collect(),
            EventKind::Characters => self.characters.iter().map(Binding::path).collect(),
        }
    }

    /// Total number of bindings across all event kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.start.len() + self.end.len() + self.characters.len()
    }

    /// Whether no callback is registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn new_binding<F: ?Sized>(
    kind: EventKind,
    path: ElementPath,
    attributes: Vec<String>,
    callback: Box<F>,
) -> Binding<F> {
    if path.is_empty() {
        tracing::warn!(%kind, "Registered callback with an empty path, it will never fire");
    } else {
        tracing::debug!(%kind, %path, ?attributes, "Registered callback");
    }
    Binding {
        path,
        attributes,
        callback,
    }
}

impl<H> Default for CallbackRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for CallbackRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("characters", &self.characters)
            .finish()
    }
}
