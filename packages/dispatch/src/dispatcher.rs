//! Event dispatcher that routes parse events to registered callbacks.

use crate::error::{DispatchError, Result};
use crate::path::ElementPath;
use crate::registry::{BoundAttributes, CallbackRegistry, CallbackResult, EventKind};
use crate::xml::{build_name, Attributes, EventSink};

/// Dispatcher that tracks the open elements and invokes matching callbacks.
///
/// The dispatcher owns the element stack for exactly one parse. It borrows
/// the registry and the handler; with no handler it still checks that
/// every end event closes the element that is currently open.
///
/// Every binding whose path matches the stack fires, in registration
/// order. The first callback error aborts the event and is returned as
/// [`DispatchError::Callback`].
pub struct EventDispatcher<'r, 'h, H> {
    registry: &'r CallbackRegistry<H>,
    handler: Option<&'h mut H>,
    stack: Vec<String>,
}

impl<'r, 'h, H> EventDispatcher<'r, 'h, H> {
    /// Create a dispatcher with an empty element stack.
    #[must_use]
    pub fn new(registry: &'r CallbackRegistry<H>, handler: Option<&'h mut H>) -> Self {
        Self {
            registry,
            handler,
            stack: Vec::new(),
        }
    }

    /// Number of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Names of the open elements, outermost first.
    #[must_use]
    pub fn current_path(&self) -> &[String] {
        &self.stack
    }

    /// Check that the document closed every element it opened.
    ///
    /// # Errors
    /// Returns `UnclosedElement` naming the innermost open element.
    pub fn finish(self) -> Result<()> {
        match self.stack.last() {
            None => Ok(()),
            Some(name) => {
                tracing::error!(
                    element = %name,
                    depth = self.stack.len(),
                    "Document ended with open elements"
                );
                Err(DispatchError::UnclosedElement { name: name.clone() })
            }
        }
    }
}

impl<H> EventSink for EventDispatcher<'_, '_, H> {
    fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        attributes: &dyn Attributes,
    ) -> Result<()> {
        let name = build_name(uri, local_name);
        tracing::debug!(
            element = %name,
            depth = self.stack.len() + 1,
            "Processing start of element"
        );
        self.stack.push(name);

        let Some(handler) = self.handler.as_deref_mut() else {
            return Ok(());
        };
        let registry = self.registry;
        for binding in registry.start_bindings() {
            if binding.path().matches(&self.stack) {
                tracing::debug!(path = %binding.path(), "Found matching start callback");
                let bound = BoundAttributes::resolve(binding.attributes(), attributes);
                let outcome = (binding.callback)(&mut *handler, &bound);
                invoke(EventKind::Start, binding.path(), outcome)?;
            }
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        if self.stack.is_empty() {
            return Ok(());
        }
        tracing::debug!(len = text.len(), "Processing characters");

        let Some(handler) = self.handler.as_deref_mut() else {
            return Ok(());
        };
        let registry = self.registry;
        for binding in registry.characters_bindings() {
            if binding.path().matches(&self.stack) {
                tracing::debug!(path = %binding.path(), "Found matching characters callback");
                let outcome = (binding.callback)(&mut *handler, text);
                invoke(EventKind::Characters, binding.path(), outcome)?;
            }
        }
        Ok(())
    }

    fn end_element(&mut self, uri: &str, local_name: &str) -> Result<()> {
        let name = build_name(uri, local_name);
        tracing::debug!(element = %name, depth = self.stack.len(), "Processing end of element");

        if self.stack.last() != Some(&name) {
            let expected = self.stack.last().cloned();
            tracing::error!(element = %name, ?expected, "Unexpected end of element");
            return Err(DispatchError::UnexpectedEndElement { name, expected });
        }

        if let Some(handler) = self.handler.as_deref_mut() {
            let registry = self.registry;
            for binding in registry.end_bindings() {
                if binding.path().matches(&self.stack) {
                    tracing::debug!(path = %binding.path(), "Found matching end callback");
                    let outcome = (binding.callback)(&mut *handler);
                    invoke(EventKind::End, binding.path(), outcome)?;
                }
            }
        }

        self.stack.pop();
        Ok(())
    }
}

/// Turn a callback outcome into a dispatch result.
fn invoke(kind: EventKind, path: &ElementPath, outcome: CallbackResult) -> Result<()> {
    outcome.map_err(|source| {
        tracing::error!(%kind, %path, error = %source, "Error occurred in callback");
        DispatchError::Callback {
            kind,
            path: path.to_string(),
            source,
        }
    })
}
