//! Event source over a parsed `roxmltree` document.

use roxmltree::{Document, Node};

use super::names::split_name;
use crate::error::Result;

/// Attribute lookup for the element currently being started.
pub trait Attributes {
    /// Get the value of an attribute.
    ///
    /// # Arguments
    /// * `name` - Bare local name for un-namespaced attributes, or
    ///   `{uri}localName` for namespaced ones
    ///
    /// # Returns
    /// The attribute value, or `None` if the element has no such attribute
    fn value(&self, name: &str) -> Option<&str>;
}

/// Receiver of parse events, in document order.
pub trait EventSink {
    /// An element was opened.
    fn start_element(
        &mut self,
        uri: &str,
        local_name: &str,
        attributes: &dyn Attributes,
    ) -> Result<()>;

    /// Character data was read inside the current element.
    fn characters(&mut self, text: &str) -> Result<()>;

    /// An element was closed.
    fn end_element(&mut self, uri: &str, local_name: &str) -> Result<()>;
}

/// Attributes of a `roxmltree` element node.
#[derive(Debug, Clone, Copy)]
pub struct NodeAttributes<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> NodeAttributes<'a, 'input> {
    /// Wrap an element node.
    #[must_use]
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }
}

impl Attributes for NodeAttributes<'_, '_> {
    fn value(&self, name: &str) -> Option<&str> {
        match split_name(name) {
            // A bare name only ever refers to an attribute without a namespace
            ("", local) => self
                .node
                .attributes()
                .find(|attr| attr.namespace().is_none() && attr.name() == local)
                .map(|attr| attr.value()),
            (uri, local) => self.node.attribute((uri, local)),
        }
    }
}

/// No attributes at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl Attributes for NoAttributes {
    fn value(&self, _name: &str) -> Option<&str> {
        None
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> Attributes for [(K, V); N] {
    fn value(&self, name: &str) -> Option<&str> {
        lookup_pair(self, name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Attributes for Vec<(K, V)> {
    fn value(&self, name: &str) -> Option<&str> {
        lookup_pair(self, name)
    }
}

fn lookup_pair<'s, K, V>(pairs: &'s [(K, V)], name: &str) -> Option<&'s str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .find(|(key, _)| key.as_ref() == name)
        .map(|(_, value)| value.as_ref())
}

/// Walk a document and feed its events to a sink.
///
/// Element opens become `start_element`, text nodes (CDATA included, entity
/// references already decoded) become `characters` and element closes
/// become `end_element`. Comments and processing instructions are not
/// forwarded. The first error returned by the sink stops the walk.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml_dispatch::xml::{emit_events, Attributes, EventSink};
/// use xml_dispatch::Result;
///
/// #[derive(Default)]
/// struct Depth { max: usize, current: usize }
///
/// impl EventSink for Depth {
///     fn start_element(&mut self, _: &str, _: &str, _: &dyn Attributes) -> Result<()> {
///         self.current += 1;
///         self.max = self.max.max(self.current);
///         Ok(())
///     }
///     fn characters(&mut self, _: &str) -> Result<()> { Ok(()) }
///     fn end_element(&mut self, _: &str, _: &str) -> Result<()> {
///         self.current -= 1;
///         Ok(())
///     }
/// }
///
/// let doc = Document::parse("<a><b><c/></b></a>").unwrap();
/// let mut depth = Depth::default();
/// emit_events(&doc, &mut depth).unwrap();
/// assert_eq!(depth.max, 3);
/// ```
pub fn emit_events<S: EventSink + ?Sized>(doc: &Document<'_>, sink: &mut S) -> Result<()> {
    let root = doc.root_element();
    open_element(sink, root)?;

    // Open elements with their remaining children, innermost last
    let mut open = vec![(root, root.children())];
    while let Some((element, children)) = open.last_mut() {
        match children.next() {
            Some(child) if child.is_element() => {
                open_element(sink, child)?;
                open.push((child, child.children()));
            }
            Some(child) if child.is_text() => {
                if let Some(text) = child.text() {
                    sink.characters(text)?;
                }
            }
            Some(_) => {}
            None => {
                let tag = element.tag_name();
                sink.end_element(tag.namespace().unwrap_or(""), tag.name())?;
                open.pop();
            }
        }
    }
    Ok(())
}

fn open_element<S: EventSink + ?Sized>(sink: &mut S, node: Node<'_, '_>) -> Result<()> {
    let tag = node.tag_name();
    sink.start_element(
        tag.namespace().unwrap_or(""),
        tag.name(),
        &NodeAttributes::new(node),
    )
}
