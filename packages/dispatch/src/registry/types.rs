//! Types shared by the registry and the dispatcher.

use std::fmt;

use crate::xml::Attributes;

/// The kind of parse event a callback is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Element start.
    Start,
    /// Element end.
    End,
    /// Character data inside an element.
    Characters,
}

impl EventKind {
    /// Lower-case name used in messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Characters => "characters",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute values handed to a start callback.
///
/// Holds one entry per attribute name requested at registration, in the
/// order the names were given. An entry is `None` when the element does
/// not carry that attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAttributes<'a> {
    names: &'a [String],
    values: Vec<Option<&'a str>>,
}

impl<'a> BoundAttributes<'a> {
    /// Resolve the requested names against the element's attributes.
    pub(crate) fn resolve(names: &'a [String], attributes: &'a dyn Attributes) -> Self {
        let values = names.iter().map(|name| attributes.value(name)).collect();
        Self { names, values }
    }

    /// Get the value bound at a position.
    ///
    /// Returns `None` if the attribute is absent or `index` is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.values.get(index).copied().flatten()
    }

    /// Get the value bound to a requested attribute name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&'a str> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|index| self.get(index))
    }

    /// All bound values in registration order.
    #[must_use]
    pub fn values(&self) -> &[Option<&'a str>] {
        &self.values
    }

    /// Iterate over `(name, value)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Number of requested attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no attributes were requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
