//! Element paths used as binding patterns.

use std::fmt;
use std::str::FromStr;

use crate::error::{DispatchError, Result};

/// A path to an element in an XML document.
///
/// A path is an ordered list of name tokens from the document root down to
/// the element. Namespaced segments use the `{uri}localName` form produced
/// by [`build_name`](crate::xml::build_name).
///
/// Matching is exact: a path only matches an element stack of the same
/// depth whose tokens are equal position by position. There are no
/// wildcards and no ancestor matching, so `root/element` never matches
/// `root/element/child`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ElementPath {
    segments: Vec<String>,
}

impl ElementPath {
    /// Create a path from its segments.
    ///
    /// # Examples
    /// ```
    /// use xml_dispatch::ElementPath;
    ///
    /// let path = ElementPath::new(["root", "element"]);
    /// assert_eq!(path.len(), 2);
    /// assert_eq!(path.to_string(), "root/element");
    /// ```
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the segments of the path.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Compare this path to an element stack.
    ///
    /// # Arguments
    /// * `stack` - Element names from the root to the current element
    ///
    /// # Returns
    /// `true` if the stack has the same length and every token is equal
    ///
    /// # Examples
    /// ```
    /// use xml_dispatch::ElementPath;
    ///
    /// let path = ElementPath::new(["root", "element"]);
    /// assert!(path.matches(&["root", "element"]));
    /// assert!(!path.matches(&["root"]));
    /// assert!(!path.matches(&["root", "element", "child"]));
    /// ```
    pub fn matches<S: AsRef<str>>(&self, stack: &[S]) -> bool {
        self.segments.len() == stack.len()
            && self
                .segments
                .iter()
                .zip(stack)
                .all(|(segment, name)| segment == name.as_ref())
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for ElementPath {
    type Err = DispatchError;

    /// Parse a slash-separated path such as `root/element` or
    /// `/{urn:x}root/{urn:x}item`.
    ///
    /// A leading `/` is optional. Slashes inside a `{uri}` part do not
    /// split segments.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DispatchError::InvalidPath(s.to_string());
        let body = s.strip_prefix('/').unwrap_or(s);
        if body.is_empty() {
            return Err(invalid());
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut in_uri = false;

        for ch in body.chars() {
            match ch {
                '{' if !in_uri && current.is_empty() => {
                    in_uri = true;
                    current.push(ch);
                }
                '}' if in_uri => {
                    in_uri = false;
                    current.push(ch);
                }
                '{' | '}' => return Err(invalid()),
                '/' if !in_uri => {
                    segments.push(finish_segment(&mut current).ok_or_else(invalid)?);
                }
                _ => current.push(ch),
            }
        }

        if in_uri {
            return Err(invalid());
        }
        segments.push(finish_segment(&mut current).ok_or_else(invalid)?);

        Ok(Self { segments })
    }
}

/// Take the segment being built, rejecting empty names and bare `{uri}`.
fn finish_segment(current: &mut String) -> Option<String> {
    if current.is_empty() || current.ends_with('}') {
        return None;
    }
    Some(std::mem::take(current))
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ElementPath {
    fn from(segments: [S; N]) -> Self {
        Self::new(segments)
    }
}

impl From<Vec<String>> for ElementPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&[&str]> for ElementPath {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}
