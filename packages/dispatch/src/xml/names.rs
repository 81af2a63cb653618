//! Name tokens for elements and attributes.

/// Build the name token for an element or attribute.
///
/// # Arguments
/// * `uri` - Namespace URI, empty when the name is not namespaced
/// * `local_name` - Local name without prefix
///
/// # Returns
/// `{uri}localName` when `uri` is non-empty, otherwise `localName`
///
/// # Examples
/// ```
/// use xml_dispatch::xml::build_name;
///
/// assert_eq!(build_name("", "root"), "root");
/// assert_eq!(build_name("urn:test", "root"), "{urn:test}root");
/// ```
pub fn build_name(uri: &str, local_name: &str) -> String {
    if uri.is_empty() {
        local_name.to_string()
    } else {
        format!("{{{uri}}}{local_name}")
    }
}

/// Split a name token into namespace URI and local name.
///
/// The inverse of [`build_name`]. A token without a leading `{` has an
/// empty URI.
///
/// # Examples
/// ```
/// use xml_dispatch::xml::split_name;
///
/// assert_eq!(split_name("{urn:test}a"), ("urn:test", "a"));
/// assert_eq!(split_name("a"), ("", "a"));
/// ```
pub fn split_name(name: &str) -> (&str, &str) {
    name.strip_prefix('{')
        .and_then(|rest| rest.split_once('}'))
        .unwrap_or(("", name))
}
