//! Callback signatures and the handler trait.

use super::core::CallbackRegistry;
use super::types::BoundAttributes;
use crate::error::CallbackError;

/// Outcome of a callback. An error aborts the parse.
pub type CallbackResult = std::result::Result<(), CallbackError>;

/// Callback for element start, given the requested attribute values.
pub type StartFn<H> = dyn Fn(&mut H, &BoundAttributes<'_>) -> CallbackResult;

/// Callback for element end.
pub type EndFn<H> = dyn Fn(&mut H) -> CallbackResult;

/// Callback for character data, given the text chunk as delivered.
pub type CharactersFn<H> = dyn Fn(&mut H, &str) -> CallbackResult;

/// Trait for handler types that declare their own bindings.
///
/// A handler lists the paths it cares about once, and the parser builds a
/// [`CallbackRegistry`] from that declaration before dispatching.
///
/// # Examples
/// ```
/// use xml_dispatch::{CallbackRegistry, XmlHandler};
///
/// #[derive(Default)]
/// struct Titles(Vec<String>);
///
/// impl XmlHandler for Titles {
///     fn register(registry: &mut CallbackRegistry<Self>) {
///         registry.on_characters(["book", "title"], |titles, text| {
///             titles.0.push(text.to_string());
///             Ok(())
///         });
///     }
/// }
///
/// let mut titles = Titles::default();
/// xml_dispatch::dispatch("<book><title>Dune</title></book>", Some(&mut titles)).unwrap();
/// assert_eq!(titles.0, ["Dune"]);
/// ```
pub trait XmlHandler: Sized {
    /// Register every callback of this handler type.
    fn register(registry: &mut CallbackRegistry<Self>);
}

/// Handler with no bindings. Dispatching to it only checks nesting.
impl XmlHandler for () {
    fn register(_registry: &mut CallbackRegistry<Self>) {}
}
