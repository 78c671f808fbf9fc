//! Page model abstraction.
//!
//! The renderer never assumes an element exists: every lookup returns an
//! optional handle and a missing element simply means "nothing to update".
//! [`MemoryDom`] is the in-process implementation used for pre-rendering,
//! the `render` command and tests; a browser backend implements the same
//! trait over the live document.

pub mod memory;
pub mod page;
pub mod selectors;

pub use memory::{MemoryDom, NodeId};
pub use page::{PageLayout, report_page};

/// Fallible access to a document's elements.
///
/// Handles are only valid for the document that produced them. Mutations
/// on a handle are idempotent: applying the same value twice leaves the
/// document as applying it once.
pub trait Dom {
    /// Opaque element handle.
    type Node: Copy;

    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// All elements in document order matching `selector`.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `scope` matching `selector`.
    fn query_in(&self, scope: Self::Node, selector: &str) -> Option<Self::Node>;

    /// Replaces the element's content with plain text.
    fn set_text(&mut self, node: Self::Node, text: &str);

    /// Replaces the element's content with markup.
    fn set_html(&mut self, node: Self::Node, html: &str);

    /// Sets an inline style property.
    fn set_style(&mut self, node: Self::Node, property: &str, value: &str);

    /// Removes an inline style property.
    fn remove_style(&mut self, node: Self::Node, property: &str);

    /// Sets an attribute value.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);
}

/// The subset of CSS selectors the page contract uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<'a> {
    /// `.name`
    Class(&'a str),
    /// `[name]`
    Attribute(&'a str),
}

impl<'a> Selector<'a> {
    /// Parses a single-class or attribute-presence selector.
    ///
    /// Returns `None` for anything else; callers treat that as "no match".
    #[must_use]
    pub fn parse(selector: &'a str) -> Option<Self> {
        let selector = selector.trim();
        if let Some(class) = selector.strip_prefix('.') {
            return is_ident(class).then_some(Self::Class(class));
        }
        let name = selector.strip_prefix('[')?.strip_suffix(']')?;
        is_ident(name).then_some(Self::Attribute(name))
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
